//! Profile page with the role-specific membership or workload block.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Error, Role, User, WorkloadStats};
use crate::views::{ProfileSection, profile_page};

use super::{Page, PageContext, PageOutcome};

pub struct ProfilePage;

async fn client_section(ctx: &PageContext) -> ProfileSection {
    let loaded = async {
        let membership = ctx.api.my_membership().await?;
        let catalogue = ctx.api.subscriptions().await?;
        let subscription = membership.resolve_subscription(&catalogue).cloned();
        Ok::<_, Error>(ProfileSection::Membership {
            membership,
            subscription,
        })
    };
    loaded.await.unwrap_or_else(|error| {
        debug!(message = error.message(), "no current membership");
        ProfileSection::NoMembership
    })
}

async fn trainer_section(ctx: &PageContext) -> ProfileSection {
    match ctx.api.my_trainings().await {
        Ok(trainings) => ProfileSection::Workload(WorkloadStats::from_trainings(&trainings)),
        Err(error) => {
            debug!(message = error.message(), "workload statistics unavailable");
            ProfileSection::WorkloadUnavailable
        }
    }
}

async fn role_section(ctx: &PageContext, user: &User) -> ProfileSection {
    if user.has_role(&Role::Client) {
        client_section(ctx).await
    } else if user.has_role(&Role::Trainer) {
        trainer_section(ctx).await
    } else {
        ProfileSection::None
    }
}

#[async_trait]
impl Page for ProfilePage {
    async fn render(&self, ctx: &PageContext) -> Result<PageOutcome, Error> {
        let Some(user) = ctx.user() else {
            return Ok(PageOutcome::redirect("/login"));
        };
        ctx.show_loader(Some(&user));
        let section = role_section(ctx, &user).await;
        ctx.surface.render(profile_page(&user, &section));
        Ok(PageOutcome::Rendered)
    }
}
