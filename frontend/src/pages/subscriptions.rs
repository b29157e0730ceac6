//! Subscription offers.

use async_trait::async_trait;

use crate::domain::Error;
use crate::views::subscriptions_page;

use super::{Page, PageContext, PageOutcome};

pub struct SubscriptionsPage;

impl SubscriptionsPage {
    pub async fn show(ctx: &PageContext) {
        let user = ctx.user();
        ctx.show_loader(user.as_ref());
        match ctx.api.subscriptions().await {
            Ok(subscriptions) => ctx
                .surface
                .render(subscriptions_page(user.as_ref(), &subscriptions)),
            Err(error) => ctx.report("Ошибка загрузки абонементов", &error),
        }
    }
}

#[async_trait]
impl Page for SubscriptionsPage {
    async fn render(&self, ctx: &PageContext) -> Result<PageOutcome, Error> {
        Self::show(ctx).await;
        Ok(PageOutcome::Rendered)
    }
}
