//! Admin dashboard controller.

use async_trait::async_trait;
use futures_util::future::try_join4;
use pagination::paginate;

use crate::domain::{Error, Role, sort_newest_first};
use crate::views::{AdminSection, AdminView, admin_page};

use super::{AdminSnapshot, Page, PageContext, PageOutcome, user_with_role};

/// Entering `/admin` resets every section to its first page.
pub struct AdminPage;

impl AdminPage {
    /// Fetch all four sections concurrently and render the current pages.
    pub async fn load(ctx: &PageContext) -> PageOutcome {
        let Some(user) = user_with_role(ctx, &Role::Admin) else {
            return PageOutcome::redirect("/");
        };
        ctx.show_loader(Some(&user));
        let fetched = try_join4(
            ctx.api.all_users(),
            ctx.api.membership_requests(),
            ctx.api.all_memberships(),
            ctx.api.rooms(),
        )
        .await;
        match fetched {
            Ok((users, mut requests, memberships, rooms)) => {
                sort_newest_first(&mut requests);
                let snapshot = AdminSnapshot {
                    users,
                    requests,
                    memberships,
                    rooms,
                };
                ctx.view.update(|state| state.admin = Some(snapshot));
                Self::rerender(ctx);
            }
            Err(error) => ctx.report("Ошибка загрузки админ-панели", &error),
        }
        PageOutcome::Rendered
    }

    /// Render the last snapshot with the current page numbers and expanded
    /// requests; does nothing before the first successful load.
    pub fn rerender(ctx: &PageContext) {
        let Some(user) = ctx.user() else {
            return;
        };
        let size = ctx.page_size;
        let markup = ctx.view.read(|state| {
            let snapshot = state.admin.as_ref()?;
            let pages = &state.admin_pages;
            let view = AdminView {
                user: &user,
                users: paginate(&snapshot.users, pages.page(AdminSection::Users), size),
                requests: paginate(&snapshot.requests, pages.page(AdminSection::Requests), size),
                memberships: paginate(
                    &snapshot.memberships,
                    pages.page(AdminSection::Memberships),
                    size,
                ),
                rooms: paginate(&snapshot.rooms, pages.page(AdminSection::Rooms), size),
                expanded: &state.expanded_requests,
            };
            Some(admin_page(&view))
        });
        if let Some(markup) = markup {
            ctx.surface.render(markup);
        }
    }
}

#[async_trait]
impl Page for AdminPage {
    async fn render(&self, ctx: &PageContext) -> Result<PageOutcome, Error> {
        ctx.view.reset_admin();
        Ok(Self::load(ctx).await)
    }
}
