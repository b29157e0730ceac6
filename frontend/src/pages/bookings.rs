//! A client's bookings.

use async_trait::async_trait;

use crate::domain::{Error, Role};
use crate::views::my_bookings_page;

use super::{Page, PageContext, PageOutcome, user_with_role};

pub struct MyBookingsPage;

impl MyBookingsPage {
    pub async fn show(ctx: &PageContext) -> PageOutcome {
        let Some(user) = user_with_role(ctx, &Role::Client) else {
            return PageOutcome::redirect("/");
        };
        ctx.show_loader(Some(&user));
        match ctx.api.bookings().await {
            Ok(bookings) => ctx.surface.render(my_bookings_page(&user, &bookings)),
            Err(error) => ctx.report("Ошибка загрузки записей", &error),
        }
        PageOutcome::Rendered
    }
}

#[async_trait]
impl Page for MyBookingsPage {
    async fn render(&self, ctx: &PageContext) -> Result<PageOutcome, Error> {
        Ok(Self::show(ctx).await)
    }
}
