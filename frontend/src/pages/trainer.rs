//! A trainer's own sessions.

use async_trait::async_trait;

use crate::domain::{Error, Role};
use crate::views::my_trainings_page;

use super::{Page, PageContext, PageOutcome, user_with_role};

pub struct MyTrainingsPage;

#[async_trait]
impl Page for MyTrainingsPage {
    async fn render(&self, ctx: &PageContext) -> Result<PageOutcome, Error> {
        let Some(user) = user_with_role(ctx, &Role::Trainer) else {
            return Ok(PageOutcome::redirect("/"));
        };
        ctx.show_loader(Some(&user));
        match ctx.api.my_trainings().await {
            Ok(trainings) => ctx.surface.render(my_trainings_page(&user, &trainings)),
            Err(error) => ctx.report("Ошибка загрузки тренировок", &error),
        }
        Ok(PageOutcome::Rendered)
    }
}
