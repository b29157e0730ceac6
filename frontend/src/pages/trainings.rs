//! Training schedule with in-memory filtering.

use async_trait::async_trait;
use futures_util::future::try_join3;
use tracing::debug;

use crate::domain::{Error, Role, TrainingFilter, booked_training_ids};
use crate::views::{TrainingsView, trainings_page};

use super::{Page, PageContext, PageOutcome};

pub struct TrainingsPage;

impl TrainingsPage {
    /// Fetch the schedule and re-render it with the current filter.
    ///
    /// Trainings, rooms and (for clients) bookings are fetched concurrently.
    /// Rooms only fill in trainings whose room is not nested, so a failed room
    /// lookup does not fail the page.
    pub async fn load(ctx: &PageContext) {
        let user = ctx.user();
        ctx.show_loader(user.as_ref());
        let is_client = user.as_ref().is_some_and(|user| user.has_role(&Role::Client));

        let rooms = async {
            Ok::<_, Error>(ctx.api.rooms().await.unwrap_or_else(|error| {
                debug!(message = error.message(), "rooms unavailable for the schedule");
                Vec::new()
            }))
        };
        let bookings = async {
            if is_client {
                ctx.api.bookings().await
            } else {
                Ok(Vec::new())
            }
        };

        match try_join3(ctx.api.trainings(), rooms, bookings).await {
            Ok((trainings, rooms, bookings)) => {
                let trainings = trainings
                    .into_iter()
                    .map(|training| training.resolve_room(&rooms))
                    .collect();
                ctx.view.update(|state| {
                    state.trainings = trainings;
                    state.booked = booked_training_ids(&bookings);
                });
                Self::rerender(ctx);
            }
            Err(error) => ctx.report("Ошибка загрузки тренировок", &error),
        }
    }

    /// Render the last loaded schedule through the current filter.
    pub fn rerender(ctx: &PageContext) {
        let user = ctx.user();
        let today = ctx.today();
        let markup = ctx.view.read(|state| {
            let visible = state.filter.apply(&state.trainings, today);
            trainings_page(TrainingsView {
                user: user.as_ref(),
                trainings: &visible,
                total: state.trainings.len(),
                filter: &state.filter,
                booked: &state.booked,
            })
        });
        ctx.surface.render(markup);
    }

    /// Replace the filter and re-render without refetching.
    pub fn apply_filter(ctx: &PageContext, filter: TrainingFilter) {
        debug!(query = %filter.query, date = filter.date.as_str(), availability = filter.availability.as_str(), "filtering trainings");
        ctx.view.update(|state| state.filter = filter);
        Self::rerender(ctx);
    }
}

#[async_trait]
impl Page for TrainingsPage {
    async fn render(&self, ctx: &PageContext) -> Result<PageOutcome, Error> {
        ctx.view.update(|state| state.filter = TrainingFilter::default());
        Self::load(ctx).await;
        Ok(PageOutcome::Rendered)
    }
}
