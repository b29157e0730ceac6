//! Public catalogue pages: the trainings schedule and subscription offers.

use std::collections::HashSet;

use maud::{Markup, html};

use crate::domain::{AvailabilityFilter, DateFilter, Role, Subscription, Training, TrainingFilter, User};

use super::actions::{Action, ActionButton, ButtonStyle};
use super::components::{empty_state, layout, subscription_card, training_card};

/// Input names of the trainings filter bar.
pub const SEARCH_INPUT: &str = "trainingSearch";
pub const DATE_SELECT: &str = "dateFilter";
pub const AVAILABILITY_SELECT: &str = "availabilityFilter";

const DATE_OPTIONS: [(DateFilter, &str); 4] = [
    (DateFilter::All, "Все даты"),
    (DateFilter::Today, "Сегодня"),
    (DateFilter::Week, "Ближайшая неделя"),
    (DateFilter::Month, "До конца месяца"),
];

const AVAILABILITY_OPTIONS: [(AvailabilityFilter, &str); 3] = [
    (AvailabilityFilter::All, "Все тренировки"),
    (AvailabilityFilter::Available, "Есть места"),
    (AvailabilityFilter::Full, "Мест нет"),
];

/// Data behind the trainings page.
#[derive(Debug, Clone, Copy)]
pub struct TrainingsView<'a> {
    pub user: Option<&'a User>,
    /// Trainings left after filtering.
    pub trainings: &'a [Training],
    /// Size of the unfiltered list.
    pub total: usize,
    pub filter: &'a TrainingFilter,
    /// Trainings the signed-in client already booked.
    pub booked: &'a HashSet<i64>,
}

fn is_staff(user: Option<&User>) -> bool {
    user.is_some_and(|user| user.has_role(&Role::Trainer) || user.has_role(&Role::Admin))
}

/// Card actions for `training` as seen by `user`.
pub fn training_actions(user: Option<&User>, training: &Training, booked: &HashSet<i64>) -> Vec<ActionButton> {
    let mut actions = Vec::new();
    if user.is_some_and(|user| user.has_role(&Role::Client)) {
        let button = if booked.contains(&training.id) {
            ActionButton::new("✓ Вы записаны", ButtonStyle::Secondary, Action::BookTraining(training.id))
                .disabled(true)
        } else {
            ActionButton::new("Записаться", ButtonStyle::Primary, Action::BookTraining(training.id))
                .disabled_when_full()
        };
        actions.push(button);
    }
    if is_staff(user) {
        actions.push(ActionButton::new(
            "Редактировать",
            ButtonStyle::Secondary,
            Action::EditTraining(training.id),
        ));
        actions.push(ActionButton::new(
            "Удалить",
            ButtonStyle::Danger,
            Action::DeleteTraining(training.id),
        ));
    }
    actions
}

fn filter_bar(filter: &TrainingFilter) -> Markup {
    html! {
        div.filters-bar {
            input.form-input.search-input
                type="search"
                id=(SEARCH_INPUT)
                name=(SEARCH_INPUT)
                placeholder="Поиск по названию или тренеру"
                value=(filter.query)
                oninput=(Action::SearchTrainings.handler());
            select.form-input id=(DATE_SELECT) name=(DATE_SELECT) onchange=(Action::FilterTrainings.handler()) {
                @for (value, label) in DATE_OPTIONS {
                    option value=(value.as_str()) selected[value == filter.date] { (label) }
                }
            }
            select.form-input
                id=(AVAILABILITY_SELECT)
                name=(AVAILABILITY_SELECT)
                onchange=(Action::FilterTrainings.handler()) {
                @for (value, label) in AVAILABILITY_OPTIONS {
                    option value=(value.as_str()) selected[value == filter.availability] { (label) }
                }
            }
            button.btn.btn-secondary onclick=(Action::ResetFilters.handler()) { "Сбросить" }
        }
    }
}

/// The schedule with its filter bar.
pub fn trainings_page(view: TrainingsView<'_>) -> Markup {
    let content = html! {
        div.container {
            div.page-header {
                h1 { "Доступные тренировки" }
                @if is_staff(view.user) {
                    button.btn.btn-primary onclick=(Action::CreateTraining.handler()) { "Создать тренировку" }
                }
            }
            @if view.total == 0 {
                (empty_state("📅", "Нет тренировок", "Пока не добавлено ни одной тренировки"))
            } @else {
                (filter_bar(view.filter))
                p.filter-summary { "Показано " (view.trainings.len()) " из " (view.total) }
                @if view.trainings.is_empty() {
                    (empty_state("🔍", "Ничего не найдено", "Попробуйте изменить параметры поиска"))
                } @else {
                    div.trainings-grid {
                        @for training in view.trainings {
                            (training_card(training, &training_actions(view.user, training, view.booked)))
                        }
                    }
                }
            }
        }
    };
    layout(content, view.user)
}

fn subscription_actions(user: Option<&User>, subscription: &Subscription) -> Vec<ActionButton> {
    let Some(user) = user else {
        return Vec::new();
    };
    if user.has_role(&Role::Client) {
        return vec![ActionButton::new(
            "Купить",
            ButtonStyle::Primary,
            Action::BuySubscription(subscription.id),
        )];
    }
    if user.has_role(&Role::Admin) {
        return vec![
            ActionButton::new("Редактировать", ButtonStyle::Secondary, Action::EditSubscription(subscription.id)),
            ActionButton::new("Удалить", ButtonStyle::Danger, Action::DeleteSubscription(subscription.id)),
        ];
    }
    Vec::new()
}

pub fn subscriptions_page(user: Option<&User>, subscriptions: &[Subscription]) -> Markup {
    let is_admin = user.is_some_and(|user| user.has_role(&Role::Admin));
    let content = html! {
        div.container {
            div.page-header {
                h1 { "Доступные абонементы" }
                @if is_admin {
                    button.btn.btn-primary onclick=(Action::CreateSubscription.handler()) { "Создать абонемент" }
                }
            }
            @if subscriptions.is_empty() {
                (empty_state("🎫", "Нет абонементов", "Пока не добавлено ни одного абонемента"))
            } @else {
                div.subscriptions-grid {
                    @for subscription in subscriptions {
                        (subscription_card(subscription, &subscription_actions(user, subscription)))
                    }
                }
            }
        }
    };
    layout(content, user)
}
