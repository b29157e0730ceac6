//! Pages for signed-in members: bookings, trainer sessions and the profile.

use maud::{Markup, html};

use crate::domain::{Booking, Membership, Subscription, Training, User, WorkloadStats};

use super::components::{booking_card, empty_state, layout};
use super::format::{format_date, format_optional_date};

pub fn my_bookings_page(user: &User, bookings: &[Booking]) -> Markup {
    let content = html! {
        div.container {
            div.page-header { h1 { "Мои записи" } }
            @if bookings.is_empty() {
                (empty_state("📅", "Нет записей", "Вы еще не записались ни на одну тренировку"))
            } @else {
                div.bookings-grid {
                    @for booking in bookings {
                        (booking_card(booking, true))
                    }
                }
            }
        }
    };
    layout(content, Some(user))
}

fn trainer_training_card(training: &Training) -> Markup {
    let participants: Vec<&User> = training.participants().collect();
    html! {
        div.trainer-training-card {
            div.training-header {
                h3 { (training.title) }
                span.training-date { (format_date(training.date)) }
            }
            div.training-info {
                div.info-item {
                    span.info-label { "⏰ Время:" }
                    " "
                    span.info-value { (training.time_range_label()) }
                }
                @if let Some(room) = &training.room {
                    div.info-item {
                        span.info-label { "🏠 Помещение:" }
                        " "
                        span.info-value { (room.title) }
                    }
                }
                @if let Some(description) = training.description_text() {
                    div.info-item {
                        span.info-label { "📝 Описание:" }
                        " "
                        span.info-value { (description) }
                    }
                }
            }
            div.training-participants {
                h4 { "Участники (" (participants.len()) "):" }
                @if participants.is_empty() {
                    p.no-participants { "Пока нет записавшихся" }
                } @else {
                    ul.participants-list {
                        @for client in &participants {
                            li { (client.full_name()) " (" (client.email) ")" }
                        }
                    }
                }
            }
        }
    }
}

/// A trainer's own sessions with booked participants.
pub fn my_trainings_page(user: &User, trainings: &[Training]) -> Markup {
    let content = html! {
        div.container {
            div.page-header { h1 { "Мои тренировки" } }
            @if trainings.is_empty() {
                (empty_state("💪", "Нет тренировок", "У вас пока нет запланированных тренировок"))
            } @else {
                div.trainings-list {
                    @for training in trainings {
                        (trainer_training_card(training))
                    }
                }
            }
        }
    };
    layout(content, Some(user))
}

/// Role-specific block below the personal details.
#[derive(Debug, Clone)]
pub enum ProfileSection {
    None,
    /// Client with a current membership.
    Membership {
        membership: Membership,
        subscription: Option<Subscription>,
    },
    /// Client without a membership, or whose lookup failed.
    NoMembership,
    Workload(WorkloadStats),
    /// Trainer statistics could not be loaded.
    WorkloadUnavailable,
}

fn info_row(label: &str, value: impl maud::Render) -> Markup {
    html! {
        div.info-item {
            span.info-label { (label) }
            " "
            span.info-value { (value) }
        }
    }
}

fn membership_section(membership: &Membership, subscription: Option<&Subscription>) -> Markup {
    html! {
        div.profile-section {
            h2 { "Мой абонемент" }
            div.membership-card.active {
                div.membership-header {
                    h3 { (subscription.map_or("Абонемент", |s| s.title.as_str())) }
                    span.membership-status.status-active { "Активен" }
                }
                div.membership-body {
                    div.membership-info {
                        (info_row("📅 Начало:", format_optional_date(membership.start_date)))
                        (info_row("📅 Окончание:", format_optional_date(membership.end_date)))
                        (info_row("⏳ Длительность:", format!("{} дней", subscription.map_or(0, |s| s.duration_days))))
                        (info_row("💰 Цена:", format!("{} ₽", subscription.map_or(0, |s| s.price))))
                    }
                }
            }
        }
    }
}

fn bar_chart(title: &str, stats: &WorkloadStats, secondary: bool) -> Markup {
    let bars = stats.by_weekday.iter().map(|day| {
        if secondary {
            (day.clients, stats.clients_percent(day), day.short_name())
        } else {
            (day.trainings, stats.trainings_percent(day), day.short_name())
        }
    });
    html! {
        div.chart-container {
            h3.chart-title { (title) }
            div.bar-chart {
                @for (value, percent, label) in bars {
                    div.bar-item {
                        div.bar-wrapper {
                            div.bar.bar-secondary[secondary] style=(format!("height: {percent}%")) {
                                span.bar-value { (value) }
                            }
                        }
                        div.bar-label { (label) }
                    }
                }
            }
        }
    }
}

fn workload_section(stats: &WorkloadStats) -> Markup {
    html! {
        div.profile-section {
            h2 { "Статистика нагрузки" }
            div.stats-cards {
                div.stat-card {
                    div.stat-card-icon { "📊" }
                    div.stat-card-value { (stats.total_trainings) }
                    div.stat-card-label { "Всего тренировок" }
                }
                div.stat-card {
                    div.stat-card-icon { "👥" }
                    div.stat-card-value { (stats.total_clients) }
                    div.stat-card-label { "Всего клиентов" }
                }
                div.stat-card {
                    div.stat-card-icon { "📈" }
                    div.stat-card-value { (stats.average_label()) }
                    div.stat-card-label { "Среднее участников" }
                }
            }
            div.workload-charts {
                (bar_chart("Тренировки по дням недели", stats, false))
                (bar_chart("Клиенты по дням недели", stats, true))
            }
        }
    }
}

fn role_section(section: &ProfileSection) -> Markup {
    match section {
        ProfileSection::None => html! {},
        ProfileSection::Membership {
            membership,
            subscription,
        } => membership_section(membership, subscription.as_ref()),
        ProfileSection::NoMembership => html! {
            div.profile-section {
                h2 { "Мой абонемент" }
                div.empty-membership {
                    p { "У вас нет активного абонемента" }
                    a.btn.btn-primary href="/subscriptions" data-link { "Выбрать абонемент" }
                }
            }
        },
        ProfileSection::Workload(stats) => workload_section(stats),
        ProfileSection::WorkloadUnavailable => html! {
            div.profile-section {
                h2 { "Статистика нагрузки" }
                p.empty-state-text { "Не удалось загрузить статистику" }
            }
        },
    }
}

pub fn profile_page(user: &User, section: &ProfileSection) -> Markup {
    let content = html! {
        div.container {
            h1 { "Профиль" }
            div.profile-section {
                h2 { "Личная информация" }
                div.profile-info {
                    (info_row("Имя:", user.full_name()))
                    (info_row("Email:", &user.email))
                    @if let Some(phone) = user.phone_number.as_deref().filter(|phone| !phone.is_empty()) {
                        (info_row("Телефон:", phone))
                    }
                    (info_row("Роль:", user.role_label()))
                }
            }
            (role_section(section))
        }
    };
    layout(content, Some(user))
}
