//! Reusable markup fragments shared by every page.

use maud::{Markup, html};

use crate::domain::ports::{Modal, Notification};
use crate::domain::{Booking, Role, Subscription, Training, User};

use super::actions::{Action, ActionButton};
use super::format::format_date;

/// Top navigation bar, with role-specific links when signed in.
pub fn navbar(user: Option<&User>) -> Markup {
    html! {
        nav.navbar {
            div.navbar-container {
                a.navbar-brand href="/" data-link {
                    span.brand-icon { "💪" }
                    span.brand-text { "СпортКлуб" }
                }
                div.navbar-menu {
                    @if let Some(user) = user {
                        a.navbar-link href="/trainings" data-link { "Тренировки" }
                        a.navbar-link href="/subscriptions" data-link { "Абонементы" }
                        @if user.has_role(&Role::Client) {
                            a.navbar-link href="/my-bookings" data-link { "Мои записи" }
                        }
                        @if user.has_role(&Role::Trainer) {
                            a.navbar-link href="/my-trainings" data-link { "Мои тренировки" }
                        }
                        @if user.has_role(&Role::Admin) {
                            a.navbar-link href="/admin" data-link { "Админ панель" }
                        }
                        div.navbar-user {
                            a.user-profile-link href="/profile" data-link {
                                span.user-name { (user.full_name()) }
                                " "
                                span.user-role { "(" (user.role_label()) ")" }
                            }
                        }
                        button.btn.btn-secondary onclick=(Action::Logout.handler()) { "Выйти" }
                    } @else {
                        a.navbar-link href="/login" data-link { "Войти" }
                        a.btn.btn-primary href="/register" data-link { "Регистрация" }
                    }
                }
            }
        }
    }
}

/// Navigation bar, content region and footer.
pub fn layout(content: Markup, user: Option<&User>) -> Markup {
    html! {
        (navbar(user))
        main.main-content { (content) }
        footer.footer {
            div.container {
                p { "© 2025 СпортКлуб. Все права защищены." }
            }
        }
    }
}

/// Loading placeholder shown while a controller fetches.
pub fn loader() -> Markup {
    html! {
        div.loader {
            div.spinner {}
            p { "Загрузка..." }
        }
    }
}

/// Layout wrapping the loading placeholder.
pub fn loading_page(user: Option<&User>) -> Markup {
    layout(html! { div.container { (loader()) } }, user)
}

/// Panel rendered when a page controller fails.
pub fn error_panel(message: &str) -> Markup {
    html! {
        div.error-page {
            h1 { "Error" }
            p { (message) }
            button onclick=(Action::Navigate("/".to_owned()).handler()) { "Go Home" }
        }
    }
}

pub fn empty_state(icon: &str, title: &str, message: &str) -> Markup {
    html! {
        div.empty-state {
            div.empty-icon { (icon) }
            h2.empty-title { (title) }
            p.empty-message { (message) }
        }
    }
}

/// A labelled `<input>` inside a form group.
pub fn form_input(kind: &str, name: &str, label: &str, required: bool, placeholder: &str) -> Markup {
    html! {
        div.form-group {
            label.form-label for=(name) {
                (label)
                @if required { " *" }
            }
            input.form-input type=(kind) id=(name) name=(name) required[required] placeholder=(placeholder);
        }
    }
}

fn info_item(label: &str, value: Markup) -> Markup {
    html! {
        div.info-item {
            span.info-label { (label) }
            " "
            (value)
        }
    }
}

fn info_value(value: impl maud::Render) -> Markup {
    html! { span.info-value { (value) } }
}

fn action_row(class: &str, actions: &[ActionButton], is_full: bool) -> Markup {
    html! {
        @if !actions.is_empty() {
            div class=(class) {
                @for action in actions {
                    button class=(action.style.class())
                        onclick=(action.action.handler())
                        disabled[action.is_disabled(is_full)] {
                        (action.label)
                    }
                }
            }
        }
    }
}

/// Card for one training in the schedule.
pub fn training_card(training: &Training, actions: &[ActionButton]) -> Markup {
    let capacity = training.capacity();
    let is_full = training.is_full();
    let time = training.time_range_label();
    html! {
        div.training-card data-training-id=(training.id) {
            div.training-header {
                h3.training-title { (training.title) }
                span.training-time { (time) }
            }
            div.training-body {
                div.training-info {
                    (info_item("📅 Дата:", info_value(format_date(training.date))))
                    (info_item("⏰ Время:", info_value(&time)))
                    @if let Some(trainer) = training.trainer_name() {
                        (info_item("👤 Тренер:", info_value(trainer)))
                    }
                    @if let Some(room) = &training.room {
                        (info_item("🏠 Помещение:", info_value(&room.title)))
                    }
                    @if capacity > 0 {
                        (info_item("👥 Записалось:", html! {
                            span.info-value.text-danger[is_full] {
                                (training.booking_count) " / " (capacity)
                                @if is_full { " (мест нет)" }
                            }
                        }))
                    }
                    @if let Some(description) = training.description_text() {
                        (info_item("📝 Описание:", info_value(description)))
                    }
                }
            }
            (action_row("training-actions", actions, is_full))
        }
    }
}

/// Card for one of the client's bookings.
pub fn booking_card(booking: &Booking, show_cancel: bool) -> Markup {
    let training = &booking.training;
    html! {
        div.booking-card data-booking-id=(booking.id) {
            div.booking-header {
                h3 { (training.title) }
            }
            div.booking-body {
                div.booking-info {
                    (info_item("📅 Дата:", info_value(format_date(training.date))))
                    (info_item("⏰ Время:", info_value(training.time_range_label())))
                    @if let Some(room) = &training.room {
                        (info_item("🏠 Помещение:", info_value(&room.title)))
                    }
                }
            }
            @if show_cancel {
                div.booking-actions {
                    button.btn.btn-danger onclick=(Action::CancelBooking(training.id).handler()) {
                        "Отменить запись"
                    }
                }
            }
        }
    }
}

pub fn subscription_card(subscription: &Subscription, actions: &[ActionButton]) -> Markup {
    html! {
        div.subscription-card data-subscription-id=(subscription.id) {
            div.subscription-header {
                h3.subscription-title { (subscription.title) }
                div.subscription-price { (subscription.price) " ₽" }
            }
            div.subscription-body {
                div.subscription-info {
                    (info_item("⏳ Длительность:", info_value(format!("{} дней", subscription.duration_days))))
                    (info_item("💰 Цена:", info_value(format!("{} рублей", subscription.price))))
                }
            }
            (action_row("subscription-actions", actions, false))
        }
    }
}

/// Toast markup for a notification.
pub fn toast(notification: &Notification) -> Markup {
    html! {
        div class=(format!("notification notification-{}", notification.kind)) {
            (notification.message)
        }
    }
}

/// Modal dialog markup; buttons report their action through `data-action`.
pub fn modal(modal: &Modal) -> Markup {
    html! {
        div.modal {
            div.modal-content {
                div.modal-header {
                    h2 { (modal.title) }
                    button.modal-close { "×" }
                }
                div.modal-body { (modal.body) }
                div.modal-footer {
                    @for button in &modal.buttons {
                        button class=(format!("btn btn-{}", button.style)) data-action=(button.action) {
                            (button.label)
                        }
                    }
                }
            }
        }
    }
}
