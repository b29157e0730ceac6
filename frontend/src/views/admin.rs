//! Admin dashboard: users, membership requests, memberships and rooms.

use std::collections::HashSet;

use maud::{Markup, html};
use pagination::Page;

use crate::domain::{Membership, MembershipRequest, Room, User};

use super::actions::{Action, AdminSection};
use super::components::layout;
use super::format::{format_optional_date, format_timestamp};
use super::paging::pagination_control;

/// One page of every admin section.
#[derive(Debug, Clone)]
pub struct AdminView<'a> {
    pub user: &'a User,
    pub users: Page<'a, User>,
    /// Requests already sorted newest first.
    pub requests: Page<'a, MembershipRequest>,
    pub memberships: Page<'a, Membership>,
    pub rooms: Page<'a, Room>,
    /// Requests whose details are expanded.
    pub expanded: &'a HashSet<i64>,
}

fn controls<T>(section: AdminSection, page: &Page<'_, T>) -> Markup {
    pagination_control(section, page.number(), page.total_pages())
}

fn role_badge(user: &User) -> Markup {
    let role = user.role.as_ref().map_or("", |role| role.as_str());
    html! {
        span class=(format!("role-badge role-{role}")) { (user.role_label()) }
    }
}

fn users_section(users: &Page<'_, User>) -> Markup {
    html! {
        div.admin-section {
            h2 { "Пользователи системы (" (users.total_items()) ")" }
            div.admin-table-wrapper {
                table.admin-table {
                    thead {
                        tr { th { "ID" } th { "Имя" } th { "Email" } th { "Роль" } }
                    }
                    tbody {
                        @for user in users.items() {
                            tr {
                                td { (user.id) }
                                td { (user.full_name()) }
                                td { (user.email) }
                                td { (role_badge(user)) }
                            }
                        }
                    }
                }
            }
            (controls(AdminSection::Users, users))
        }
    }
}

fn request_item(request: &MembershipRequest, expanded: bool) -> Markup {
    html! {
        div.request-item.collapsible.expanded[expanded] data-request-id=(request.id) {
            div.request-item-header onclick=(Action::ToggleRequest(request.id).handler()) {
                div.request-item-title {
                    span.chevron { @if expanded { "▼" } @else { "▶" } }
                    " "
                    strong { (request.user.full_name()) }
                    " "
                    span.request-item-email { (request.user.email) }
                }
                span class=(format!("request-status-badge status-{}", request.status.as_str())) {
                    (request.status.label())
                }
            }
            @if expanded {
                div.request-item-body {
                    div.request-details {
                        div.info-item {
                            span.info-label { "🎫 Абонемент:" } " " span.info-value { (request.subscription.title) }
                        }
                        div.info-item {
                            span.info-label { "💰 Цена:" } " " span.info-value { (request.subscription.price) " ₽" }
                        }
                        div.info-item {
                            span.info-label { "⏳ Длительность:" } " "
                            span.info-value { (request.subscription.duration_days) " дней" }
                        }
                        div.info-item {
                            span.info-label { "📅 Дата заявки:" } " "
                            span.info-value { (format_timestamp(&request.created_at)) }
                        }
                    }
                    @if request.is_pending() {
                        div.request-item-actions {
                            button.btn.btn-success onclick=(Action::ApproveRequest(request.id).handler()) { "✓ Одобрить" }
                            button.btn.btn-danger onclick=(Action::RejectRequest(request.id).handler()) { "✗ Отклонить" }
                        }
                    }
                }
            }
        }
    }
}

fn requests_section(requests: &Page<'_, MembershipRequest>, expanded: &HashSet<i64>) -> Markup {
    html! {
        div.admin-section {
            h2 { "Заявки на абонементы (" (requests.total_items()) ")" }
            @if requests.total_items() == 0 {
                p.empty-state-text { "Нет заявок" }
            } @else {
                div.requests-list {
                    @for request in requests.items() {
                        (request_item(request, expanded.contains(&request.id)))
                    }
                }
                (controls(AdminSection::Requests, requests))
            }
        }
    }
}

fn memberships_section(memberships: &Page<'_, Membership>) -> Markup {
    html! {
        div.admin-section {
            h2 { "Активные абонементы (" (memberships.total_items()) ")" }
            @if memberships.total_items() == 0 {
                p.empty-state-text { "Нет активных абонементов" }
            } @else {
                div.admin-table-wrapper {
                    table.admin-table {
                        thead {
                            tr { th { "Клиент" } th { "Абонемент" } th { "Начало" } th { "Окончание" } th { "Статус" } }
                        }
                        tbody {
                            @for membership in memberships.items() {
                                tr {
                                    td { (membership.user.as_ref().map(User::full_name).unwrap_or_default()) }
                                    td { (membership.subscription.as_ref().map_or("", |s| s.title.as_str())) }
                                    td { (format_optional_date(membership.start_date)) }
                                    td { (format_optional_date(membership.end_date)) }
                                    td {
                                        span class=(format!("status-badge status-{}", membership.status.as_str())) {
                                            (membership.status.label())
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                (controls(AdminSection::Memberships, memberships))
            }
        }
    }
}

fn rooms_section(rooms: &Page<'_, Room>) -> Markup {
    html! {
        div.admin-section {
            h2 { "Помещения (" (rooms.total_items()) ")" }
            button.btn.btn-primary onclick=(Action::AddRoom.handler()) { "+ Добавить помещение" }
            @if rooms.total_items() == 0 {
                p.empty-state-text { "Нет помещений" }
            } @else {
                div.admin-table-wrapper {
                    table.admin-table {
                        thead {
                            tr { th { "ID" } th { "Название" } th { "Вместимость" } th { "Действия" } }
                        }
                        tbody {
                            @for room in rooms.items() {
                                tr {
                                    td { (room.id) }
                                    td { (room.title) }
                                    td { (room.capacity) " чел." }
                                    td.action-buttons {
                                        button.btn.btn-small.btn-secondary onclick=(Action::EditRoom(room.id).handler()) {
                                            "✎ Редактировать"
                                        }
                                        button.btn.btn-small.btn-danger onclick=(Action::DeleteRoom(room.id).handler()) {
                                            "🗑 Удалить"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                (controls(AdminSection::Rooms, rooms))
            }
        }
    }
}

pub fn admin_page(view: &AdminView<'_>) -> Markup {
    let content = html! {
        div.container {
            h1 { "Панель администратора" }
            (users_section(&view.users))
            (requests_section(&view.requests, view.expanded))
            (memberships_section(&view.memberships))
            (rooms_section(&view.rooms))
        }
    };
    layout(content, Some(view.user))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Role;
    use pagination::{PageSize, paginate};
    use rstest::rstest;
    use serde_json::json;

    fn requests() -> Vec<MembershipRequest> {
        serde_json::from_value(json!([
            {"id": 1, "status": "pending", "created_at": "2026-10-18T12:30:00",
             "user": {"id": 7, "first_name": "Иван", "last_name": "Иванов", "email": "i@club.ru"},
             "subscription": {"id": 3, "title": "Месяц", "price": 3000, "duration_days": 30}},
            {"id": 2, "status": "approved", "created_at": "2026-10-10T08:00:00",
             "user": {"id": 8, "first_name": "Олег", "last_name": "Смирнов", "email": "o@club.ru"},
             "subscription": {"id": 3, "title": "Месяц", "price": 3000, "duration_days": 30}}
        ]))
        .expect("requests fixture")
    }

    fn render(users: &[User], requests: &[MembershipRequest], rooms: &[Room], expanded: &HashSet<i64>) -> String {
        let admin = User::new(1, "Админ", "Главный", "admin@club.ru", Role::Admin);
        let size = PageSize::default();
        let view = AdminView {
            user: &admin,
            users: paginate(users, 1, size),
            requests: paginate(requests, 1, size),
            memberships: paginate(&[], 1, size),
            rooms: paginate(rooms, 2, size),
            expanded,
        };
        admin_page(&view).into_string()
    }

    #[rstest]
    fn collapsed_requests_hide_details() {
        let html = render(&[], &requests(), &[], &HashSet::new());
        assert!(html.contains("Заявки на абонементы (2)"));
        assert!(html.contains("handleToggleRequest(1)"));
        assert!(!html.contains("request-item-body"));
        assert!(html.contains("Нет активных абонементов"));
    }

    #[rstest]
    fn expanded_pending_request_offers_decisions() {
        let html = render(&[], &requests(), &[], &HashSet::from([1, 2]));
        assert!(html.contains("request-item collapsible expanded"));
        assert!(html.contains("18 октября 2026 г., 12:30"));
        assert_eq!(html.matches("handleApproveRequest").count(), 1);
        assert!(html.contains("status-approved"));
    }

    #[rstest]
    fn rooms_paginate_with_controls() {
        let rooms: Vec<Room> = (1..=7)
            .map(|id| Room {
                id,
                title: format!("Зал {id}"),
                capacity: 10,
            })
            .collect();
        let users = vec![User::new(4, "Анна", "Петрова", "a@club.ru", Role::Trainer)];
        let html = render(&users, &[], &rooms, &HashSet::new());
        assert!(html.contains("Помещения (7)"));
        assert!(html.contains("handleEditRoom(6)"));
        assert!(!html.contains("handleEditRoom(5)"));
        assert!(html.contains("handleRoomsPageChange(1)"));
        assert!(!html.contains("handleUsersPageChange"));
        assert!(html.contains("role-badge role-trainer"));
    }
}
