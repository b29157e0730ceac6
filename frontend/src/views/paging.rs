//! Page-button control for the admin tables.

use maud::{Markup, html};
use pagination::page_window;

use super::actions::{Action, AdminSection};

/// Pagination control for `section`; empty when there is at most one page.
pub fn pagination_control(section: AdminSection, current: usize, total_pages: usize) -> Markup {
    let Some(window) = page_window(current, total_pages) else {
        return html! {};
    };
    let change = |page: usize| Action::ChangePage(section, page).handler();
    html! {
        div.pagination {
            button.pagination-btn onclick=(change(current.saturating_sub(1))) disabled[!window.has_previous()] {
                "← Назад"
            }
            @if window.shows_first() {
                button.pagination-btn onclick=(change(1)) { "1" }
                @if window.leading_gap() {
                    span.pagination-dots { "..." }
                }
            }
            @for page in window.pages() {
                button.pagination-btn.active[page == window.current()] onclick=(change(page)) {
                    (page)
                }
            }
            @if window.shows_last() {
                @if window.trailing_gap() {
                    span.pagination-dots { "..." }
                }
                button.pagination-btn onclick=(change(total_pages)) { (total_pages) }
            }
            button.pagination-btn onclick=(change(current + 1)) disabled[!window.has_next()] {
                "Вперед →"
            }
        }
    }
}
