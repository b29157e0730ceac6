//! In-process [`Surface`] and [`History`] adapters.
//!
//! The headless renderer writes the last rendered markup to stdout, and tests
//! inspect what pages rendered, which toasts fired and which modals opened.
//! Modal answers are scripted ahead of time; an empty script dismisses.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use maud::Markup;

use crate::domain::ports::{History, Modal, ModalResponse, Notification, Surface};

#[derive(Debug, Default)]
struct SurfaceState {
    renders: Vec<String>,
    notifications: Vec<Notification>,
    form_errors: BTreeMap<String, String>,
    modal_titles: Vec<String>,
    modal_script: VecDeque<Option<ModalResponse>>,
}

/// Surface that records everything shown on it.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<SurfaceState>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the answer for the next modal; `None` dismisses it.
    pub fn answer_next_modal(&self, response: Option<ModalResponse>) {
        self.state().modal_script.push_back(response);
    }

    /// Markup of the most recent render.
    pub fn last_render(&self) -> Option<String> {
        self.state().renders.last().cloned()
    }

    /// Number of times the content region was replaced.
    pub fn render_count(&self) -> usize {
        self.state().renders.len()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state().notifications.clone()
    }

    /// Message of the most recent toast.
    pub fn last_notification(&self) -> Option<Notification> {
        self.state().notifications.last().cloned()
    }

    pub fn form_error(&self, form_id: &str) -> Option<String> {
        self.state().form_errors.get(form_id).cloned()
    }

    /// Titles of every modal opened so far.
    pub fn modal_titles(&self) -> Vec<String> {
        self.state().modal_titles.clone()
    }
}

#[async_trait]
impl Surface for MemorySurface {
    fn render(&self, markup: Markup) {
        self.state().renders.push(markup.into_string());
    }

    fn notify(&self, notification: Notification) {
        tracing::debug!(kind = %notification.kind, message = %notification.message, "toast");
        self.state().notifications.push(notification);
    }

    fn show_form_error(&self, form_id: &str, message: &str) {
        self.state()
            .form_errors
            .insert(form_id.to_owned(), message.to_owned());
    }

    fn clear_form_error(&self, form_id: &str) {
        self.state().form_errors.remove(form_id);
    }

    async fn show_modal(&self, modal: Modal) -> Option<ModalResponse> {
        let mut state = self.state();
        state.modal_titles.push(modal.title);
        state.modal_script.pop_front().flatten()
    }
}

/// History stack kept in memory.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: Mutex<Vec<String>>,
}

impl MemoryHistory {
    /// Start with a single entry for `initial_path`.
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(vec![initial_path.into()]),
        }
    }

    fn entries_guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries_guard().clone()
    }

    /// Drop the current entry, as the browser back button does.
    ///
    /// Returns the new current path; the first entry is never dropped.
    pub fn back(&self) -> Option<String> {
        let mut entries = self.entries_guard();
        if entries.len() <= 1 {
            return None;
        }
        entries.pop();
        entries.last().cloned()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn push(&self, path: &str) {
        self.entries_guard().push(path.to_owned());
    }

    fn current_path(&self) -> String {
        self.entries_guard()
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_owned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use maud::html;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn modal_answers_follow_script_then_dismiss() {
        let surface = MemorySurface::new();
        surface.answer_next_modal(Some(ModalResponse::new("confirm")));

        let modal = || Modal {
            title: "Подтверждение".to_owned(),
            body: html! { p { "?" } },
            buttons: Vec::new(),
        };
        let first = surface.show_modal(modal()).await;
        let second = surface.show_modal(modal()).await;

        assert_eq!(first.map(|r| r.action), Some("confirm".to_owned()));
        assert!(second.is_none());
        assert_eq!(surface.modal_titles().len(), 2);
    }

    #[rstest]
    fn form_errors_can_be_cleared() {
        let surface = MemorySurface::new();
        surface.show_form_error("loginForm", "Пароли не совпадают");
        assert_eq!(surface.form_error("loginForm").as_deref(), Some("Пароли не совпадают"));
        surface.clear_form_error("loginForm");
        assert!(surface.form_error("loginForm").is_none());
    }

    #[rstest]
    fn render_keeps_latest_markup() {
        let surface = MemorySurface::new();
        surface.render(html! { p { "one" } });
        surface.render(html! { p { "two" } });
        assert_eq!(surface.render_count(), 2);
        assert_eq!(surface.last_render().as_deref(), Some("<p>two</p>"));
    }

    #[rstest]
    fn history_back_stops_at_first_entry() {
        let history = MemoryHistory::new("/");
        history.push("/trainings");
        history.push("/profile");

        assert_eq!(history.current_path(), "/profile");
        assert_eq!(history.back().as_deref(), Some("/trainings"));
        assert_eq!(history.back().as_deref(), Some("/"));
        assert_eq!(history.back(), None);
        assert_eq!(history.entries(), vec!["/".to_owned()]);
    }
}
