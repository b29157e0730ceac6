//! Presentation state that outlives a single render.
//!
//! Filters, admin page numbers and the last loaded lists live here rather
//! than in the markup, so re-rendering after a filter change or a toggled
//! request never needs another round trip.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

use crate::domain::{Membership, MembershipRequest, Room, Training, TrainingFilter, User};
use crate::views::AdminSection;

/// Everything the admin page loaded on its last fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSnapshot {
    pub users: Vec<User>,
    /// Sorted newest first.
    pub requests: Vec<MembershipRequest>,
    pub memberships: Vec<Membership>,
    pub rooms: Vec<Room>,
}

/// Current page number per admin section, one-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminPages(HashMap<AdminSection, usize>);

impl AdminPages {
    pub fn page(&self, section: AdminSection) -> usize {
        self.0.get(&section).copied().unwrap_or(1)
    }

    pub fn set(&mut self, section: AdminSection, page: usize) {
        self.0.insert(section, page.max(1));
    }

    pub fn reset(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub admin_pages: AdminPages,
    pub expanded_requests: HashSet<i64>,
    pub admin: Option<AdminSnapshot>,
    pub filter: TrainingFilter,
    /// Unfiltered trainings from the last load.
    pub trainings: Vec<Training>,
    /// Trainings the signed-in client has booked.
    pub booked: HashSet<i64>,
}

/// Shared, lock-guarded [`ViewState`].
#[derive(Debug, Default)]
pub struct ViewStore(Mutex<ViewState>);

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a read view of the state.
    pub fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        let state = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Run `f` with mutable access to the state.
    pub fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut state = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Collapse every request and go back to the first page of each section.
    pub fn reset_admin(&self) {
        self.update(|state| {
            state.admin_pages.reset();
            state.expanded_requests.clear();
        });
    }

    /// Flip a request between expanded and collapsed; returns the new state.
    pub fn toggle_request(&self, request_id: i64) -> bool {
        self.update(|state| {
            if state.expanded_requests.remove(&request_id) {
                false
            } else {
                state.expanded_requests.insert(request_id);
                true
            }
        })
    }
}
