//! Client core for the SportClub booking app.
//!
//! The browser-facing effects (content region, toasts, modals, history) sit
//! behind ports so the router, controllers and views run headless.

pub mod app;
pub mod config;
pub mod domain;
pub mod guards;
pub mod outbound;
pub mod pages;
pub mod router;
pub mod support;
pub mod views;

pub use app::{App, AppEvent};
pub use config::ClientSettings;
pub use router::{ClickOutcome, ClickTarget, GuardDecision, NavigationOutcome, Router};
