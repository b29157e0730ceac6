//! Client-side router with ordered guard hooks.
//!
//! `navigate` runs every guard in registration order with the target and the
//! current path. `Deny` cancels without touching history; `Redirect`
//! substitutes the target for the remaining guards only. The committed path is
//! pushed into history and its controller (or the `/404` controller) runs.
//! Controller errors are rendered as an error panel, so a failing page never
//! leaves the router stuck.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::History;
use crate::pages::{Page, PageContext, PageOutcome};
use crate::views::error_panel;

/// Route rendered when no other route matches.
pub const NOT_FOUND_PATH: &str = "/404";

/// Controller redirects followed before giving up.
pub const MAX_REDIRECTS: usize = 4;

/// Router lifecycle; `Idle` between navigations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouterState {
    #[default]
    Idle,
    Navigating,
    Rendering,
}

/// Verdict of a guard hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Deny,
    Redirect(String),
}

/// Hook consulted before every navigation.
#[async_trait]
pub trait Guard: Send + Sync {
    async fn check(&self, target: &str, current: Option<&str>) -> GuardDecision;
}

/// How a navigation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A controller rendered `path`.
    Rendered(String),
    /// A guard denied the navigation.
    Cancelled,
    /// The controller for `path` failed and the error panel was shown.
    Failed(String),
    /// Controllers kept redirecting; the last target is reported.
    RedirectLimit(String),
}

/// The element a click landed on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub href: Option<String>,
    /// Whether the element carries the `data-link` marker.
    pub data_link: bool,
}

impl ClickTarget {
    /// An in-app link (`<a href=.. data-link>`).
    pub fn link(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            data_link: true,
        }
    }

    /// A plain anchor the router leaves to the browser.
    pub fn external(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            data_link: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Intercepted(NavigationOutcome),
    PassThrough,
}

enum Step {
    Done(NavigationOutcome),
    Redirect(String),
}

pub struct Router {
    ctx: PageContext,
    history: Arc<dyn History>,
    routes: HashMap<String, Arc<dyn Page>>,
    guards: Vec<Arc<dyn Guard>>,
    current: Option<String>,
    state: RouterState,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut routes: Vec<&String> = self.routes.keys().collect();
        routes.sort();
        f.debug_struct("Router")
            .field("routes", &routes)
            .field("guards", &self.guards.len())
            .field("current", &self.current)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Router {
    pub fn new(ctx: PageContext, history: Arc<dyn History>) -> Self {
        Self {
            ctx,
            history,
            routes: HashMap::new(),
            guards: Vec::new(),
            current: None,
            state: RouterState::Idle,
        }
    }

    /// Register the controller for an exact path.
    pub fn add_route(&mut self, path: impl Into<String>, page: impl Page + 'static) {
        self.routes.insert(path.into(), Arc::new(page));
    }

    /// Register a guard; guards run in registration order.
    pub fn before_each(&mut self, guard: impl Guard + 'static) {
        self.guards.push(Arc::new(guard));
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    /// Path of the last resolved route.
    pub fn current_route(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    /// Resolve whatever history currently points at, without guards.
    pub async fn start(&mut self) -> NavigationOutcome {
        self.pop_state().await
    }

    /// Guarded navigation to `path`, following controller redirects.
    pub async fn navigate(&mut self, path: &str) -> NavigationOutcome {
        let mut target = path.to_owned();
        for _ in 0..=MAX_REDIRECTS {
            match self.navigate_once(&target).await {
                Step::Done(outcome) => return outcome,
                Step::Redirect(next) => target = next,
            }
        }
        warn!(path = %target, "redirect limit reached");
        NavigationOutcome::RedirectLimit(target)
    }

    /// Back/forward: re-resolve the history path without guards or pushes.
    pub async fn pop_state(&mut self) -> NavigationOutcome {
        match self.resolve().await {
            Step::Done(outcome) => outcome,
            Step::Redirect(next) => self.navigate(&next).await,
        }
    }

    /// Re-run the current controller, e.g. after the session changed.
    pub async fn refresh(&mut self) -> NavigationOutcome {
        self.pop_state().await
    }

    /// Intercept clicks on `data-link` elements.
    pub async fn on_click(&mut self, target: &ClickTarget) -> ClickOutcome {
        match (&target.href, target.data_link) {
            (Some(href), true) => ClickOutcome::Intercepted(self.navigate(href).await),
            _ => ClickOutcome::PassThrough,
        }
    }

    async fn navigate_once(&mut self, path: &str) -> Step {
        self.state = RouterState::Navigating;
        let mut target = path.to_owned();
        for guard in &self.guards {
            match guard.check(&target, self.current.as_deref()).await {
                GuardDecision::Allow => {}
                GuardDecision::Deny => {
                    info!(path = %target, "navigation cancelled by guard");
                    self.state = RouterState::Idle;
                    return Step::Done(NavigationOutcome::Cancelled);
                }
                GuardDecision::Redirect(next) => {
                    debug!(from = %target, to = %next, "guard redirect");
                    target = next;
                }
            }
        }
        self.history.push(&target);
        self.resolve().await
    }

    async fn resolve(&mut self) -> Step {
        let path = self.history.current_path();
        self.current = Some(path.clone());
        self.state = RouterState::Rendering;
        let page = self
            .routes
            .get(&path)
            .or_else(|| self.routes.get(NOT_FOUND_PATH))
            .cloned();
        let outcome = match page {
            None => {
                warn!(path = %path, "no route and no not-found controller");
                Step::Done(NavigationOutcome::Rendered(path))
            }
            Some(page) => match page.render(&self.ctx).await {
                Ok(PageOutcome::Rendered) => {
                    debug!(path = %path, "route rendered");
                    Step::Done(NavigationOutcome::Rendered(path))
                }
                Ok(PageOutcome::Redirect(next)) => {
                    debug!(from = %path, to = %next, "controller redirect");
                    Step::Redirect(next)
                }
                Err(error) => {
                    warn!(path = %path, code = ?error.code(), message = error.message(), "route handler error");
                    self.ctx.surface.render(error_panel(error.message()));
                    Step::Done(NavigationOutcome::Failed(path))
                }
            },
        };
        self.state = RouterState::Idle;
        outcome
    }
}
