//! Navigation guards installed by the application shell.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::SessionStore;
use crate::domain::ports::{Notification, Surface};
use crate::router::{Guard, GuardDecision};

/// Paths reachable without signing in.
pub const PUBLIC_ROUTES: [&str; 5] = ["/", "/login", "/register", "/trainings", "/subscriptions"];

pub const LOGIN_PATH: &str = "/login";

pub fn is_public(path: &str) -> bool {
    PUBLIC_ROUTES.contains(&path)
}

/// Sends guests to the login page for every non-public path.
pub struct AuthGuard {
    session: Arc<SessionStore>,
    surface: Arc<dyn Surface>,
}

impl AuthGuard {
    pub fn new(session: Arc<SessionStore>, surface: Arc<dyn Surface>) -> Self {
        Self { session, surface }
    }
}

#[async_trait]
impl Guard for AuthGuard {
    async fn check(&self, target: &str, _current: Option<&str>) -> GuardDecision {
        if is_public(target) || self.session.is_authenticated() {
            return GuardDecision::Allow;
        }
        debug!(path = target, "guest redirected to login");
        self.surface
            .notify(Notification::warning("Требуется авторизация"));
        GuardDecision::Redirect(LOGIN_PATH.to_owned())
    }
}
