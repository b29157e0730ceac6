//! Page controllers.
//!
//! One controller per route. A controller reads the session, optionally
//! redirects on role, shows the loading placeholder, fetches through the
//! [`BackendApi`] port and replaces the content region through the
//! [`Surface`] port. Load failures become error toasts; the placeholder stays
//! in place.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use pagination::PageSize;
use tracing::warn;

use crate::domain::ports::{BackendApi, Notification, Surface};
use crate::domain::{Error, Role, SessionStore, User};
use crate::views::loading_page;

pub mod admin;
pub mod bookings;
pub mod profile;
pub mod public;
pub mod state;
pub mod subscriptions;
pub mod trainer;
pub mod trainings;

pub use self::admin::AdminPage;
pub use self::bookings::MyBookingsPage;
pub use self::profile::ProfilePage;
pub use self::public::{HomePage, LoginPage, NotFoundPage, RegisterPage};
pub use self::state::{AdminPages, AdminSnapshot, ViewState, ViewStore};
pub use self::subscriptions::SubscriptionsPage;
pub use self::trainer::MyTrainingsPage;
pub use self::trainings::TrainingsPage;

/// Parameter object bundling the ports page controllers depend on.
#[derive(Clone)]
pub struct PagePorts {
    pub api: Arc<dyn BackendApi>,
    pub surface: Arc<dyn Surface>,
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle shared by every controller, action and the router.
#[derive(Clone)]
pub struct PageContext {
    pub api: Arc<dyn BackendApi>,
    pub surface: Arc<dyn Surface>,
    pub clock: Arc<dyn Clock>,
    pub session: Arc<SessionStore>,
    pub view: Arc<ViewStore>,
    pub page_size: PageSize,
}

impl PageContext {
    /// Build a context with a fresh session and empty view state.
    pub fn new(ports: PagePorts, page_size: PageSize) -> Self {
        let session = Arc::new(SessionStore::new(Arc::clone(&ports.api)));
        Self {
            api: ports.api,
            surface: ports.surface,
            clock: ports.clock,
            session,
            view: Arc::new(ViewStore::new()),
            page_size,
        }
    }

    /// Current local date; filters ignore the time of day.
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    pub fn user(&self) -> Option<User> {
        self.session.current_user()
    }

    /// Replace the content region with the loading placeholder.
    pub fn show_loader(&self, user: Option<&User>) {
        self.surface.render(loading_page(user));
    }

    /// Toast a failed load as `"<prefix>: <message>"`.
    pub fn report(&self, prefix: &str, error: &Error) {
        warn!(code = ?error.code(), message = error.message(), "{prefix}");
        self.surface
            .notify(Notification::error(format!("{prefix}: {}", error.message())));
    }
}

/// What a controller did with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Rendered,
    /// The controller refused the route; navigate here instead.
    Redirect(String),
}

impl PageOutcome {
    pub fn redirect(path: impl Into<String>) -> Self {
        Self::Redirect(path.into())
    }
}

/// A routable page controller.
#[async_trait]
pub trait Page: Send + Sync {
    async fn render(&self, ctx: &PageContext) -> Result<PageOutcome, Error>;
}

/// Signed-in user holding `role`, if any.
fn user_with_role(ctx: &PageContext, role: &Role) -> Option<User> {
    ctx.user().filter(|user| user.has_role(role))
}
