//! Fully wired application over in-memory doubles.

use std::sync::Arc;

use chrono::NaiveDate;
use frontend::domain::ports::FormData;
use frontend::domain::{Role, User};
use frontend::outbound::memory::{MemoryHistory, MemorySurface};
use frontend::pages::{PageContext, PagePorts};
use frontend::views::Action;
use frontend::{App, AppEvent, NavigationOutcome};
use pagination::PageSize;

use super::{FixedClock, StubBackend};

pub const PASSWORD: &str = "secret123";

pub fn client() -> User {
    User::new(7, "Иван", "Иванов", "ivan@club.ru", Role::Client)
}

pub fn trainer() -> User {
    User::new(2, "Анна", "Петрова", "anna@club.ru", Role::Trainer)
}

pub fn admin() -> User {
    User::new(1, "Ольга", "Смирнова", "olga@club.ru", Role::Admin)
}

/// Monday, so week and month windows are easy to reason about.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

pub struct Harness {
    pub app: App,
    pub backend: Arc<StubBackend>,
    pub surface: Arc<MemorySurface>,
    pub history: Arc<MemoryHistory>,
}

impl Harness {
    pub fn new(backend: StubBackend) -> Self {
        Self::with_page_size(backend, PageSize::default())
    }

    pub fn with_page_size(backend: StubBackend, page_size: PageSize) -> Self {
        let backend = Arc::new(backend);
        let surface = Arc::new(MemorySurface::new());
        let history = Arc::new(MemoryHistory::new("/"));
        let ctx = PageContext::new(
            PagePorts {
                api: backend.clone(),
                surface: surface.clone(),
                clock: Arc::new(FixedClock::on(today())),
            },
            page_size,
        );
        Self {
            app: App::new(ctx, history.clone()),
            backend,
            surface,
            history,
        }
    }

    /// Start the app and navigate to `path`.
    pub async fn open(&mut self, path: &str) -> NavigationOutcome {
        self.app.start().await;
        self.app.navigate(path).await
    }

    pub async fn invoke(&mut self, action: Action) {
        self.app.dispatch(AppEvent::invoke(action)).await;
    }

    pub async fn invoke_with(&mut self, action: Action, form: FormData) {
        self.app.dispatch(AppEvent::Invoke { action, form }).await;
    }

    pub async fn submit(&mut self, form_id: &str, form: FormData) {
        self.app.dispatch(AppEvent::submit(form_id, form)).await;
    }

    /// Markup of the last render.
    pub fn html(&self) -> String {
        self.surface.last_render().unwrap_or_default()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.surface
            .notifications()
            .into_iter()
            .map(|notification| notification.message)
            .collect()
    }

    pub fn current_path(&self) -> String {
        use frontend::domain::ports::History;
        self.history.current_path()
    }
}
