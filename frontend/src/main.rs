//! Render one SportClub route against a live backend and print the markup.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use frontend::domain::ports::{FormData, History};
use frontend::outbound::http::ReqwestBackend;
use frontend::outbound::memory::{MemoryHistory, MemorySurface};
use frontend::pages::{PageContext, PagePorts};
use frontend::views::LOGIN_FORM;
use frontend::{App, AppEvent, ClientSettings};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `sportclub-render` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sportclub-render",
    about = "Render a SportClub page headlessly and print its markup",
    version
)]
struct CliArgs {
    /// Route to render. Defaults to the configured initial path.
    #[arg(value_name = "path")]
    path: Option<String>,
    /// Log in with this email before rendering.
    #[arg(long, value_name = "email", requires = "password")]
    email: Option<String>,
    /// Password for `--email`.
    #[arg(long, value_name = "password", requires = "email")]
    password: Option<String>,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = ClientSettings::load_from_iter([OsString::from("sportclub-render")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let base_url = settings
        .base_url()
        .map_err(|error| io::Error::other(format!("invalid base url: {error}")))?;
    let backend = ReqwestBackend::new(base_url, settings.request_timeout())
        .map_err(|error| io::Error::other(format!("create http client: {error}")))?;

    let surface = Arc::new(MemorySurface::new());
    let history = Arc::new(MemoryHistory::default());
    let ctx = PageContext::new(
        PagePorts {
            api: Arc::new(backend),
            surface: surface.clone(),
            clock: Arc::new(DefaultClock),
        },
        settings.page_size(),
    );
    let mut app = App::new(ctx, history.clone());
    let started = app.start().await;
    info!(outcome = ?started, "initial route resolved");

    if let (Some(email), Some(password)) = (args.email, args.password) {
        let form = FormData::new()
            .with("email", email)
            .with("password", password);
        app.dispatch(AppEvent::submit(LOGIN_FORM, form)).await;
        if let Some(error) = surface.form_error(LOGIN_FORM) {
            warn!(%error, "login failed; rendering as guest");
        }
    }

    let target = args
        .path
        .unwrap_or_else(|| settings.initial_path().to_owned());
    match app.router().current_route() {
        Some(current) if current == target => {}
        _ => app.dispatch(AppEvent::Navigate(target)).await,
    }
    info!(path = %history.current_path(), "rendered");

    for notification in surface.notifications() {
        info!(kind = %notification.kind, message = %notification.message, "toast");
    }

    let markup = surface.last_render().unwrap_or_default();
    let mut stdout = io::stdout().lock();
    stdout.write_all(markup.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()
}
