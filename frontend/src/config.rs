//! Client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::PageSize;
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_INITIAL_PATH: &str = "/";

/// Configuration values for talking to the club backend and rendering pages.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SPORTCLUB")]
pub struct ClientSettings {
    /// Backend origin every endpoint path is resolved against.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_secs: u64,
    /// Rows per page in admin tables.
    pub page_size: Option<usize>,
    /// Route rendered when no path is given.
    pub initial_path: Option<String>,
}

impl ClientSettings {
    /// Configured backend origin, falling back to the local dev server.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
    }

    /// Request timeout; zero falls back to the default.
    pub fn request_timeout(&self) -> Duration {
        let secs = match self.request_timeout_secs {
            0 => DEFAULT_TIMEOUT_SECS,
            secs => secs,
        };
        Duration::from_secs(secs)
    }

    /// Admin page size; zero falls back to the default.
    pub fn page_size(&self) -> PageSize {
        self.page_size
            .and_then(|size| PageSize::new(size).ok())
            .unwrap_or_default()
    }

    pub fn initial_path(&self) -> &str {
        self.initial_path.as_deref().unwrap_or(DEFAULT_INITIAL_PATH)
    }
}
