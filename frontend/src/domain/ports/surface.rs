//! Port for the document the client renders into.
//!
//! A surface owns the content region, transient toasts, modal dialogs and
//! inline form errors. Pages only ever replace the whole content region.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use maud::Markup;

/// How long a toast stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

/// Toast severity, mapped to a CSS modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            ttl: NOTIFICATION_TTL,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }
}

/// Submitted form fields, keyed by input name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Field value, empty when the field was not submitted.
    pub fn text(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }

    /// Trimmed field value parsed as `T`, `None` when missing or malformed.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::ports::FormData;
    ///
    /// let form = FormData::new().with("capacity", " 20 ").with("room_id", "");
    /// assert_eq!(form.parse::<u32>("capacity"), Some(20));
    /// assert_eq!(form.parse::<i64>("room_id"), None);
    /// ```
    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.text(name).trim().parse().ok()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// A modal footer button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalButton {
    pub label: String,
    /// Value reported back in [`ModalResponse::action`].
    pub action: String,
    /// CSS modifier, such as `primary` or `danger`.
    pub style: String,
}

impl ModalButton {
    pub fn new(label: impl Into<String>, action: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
            style: style.into(),
        }
    }
}

/// A modal dialog request.
#[derive(Debug, Clone)]
pub struct Modal {
    pub title: String,
    pub body: Markup,
    pub buttons: Vec<ModalButton>,
}

/// How the user closed a modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalResponse {
    /// The clicked button's action.
    pub action: String,
    /// Values of any form inside the modal body.
    pub form: FormData,
}

impl ModalResponse {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            form: FormData::default(),
        }
    }

    #[must_use]
    pub fn with_form(mut self, form: FormData) -> Self {
        self.form = form;
        self
    }
}

/// The document the client renders into.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Surface: Send + Sync {
    /// Replace the whole content region.
    fn render(&self, markup: Markup);

    /// Show a transient toast.
    fn notify(&self, notification: Notification);

    /// Show `message` above the fields of form `form_id`.
    fn show_form_error(&self, form_id: &str, message: &str);

    /// Remove any inline error from form `form_id`.
    fn clear_form_error(&self, form_id: &str);

    /// Show a modal and wait for it to close; `None` when dismissed.
    async fn show_modal(&self, modal: Modal) -> Option<ModalResponse>;
}
