//! Authentication payloads and outcomes.
//!
//! Credentials are validated before they reach the backend port. Passwords
//! are held in zeroising buffers and only exposed as `&str` while a request
//! body is being serialised.

use std::sync::OnceLock;

use regex::Regex;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use zeroize::Zeroizing;

/// Message shown when the password confirmation does not match.
pub const PASSWORD_MISMATCH: &str = "Пароли не совпадают";

/// Domain error returned when auth form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthValidationError {
    /// Email was missing or blank once trimmed.
    #[error("Введите email")]
    EmptyEmail,
    /// Email did not look like `local@domain.tld`.
    #[error("Некорректный email")]
    InvalidEmail,
    /// Password was blank.
    #[error("Введите пароль")]
    EmptyPassword,
    /// Password and confirmation differ.
    #[error("Пароли не совпадают")]
    PasswordMismatch,
    /// First or last name was blank.
    #[error("Введите имя и фамилию")]
    EmptyName,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Loose email shape check used before submitting auth forms.
///
/// # Examples
/// ```
/// use frontend::domain::is_valid_email;
///
/// assert!(is_valid_email("anna@club.ru"));
/// assert!(!is_valid_email("anna@club"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn normalise_email(email: &str) -> Result<String, AuthValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(AuthValidationError::EmptyEmail);
    }
    if !is_valid_email(trimmed) {
        return Err(AuthValidationError::InvalidEmail);
    }
    Ok(trimmed.to_owned())
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and matches the email shape.
/// - `password` is non-empty and keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = normalise_email(email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl Serialize for LoginCredentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LoginCredentials", 2)?;
        state.serialize_field("email", self.email())?;
        state.serialize_field("password", self.password())?;
        state.end()
    }
}

/// Validated registration form.
///
/// ## Invariants
/// - `password` equals the confirmation it was built from.
/// - names are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: String,
    password: Zeroizing<String>,
    first_name: String,
    last_name: String,
    phone_number: Option<String>,
}

/// Raw registration form fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationForm<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone_number: Option<&'a str>,
}

impl Registration {
    /// Validate a registration form.
    ///
    /// The password confirmation is checked first so the user sees the
    /// mismatch before any other complaint.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::{AuthValidationError, Registration, RegistrationForm};
    ///
    /// let form = RegistrationForm {
    ///     email: "ivan@club.ru",
    ///     password: "secret",
    ///     confirm_password: "other",
    ///     first_name: "Иван",
    ///     last_name: "Иванов",
    ///     phone_number: None,
    /// };
    /// assert_eq!(
    ///     Registration::try_from_form(form),
    ///     Err(AuthValidationError::PasswordMismatch)
    /// );
    /// ```
    pub fn try_from_form(form: RegistrationForm<'_>) -> Result<Self, AuthValidationError> {
        if form.password != form.confirm_password {
            return Err(AuthValidationError::PasswordMismatch);
        }
        if form.password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        let email = normalise_email(form.email)?;
        let first_name = form.first_name.trim();
        let last_name = form.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(AuthValidationError::EmptyName);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(form.password.to_owned()),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            phone_number: form
                .phone_number
                .map(str::trim)
                .filter(|phone| !phone.is_empty())
                .map(str::to_owned),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }
}

impl Serialize for Registration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Registration", 6)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("password", self.password.as_str())?;
        state.serialize_field("confirm_password", self.password.as_str())?;
        state.serialize_field("first_name", &self.first_name)?;
        state.serialize_field("last_name", &self.last_name)?;
        state.serialize_field("phone_number", &self.phone_number)?;
        state.end()
    }
}

/// Acknowledgement body returned by mutation endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a session operation, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl AuthOutcome {
    pub fn succeeded(message: Option<String>) -> Self {
        Self {
            success: true,
            message,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}
