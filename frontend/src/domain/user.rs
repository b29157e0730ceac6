//! Club member identity as returned by `/users/me/` and `/users/all_users/`.
//!
//! The backend is inconsistent about field names: names arrive either as
//! `first_name`/`last_name` or `name`/`surname`, and the role either nested
//! (`role: {name}`) or flat (`role_name`). Both shapes collapse into [`User`]
//! at deserialisation time so nothing downstream needs to care.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Normalised member role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Trainer,
    Admin,
    /// A role name the client does not recognise; kept verbatim for display.
    Other(String),
}

impl Role {
    /// Parse a raw backend role name.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::Role;
    ///
    /// assert_eq!(Role::parse("trainer"), Role::Trainer);
    /// assert_eq!(Role::parse("janitor"), Role::Other("janitor".into()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw {
            "client" => Self::Client,
            "trainer" => Self::Trainer,
            "admin" => Self::Admin,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Wire name of the role, used for CSS modifiers.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Client => "client",
            Self::Trainer => "trainer",
            Self::Admin => "admin",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Localised role label.
    pub fn label(&self) -> &str {
        match self {
            Self::Client => "Клиент",
            Self::Trainer => "Тренер",
            Self::Admin => "Администратор",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A club member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "UserDto")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role: Option<Role>,
}

impl User {
    /// Build a user from already-normalised parts.
    pub fn new(
        id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone_number: None,
            role: Some(role),
        }
    }

    /// `"<first> <last>"` as shown in navigation, tables and cards.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether this member holds `role`.
    pub fn has_role(&self, role: &Role) -> bool {
        self.role.as_ref() == Some(role)
    }

    /// Localised role label, empty when the backend sent no role.
    pub fn role_label(&self) -> &str {
        self.role.as_ref().map_or("", Role::label)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RoleField {
    Nested { name: Option<String> },
    Flat(String),
}

impl RoleField {
    fn into_name(self) -> Option<String> {
        match self {
            Self::Nested { name } => name,
            Self::Flat(name) => Some(name),
        }
    }
}

#[derive(Deserialize)]
struct UserDto {
    id: i64,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    surname: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_role")]
    role: Option<RoleField>,
    #[serde(default)]
    role_name: Option<String>,
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<RoleField>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RoleField>::deserialize(deserializer).unwrap_or(None))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        let role = dto
            .role
            .and_then(RoleField::into_name)
            .and_then(|name| non_empty(Some(name)))
            .or_else(|| non_empty(dto.role_name))
            .map(|name| Role::parse(&name));

        Self {
            id: dto.id,
            first_name: non_empty(dto.first_name)
                .or(dto.name)
                .unwrap_or_default(),
            last_name: non_empty(dto.last_name)
                .or(dto.surname)
                .unwrap_or_default(),
            email: dto.email.unwrap_or_default(),
            phone_number: dto.phone_number,
            role,
        }
    }
}
