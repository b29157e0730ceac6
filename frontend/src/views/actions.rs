//! UI actions embedded in rendered markup.
//!
//! Templates never call into the application directly. Each clickable element
//! carries an [`Action`], rendered as an inline handler expression such as
//! `handleBookTraining(3)`. The shell parses the expression back and
//! dispatches it, so the markup stays a plain string.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Admin page section with its own pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminSection {
    Users,
    Requests,
    Memberships,
    Rooms,
}

impl AdminSection {
    pub const ALL: [Self; 4] = [Self::Users, Self::Requests, Self::Memberships, Self::Rooms];

    const fn handler_name(self) -> &'static str {
        match self {
            Self::Users => "handleUsersPageChange",
            Self::Requests => "handleRequestsPageChange",
            Self::Memberships => "handleMembershipsPageChange",
            Self::Rooms => "handleRoomsPageChange",
        }
    }

    fn from_handler_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.handler_name() == name)
    }
}

/// Something the user can trigger from rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    Logout,
    BookTraining(i64),
    CancelBooking(i64),
    CreateTraining,
    EditTraining(i64),
    DeleteTraining(i64),
    CreateSubscription,
    EditSubscription(i64),
    DeleteSubscription(i64),
    BuySubscription(i64),
    ApproveRequest(i64),
    RejectRequest(i64),
    ToggleRequest(i64),
    ChangePage(AdminSection, usize),
    AddRoom,
    EditRoom(i64),
    DeleteRoom(i64),
    /// Search box input; the shell debounces it before filtering.
    SearchTrainings,
    FilterTrainings,
    ResetFilters,
}

impl Action {
    /// Inline handler expression for an `onclick` attribute.
    ///
    /// # Examples
    /// ```
    /// use frontend::views::actions::{Action, AdminSection};
    ///
    /// assert_eq!(Action::BookTraining(3).handler(), "handleBookTraining(3)");
    /// assert_eq!(
    ///     Action::ChangePage(AdminSection::Rooms, 2).handler(),
    ///     "handleRoomsPageChange(2)"
    /// );
    /// assert_eq!(Action::Navigate("/".into()).handler(), "router.navigate('/')");
    /// ```
    pub fn handler(&self) -> String {
        match self {
            Self::Navigate(path) => format!("router.navigate('{path}')"),
            Self::Logout => "handleLogout()".to_owned(),
            Self::BookTraining(id) => format!("handleBookTraining({id})"),
            Self::CancelBooking(id) => format!("handleCancelBooking({id})"),
            Self::CreateTraining => "showCreateTrainingModal()".to_owned(),
            Self::EditTraining(id) => format!("showEditTrainingModal({id})"),
            Self::DeleteTraining(id) => format!("handleDeleteTraining({id})"),
            Self::CreateSubscription => "showCreateSubscriptionModal()".to_owned(),
            Self::EditSubscription(id) => format!("showEditSubscriptionModal({id})"),
            Self::DeleteSubscription(id) => format!("handleDeleteSubscription({id})"),
            Self::BuySubscription(id) => format!("handleBuySubscription({id})"),
            Self::ApproveRequest(id) => format!("handleApproveRequest({id})"),
            Self::RejectRequest(id) => format!("handleRejectRequest({id})"),
            Self::ToggleRequest(id) => format!("handleToggleRequest({id})"),
            Self::ChangePage(section, page) => format!("{}({page})", section.handler_name()),
            Self::AddRoom => "handleShowAddRoomModal()".to_owned(),
            Self::EditRoom(id) => format!("handleEditRoom({id})"),
            Self::DeleteRoom(id) => format!("handleDeleteRoom({id})"),
            Self::SearchTrainings => "handleTrainingSearch()".to_owned(),
            Self::FilterTrainings => "handleTrainingFilter()".to_owned(),
            Self::ResetFilters => "resetTrainingFilters()".to_owned(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.handler())
    }
}

/// Handler expression that does not name a known action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised action handler: {0}")]
pub struct ActionParseError(pub String);

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let fail = || ActionParseError(raw.to_owned());
        let trimmed = raw.trim().trim_end_matches(';');
        let (name, rest) = trimmed.split_once('(').ok_or_else(fail)?;
        let arg = rest.strip_suffix(')').ok_or_else(fail)?.trim();
        let id = || arg.parse::<i64>().map_err(|_| fail());

        let action = match name.trim() {
            "router.navigate" => {
                let path = arg
                    .strip_prefix('\'')
                    .and_then(|inner| inner.strip_suffix('\''))
                    .ok_or_else(fail)?;
                Self::Navigate(path.to_owned())
            }
            "handleLogout" => Self::Logout,
            "handleBookTraining" => Self::BookTraining(id()?),
            "handleCancelBooking" => Self::CancelBooking(id()?),
            "showCreateTrainingModal" => Self::CreateTraining,
            "showEditTrainingModal" => Self::EditTraining(id()?),
            "handleDeleteTraining" => Self::DeleteTraining(id()?),
            "showCreateSubscriptionModal" => Self::CreateSubscription,
            "showEditSubscriptionModal" => Self::EditSubscription(id()?),
            "handleDeleteSubscription" => Self::DeleteSubscription(id()?),
            "handleBuySubscription" => Self::BuySubscription(id()?),
            "handleApproveRequest" => Self::ApproveRequest(id()?),
            "handleRejectRequest" => Self::RejectRequest(id()?),
            "handleToggleRequest" => Self::ToggleRequest(id()?),
            "handleShowAddRoomModal" => Self::AddRoom,
            "handleEditRoom" => Self::EditRoom(id()?),
            "handleDeleteRoom" => Self::DeleteRoom(id()?),
            "handleTrainingSearch" => Self::SearchTrainings,
            "handleTrainingFilter" => Self::FilterTrainings,
            "resetTrainingFilters" => Self::ResetFilters,
            other => {
                let section = AdminSection::from_handler_name(other).ok_or_else(fail)?;
                let page = arg.parse::<usize>().map_err(|_| fail())?;
                Self::ChangePage(section, page)
            }
        };
        Ok(action)
    }
}

/// Visual style of a button, mapped to `btn-<style>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Danger,
    Success,
}

impl ButtonStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Danger => "danger",
            Self::Success => "success",
        }
    }

    /// Full class list for a button.
    pub fn class(self) -> String {
        format!("btn btn-{}", self.as_str())
    }
}

/// A button rendered in a card's action row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub label: String,
    pub style: ButtonStyle,
    pub action: Action,
    pub disabled: bool,
    /// Disable the button when the training it belongs to is full.
    pub disabled_when_full: bool,
}

impl ActionButton {
    pub fn new(label: impl Into<String>, style: ButtonStyle, action: Action) -> Self {
        Self {
            label: label.into(),
            style,
            action,
            disabled: false,
            disabled_when_full: false,
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn disabled_when_full(mut self) -> Self {
        self.disabled_when_full = true;
        self
    }

    /// Whether the button renders disabled for a card with `is_full`.
    pub fn is_disabled(&self, is_full: bool) -> bool {
        self.disabled || (self.disabled_when_full && is_full)
    }
}
