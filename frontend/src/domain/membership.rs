//! Membership requests and granted memberships.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Subscription, User};

/// Lifecycle of a membership request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }

    /// Localised status label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Ожидает",
            Self::Approved => "Одобрена",
            Self::Rejected => "Отклонена",
            Self::Unknown => "Неизвестно",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /memberships/request/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MembershipRequestDraft {
    pub subscription_id: i64,
}

/// Body of `PATCH /memberships/request/{id}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestStatusUpdate {
    pub status: RequestStatus,
}

/// A client's request for a subscription, awaiting admin review.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MembershipRequest {
    pub id: i64,
    pub user: User,
    pub subscription: Subscription,
    pub status: RequestStatus,
    /// Creation timestamp exactly as the backend sent it.
    #[serde(default)]
    pub created_at: String,
}

impl MembershipRequest {
    /// Parsed creation time, `None` when the backend value is malformed.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// Parse the backend's ISO-8601 timestamps, with or without an offset.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok())
}

/// Order requests newest first; malformed timestamps sink to the end.
///
/// The sort is stable, so requests with equal timestamps keep their order.
pub fn sort_newest_first(requests: &mut [MembershipRequest]) {
    requests.sort_by_key(|request| std::cmp::Reverse(request.created_at()));
}

/// Whether a membership is currently valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Expired,
    #[serde(other)]
    Unknown,
}

impl MembershipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        }
    }

    /// Localised label: anything not active reads as expired.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Активен",
            Self::Expired | Self::Unknown => "Истек",
        }
    }
}

/// A granted membership.
///
/// `/memberships/my/` returns ids only while `/memberships/all/` nests the
/// user and subscription, so every reference is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Membership {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub subscription: Option<Subscription>,
    #[serde(default)]
    pub subscription_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "unknown_status")]
    pub status: MembershipStatus,
}

fn unknown_status() -> MembershipStatus {
    MembershipStatus::Unknown
}

impl Membership {
    /// Nested subscription, or the one matching `subscription_id` in
    /// `catalogue`.
    pub fn resolve_subscription<'a>(
        &'a self,
        catalogue: &'a [Subscription],
    ) -> Option<&'a Subscription> {
        self.subscription.as_ref().or_else(|| {
            let id = self.subscription_id?;
            catalogue.iter().find(|subscription| subscription.id == id)
        })
    }
}
