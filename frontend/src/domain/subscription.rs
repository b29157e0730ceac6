//! Subscription plans sold by the club.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum subscription title length in characters.
pub const SUBSCRIPTION_TITLE_MIN: usize = 2;
/// Maximum subscription title length in characters.
pub const SUBSCRIPTION_TITLE_MAX: usize = 30;

/// A subscription plan.
///
/// Nested copies inside membership requests carry no `id`; it defaults to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub duration_days: i64,
}

/// Validation errors for [`SubscriptionDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionValidationError {
    #[error("Название абонемента должно быть от {min} до {max} символов")]
    TitleLength { min: usize, max: usize },
    #[error("Цена должна быть положительной")]
    Price,
    #[error("Длительность должна быть положительной")]
    Duration,
}

/// Body of `POST /subscriptions/` and `PATCH /subscriptions/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionDraft {
    title: String,
    price: i64,
    duration_days: i64,
}

impl SubscriptionDraft {
    /// Validate raw form values.
    pub fn new(
        title: &str,
        price: i64,
        duration_days: i64,
    ) -> Result<Self, SubscriptionValidationError> {
        let title = title.trim();
        let len = title.chars().count();
        if !(SUBSCRIPTION_TITLE_MIN..=SUBSCRIPTION_TITLE_MAX).contains(&len) {
            return Err(SubscriptionValidationError::TitleLength {
                min: SUBSCRIPTION_TITLE_MIN,
                max: SUBSCRIPTION_TITLE_MAX,
            });
        }
        if price < 1 {
            return Err(SubscriptionValidationError::Price);
        }
        if duration_days < 1 {
            return Err(SubscriptionValidationError::Duration);
        }
        Ok(Self {
            title: title.to_owned(),
            price,
            duration_days,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}
