//! Client-side filtering of the trainings list.
//!
//! Filters run over the snapshot already loaded into memory. Date windows
//! are computed against the caller's notion of "today" so tests can pin it.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

use super::Training;

/// Unknown filter value received from a form control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter value: {0}")]
pub struct FilterParseError(pub String);

/// Which dates to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFilter {
    #[default]
    All,
    /// Only trainings dated today.
    Today,
    /// Today through seven days from now, inclusive.
    Week,
    /// Today through the last day of the current month, inclusive.
    Month,
}

impl DateFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Whether `date` falls inside the window anchored at `today`.
    pub fn admits(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Today => date == today,
            Self::Week => date >= today && date <= today + Duration::days(7),
            Self::Month => date >= today && date <= end_of_month(today),
        }
    }
}

impl FromStr for DateFilter {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "" | "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(FilterParseError(other.to_owned())),
        }
    }
}

fn end_of_month(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(day)
}

/// Which occupancy states to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AvailabilityFilter {
    #[default]
    All,
    /// Trainings with at least one free place.
    Available,
    /// Trainings where `booking_count >= capacity`.
    Full,
}

impl AvailabilityFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Available => "available",
            Self::Full => "full",
        }
    }

    pub fn admits(self, training: &Training) -> bool {
        match self {
            Self::All => true,
            Self::Available => !training.is_full(),
            Self::Full => training.is_full(),
        }
    }
}

impl FromStr for AvailabilityFilter {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "" | "all" => Ok(Self::All),
            "available" => Ok(Self::Available),
            "full" => Ok(Self::Full),
            other => Err(FilterParseError(other.to_owned())),
        }
    }
}

/// Combined trainings filter as shown in the filter bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingFilter {
    /// Free-text query matched against title and trainer name.
    pub query: String,
    pub date: DateFilter,
    pub availability: AvailabilityFilter,
}

impl TrainingFilter {
    /// Whether every criterion is at its default.
    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the filter, keeping the input order.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use frontend::domain::{DateFilter, Training, TrainingFilter};
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    /// let trainings: Vec<Training> = serde_json::from_value(serde_json::json!([
    ///     {"id": 1, "title": "Йога", "date": "2026-10-19"},
    ///     {"id": 2, "title": "Бокс", "date": "2026-10-20"}
    /// ])).unwrap();
    /// let filter = TrainingFilter { date: DateFilter::Today, ..TrainingFilter::default() };
    /// let kept = filter.apply(&trainings, today);
    /// assert_eq!(kept.len(), 1);
    /// assert_eq!(kept[0].id, 1);
    /// ```
    pub fn apply(&self, trainings: &[Training], today: NaiveDate) -> Vec<Training> {
        let query = self.query.trim().to_lowercase();
        trainings
            .iter()
            .filter(|training| query.is_empty() || training.matches_query(&query))
            .filter(|training| self.date.admits(training.date, today))
            .filter(|training| self.availability.admits(training))
            .cloned()
            .collect()
    }
}
