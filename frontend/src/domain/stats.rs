//! Trainer workload statistics shown on the profile page.

use chrono::Datelike;

use super::Training;

/// Weekday names in Sunday-first order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Воскресенье",
    "Понедельник",
    "Вторник",
    "Среда",
    "Четверг",
    "Пятница",
    "Суббота",
];

/// Trainings and booked clients falling on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayLoad {
    pub name: &'static str,
    pub trainings: usize,
    pub clients: usize,
}

impl WeekdayLoad {
    /// Two-letter axis label.
    pub fn short_name(&self) -> String {
        self.name.chars().take(2).collect()
    }
}

/// Aggregate workload over a trainer's trainings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadStats {
    pub total_trainings: usize,
    pub total_clients: usize,
    pub by_weekday: [WeekdayLoad; 7],
}

impl WorkloadStats {
    /// Aggregate `trainings`, counting clients from each training's bookings.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::{Training, WorkloadStats};
    ///
    /// let trainings: Vec<Training> = serde_json::from_value(serde_json::json!([
    ///     {"id": 1, "title": "Йога", "date": "2026-10-19", "bookings": []}
    /// ])).unwrap();
    /// let stats = WorkloadStats::from_trainings(&trainings);
    /// assert_eq!(stats.by_weekday[1].trainings, 1);
    /// assert_eq!(stats.average_label(), "0.0");
    /// ```
    pub fn from_trainings(trainings: &[Training]) -> Self {
        let mut by_weekday = WEEKDAY_NAMES.map(|name| WeekdayLoad {
            name,
            trainings: 0,
            clients: 0,
        });
        let mut total_clients = 0;
        for training in trainings {
            let clients = training.bookings.len();
            total_clients += clients;
            let slot = &mut by_weekday[training.date.weekday().num_days_from_sunday() as usize];
            slot.trainings += 1;
            slot.clients += clients;
        }
        Self {
            total_trainings: trainings.len(),
            total_clients,
            by_weekday,
        }
    }

    /// Average clients per training to one decimal, `"0"` with no trainings.
    pub fn average_label(&self) -> String {
        if self.total_trainings == 0 {
            return "0".to_owned();
        }
        let average = self.total_clients as f64 / self.total_trainings as f64;
        format!("{average:.1}")
    }

    /// Bar height for the trainings chart, in percent of the busiest day.
    pub fn trainings_percent(&self, day: &WeekdayLoad) -> f64 {
        let max = self.by_weekday.iter().map(|d| d.trainings).max().unwrap_or(0);
        percent(day.trainings, max)
    }

    /// Bar height for the clients chart, in percent of the busiest day.
    pub fn clients_percent(&self, day: &WeekdayLoad) -> f64 {
        let max = self.by_weekday.iter().map(|d| d.clients).max().unwrap_or(0);
        percent(day.clients, max)
    }
}

fn percent(value: usize, max: usize) -> f64 {
    value as f64 / max.max(1) as f64 * 100.0
}
