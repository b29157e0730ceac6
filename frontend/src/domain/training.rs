//! Scheduled trainings and the payloads used to create or edit them.
//!
//! Times travel as `HH:MM:SS` strings and are displayed as `HH:MM`. The
//! create/edit forms collect a `datetime-local` value plus a duration in
//! minutes; [`TrainingSchedule::from_input`] turns that pair into the
//! `date`/`start_time`/`end_time` triple the backend expects.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::{Room, User};

/// Minimum training title length in characters.
pub const TRAINING_TITLE_MIN: usize = 2;
/// Maximum training title length in characters.
pub const TRAINING_TITLE_MAX: usize = 50;
/// Shortest training the schedule form accepts.
pub const MIN_DURATION_MINUTES: i64 = 15;
/// Duration pre-filled in the create form.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A client booked onto a training, as listed in trainer views.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrainingBooking {
    pub id: i64,
    pub user: User,
}

/// A scheduled training session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Training {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub trainer: Option<User>,
    #[serde(default)]
    pub trainer_id: Option<i64>,
    #[serde(default)]
    pub room: Option<Room>,
    #[serde(default)]
    pub room_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub booking_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bookings: Vec<TrainingBooking>,
}

fn hh_mm(time: &str) -> &str {
    time.get(..5).unwrap_or(time)
}

fn minutes_of_day(time: &str) -> Option<i64> {
    let (hours, rest) = time.split_once(':')?;
    let minutes = rest.get(..2).unwrap_or(rest);
    Some(hours.parse::<i64>().ok()? * 60 + minutes.parse::<i64>().ok()?)
}

impl Training {
    /// Room capacity, 0 when the room is unknown.
    pub fn capacity(&self) -> u32 {
        self.room.as_ref().map_or(0, |room| room.capacity)
    }

    /// A training is full once bookings reach capacity; an unknown room
    /// counts as capacity 0 so such trainings are always full.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::Training;
    ///
    /// let training: Training = serde_json::from_value(serde_json::json!({
    ///     "id": 1, "title": "Йога", "date": "2026-10-19",
    ///     "booking_count": 3, "room": {"id": 1, "title": "Зал", "capacity": 3}
    /// })).unwrap();
    /// assert!(training.is_full());
    /// ```
    pub fn is_full(&self) -> bool {
        self.booking_count >= self.capacity()
    }

    /// Start time as `HH:MM`.
    pub fn start_label(&self) -> &str {
        hh_mm(&self.start_time)
    }

    /// End time as `HH:MM`.
    pub fn end_label(&self) -> &str {
        hh_mm(&self.end_time)
    }

    /// `"HH:MM - HH:MM"`.
    pub fn time_range_label(&self) -> String {
        format!("{} - {}", self.start_label(), self.end_label())
    }

    pub fn trainer_name(&self) -> Option<String> {
        self.trainer.as_ref().map(User::full_name)
    }

    /// Non-empty description, if any.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|text| !text.is_empty())
    }

    /// Whether `query` (already lower-cased) occurs in the title or the
    /// trainer's full name.
    pub fn matches_query(&self, query: &str) -> bool {
        if self.title.to_lowercase().contains(query) {
            return true;
        }
        self.trainer_name()
            .is_some_and(|name| name.to_lowercase().contains(query))
    }

    /// Length of the session in minutes, 0 when the times are malformed.
    pub fn duration_minutes(&self) -> i64 {
        match (minutes_of_day(&self.start_time), minutes_of_day(&self.end_time)) {
            (Some(start), Some(end)) => end - start,
            _ => 0,
        }
    }

    /// `datetime-local` value pre-filled in the edit form.
    pub fn schedule_input(&self) -> String {
        format!("{}T{}", self.date.format("%Y-%m-%d"), self.start_label())
    }

    /// Fill in a missing nested room from `rooms` using `room_id`.
    pub fn resolve_room(mut self, rooms: &[Room]) -> Self {
        if self.room.is_none() {
            if let Some(room_id) = self.room_id {
                self.room = rooms.iter().find(|room| room.id == room_id).cloned();
            }
        }
        self
    }

    /// Clients booked onto this training.
    pub fn participants(&self) -> impl Iterator<Item = &User> {
        self.bookings.iter().map(|booking| &booking.user)
    }
}

/// Validation errors for training form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainingValidationError {
    #[error("Название тренировки должно быть от {min} до {max} символов")]
    TitleLength { min: usize, max: usize },
    #[error("Некорректная дата и время: {0}")]
    InvalidDateTime(String),
    #[error("Длительность должна быть не меньше {min} минут")]
    Duration { min: i64 },
    #[error("Выберите тренера")]
    MissingTrainer,
    #[error("Выберите помещение")]
    MissingRoom,
}

/// Date and start/end times derived from the schedule form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingSchedule {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

impl TrainingSchedule {
    /// Parse a `YYYY-MM-DDTHH:MM` value and a duration in minutes.
    ///
    /// The end time wraps past midnight the same way a wall clock does.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::TrainingSchedule;
    ///
    /// let schedule = TrainingSchedule::from_input("2026-10-19T18:30", 90).unwrap();
    /// assert_eq!(schedule.date.to_string(), "2026-10-19");
    /// assert_eq!(schedule.start_time, "18:30:00");
    /// assert_eq!(schedule.end_time, "20:00:00");
    /// ```
    pub fn from_input(
        datetime_local: &str,
        duration_minutes: i64,
    ) -> Result<Self, TrainingValidationError> {
        let raw = datetime_local.trim();
        let start = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .map_err(|_| TrainingValidationError::InvalidDateTime(raw.to_owned()))?;
        if duration_minutes < MIN_DURATION_MINUTES {
            return Err(TrainingValidationError::Duration {
                min: MIN_DURATION_MINUTES,
            });
        }
        let end = start + Duration::minutes(duration_minutes);
        Ok(Self {
            date: start.date(),
            start_time: wall_clock(start.time()),
            end_time: wall_clock(end.time()),
        })
    }
}

fn wall_clock(time: NaiveTime) -> String {
    time.format("%H:%M:00").to_string()
}

fn validated_title(title: &str) -> Result<String, TrainingValidationError> {
    let title = title.trim();
    let len = title.chars().count();
    if !(TRAINING_TITLE_MIN..=TRAINING_TITLE_MAX).contains(&len) {
        return Err(TrainingValidationError::TitleLength {
            min: TRAINING_TITLE_MIN,
            max: TRAINING_TITLE_MAX,
        });
    }
    Ok(title.to_owned())
}

/// Body of `POST /trainings/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingDraft {
    title: String,
    description: String,
    #[serde(flatten)]
    schedule: TrainingSchedule,
    trainer_id: i64,
    room_id: i64,
}

impl TrainingDraft {
    pub fn new(
        title: &str,
        description: &str,
        schedule: TrainingSchedule,
        trainer_id: Option<i64>,
        room_id: Option<i64>,
    ) -> Result<Self, TrainingValidationError> {
        let title = validated_title(title)?;
        let trainer_id = trainer_id.ok_or(TrainingValidationError::MissingTrainer)?;
        let room_id = room_id.ok_or(TrainingValidationError::MissingRoom)?;
        Ok(Self {
            title,
            description: description.trim().to_owned(),
            schedule,
            trainer_id,
            room_id,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}

/// Body of `PATCH /trainings/{id}/`.
///
/// Trainer and room are fixed once a training exists; only the title,
/// description and schedule change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingUpdate {
    title: String,
    description: String,
    #[serde(flatten)]
    schedule: TrainingSchedule,
}

impl TrainingUpdate {
    pub fn new(
        title: &str,
        description: &str,
        schedule: TrainingSchedule,
    ) -> Result<Self, TrainingValidationError> {
        Ok(Self {
            title: validated_title(title)?,
            description: description.trim().to_owned(),
            schedule,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Role;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn training() -> Training {
        serde_json::from_value(json!({
            "id": 7,
            "title": "Утренняя йога",
            "description": "",
            "date": "2026-10-19",
            "start_time": "08:00:00",
            "end_time": "09:30:00",
            "trainer": {"id": 2, "first_name": "Анна", "last_name": "Петрова", "role_name": "trainer"},
            "room_id": 3,
            "booking_count": null
        }))
        .expect("training decodes")
    }

    #[rstest]
    fn labels_trim_seconds(training: Training) {
        assert_eq!(training.time_range_label(), "08:00 - 09:30");
        assert_eq!(training.duration_minutes(), 90);
        assert_eq!(training.schedule_input(), "2026-10-19T08:00");
        assert_eq!(training.description_text(), None);
    }

    #[rstest]
    fn missing_room_counts_as_full(training: Training) {
        assert_eq!(training.booking_count, 0);
        assert_eq!(training.capacity(), 0);
        assert!(training.is_full());
    }

    #[rstest]
    fn resolve_room_fills_reference_from_list(training: Training) {
        let rooms = vec![
            Room { id: 1, title: "Бассейн".into(), capacity: 5 },
            Room { id: 3, title: "Зал йоги".into(), capacity: 12 },
        ];
        let resolved = training.resolve_room(&rooms);
        assert_eq!(resolved.room.as_ref().map(|room| room.title.as_str()), Some("Зал йоги"));
        assert!(!resolved.is_full());
    }

    #[rstest]
    #[case("йога", true)]
    #[case("петрова", true)]
    #[case("анна п", true)]
    #[case("бокс", false)]
    fn query_matches_title_or_trainer(training: Training, #[case] query: &str, #[case] expected: bool) {
        assert_eq!(training.matches_query(query), expected);
    }

    #[rstest]
    fn participants_come_from_bookings() {
        let training: Training = serde_json::from_value(json!({
            "id": 1, "title": "Бокс", "date": "2026-10-20",
            "bookings": [{"id": 9, "user": {"id": 4, "name": "Олег", "surname": "Сидоров", "email": "o@club.ru"}}]
        }))
        .expect("decodes");
        let names: Vec<String> = training.participants().map(User::full_name).collect();
        assert_eq!(names, vec!["Олег Сидоров".to_owned()]);
        assert!(training.participants().all(|user| !user.has_role(&Role::Admin)));
    }

    #[rstest]
    #[case("2026-10-19T23:30", 60, "2026-10-19", "23:30:00", "00:30:00")]
    #[case("2026-10-19T07:05:00", 15, "2026-10-19", "07:05:00", "07:20:00")]
    fn schedule_from_input(
        #[case] input: &str,
        #[case] duration: i64,
        #[case] date: &str,
        #[case] start: &str,
        #[case] end: &str,
    ) {
        let schedule = TrainingSchedule::from_input(input, duration).expect("valid schedule");
        assert_eq!(schedule.date.to_string(), date);
        assert_eq!(schedule.start_time, start);
        assert_eq!(schedule.end_time, end);
    }

    #[rstest]
    #[case("19.10.2026 18:00", 60)]
    #[case("2026-10-19T18:00", 10)]
    fn schedule_rejects_bad_input(#[case] input: &str, #[case] duration: i64) {
        assert!(TrainingSchedule::from_input(input, duration).is_err());
    }

    #[rstest]
    fn draft_flattens_schedule_into_body() {
        let schedule = TrainingSchedule::from_input("2026-10-19T18:00", 60).expect("schedule");
        let draft =
            TrainingDraft::new("Кроссфит", "", schedule, Some(2), Some(3)).expect("valid draft");
        assert_eq!(
            serde_json::to_value(&draft).expect("serialises"),
            json!({
                "title": "Кроссфит",
                "description": "",
                "date": "2026-10-19",
                "start_time": "18:00:00",
                "end_time": "19:00:00",
                "trainer_id": 2,
                "room_id": 3,
            })
        );
    }

    #[rstest]
    fn draft_requires_trainer_and_room() {
        let schedule = TrainingSchedule::from_input("2026-10-19T18:00", 60).expect("schedule");
        assert_eq!(
            TrainingDraft::new("Кроссфит", "", schedule.clone(), None, Some(3)),
            Err(TrainingValidationError::MissingTrainer)
        );
        assert_eq!(
            TrainingDraft::new("Кроссфит", "", schedule, Some(2), None),
            Err(TrainingValidationError::MissingRoom)
        );
    }
}
