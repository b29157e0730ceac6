//! Training rooms and the payload used to create or edit them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum room title length in characters.
pub const ROOM_TITLE_MIN: usize = 2;
/// Maximum room title length in characters.
pub const ROOM_TITLE_MAX: usize = 30;
/// Largest capacity the admin form accepts.
pub const ROOM_CAPACITY_MAX: u32 = 1000;

/// A room trainings take place in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub capacity: u32,
}

/// Validation errors for [`RoomDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomValidationError {
    #[error("Название помещения должно быть от {min} до {max} символов")]
    TitleLength { min: usize, max: usize },
    #[error("Вместимость должна быть от 1 до {max}")]
    Capacity { max: u32 },
}

/// Body of `POST /rooms/` and `PATCH /rooms/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomDraft {
    title: String,
    capacity: u32,
}

impl RoomDraft {
    /// Validate raw form values.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::RoomDraft;
    ///
    /// let draft = RoomDraft::new(" Зал №1 ", 20).expect("valid room");
    /// assert_eq!(draft.title(), "Зал №1");
    /// assert!(RoomDraft::new("Зал", 0).is_err());
    /// ```
    pub fn new(title: &str, capacity: u32) -> Result<Self, RoomValidationError> {
        let title = title.trim();
        let len = title.chars().count();
        if !(ROOM_TITLE_MIN..=ROOM_TITLE_MAX).contains(&len) {
            return Err(RoomValidationError::TitleLength {
                min: ROOM_TITLE_MIN,
                max: ROOM_TITLE_MAX,
            });
        }
        if capacity == 0 || capacity > ROOM_CAPACITY_MAX {
            return Err(RoomValidationError::Capacity {
                max: ROOM_CAPACITY_MAX,
            });
        }
        Ok(Self {
            title: title.to_owned(),
            capacity,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
