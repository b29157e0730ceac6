//! Client bookings onto trainings.

use serde::{Deserialize, Serialize};

use super::Training;

/// A client's booking, carrying the booked training.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub training: Training,
}

/// Body of `POST /bookings/` and `DELETE /bookings/`.
///
/// Cancellation carries the training id in the body rather than the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    pub training_id: i64,
}

/// Ids of trainings the client already booked.
pub fn booked_training_ids(bookings: &[Booking]) -> std::collections::HashSet<i64> {
    bookings.iter().map(|booking| booking.training.id).collect()
}
