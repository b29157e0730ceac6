//! Domain primitives, the session store and the ports they depend on.
//!
//! Purpose: give the JSON shapes returned by the club backend strong types at
//! the data-access boundary and keep the client-side rules (filters, role
//! checks, workload statistics) next to them.
//!
//! Public surface:
//! - Error / ErrorCode: failure reported by any port.
//! - User / Role: club member with a normalised role.
//! - Training, Booking, Subscription, Membership, MembershipRequest, Room:
//!   backend entities, plus typed drafts for every mutation body.
//! - TrainingFilter: in-memory trainings filter.
//! - WorkloadStats: trainer statistics.
//! - SessionStore: cached current user with change listeners.

pub mod auth;
pub mod booking;
pub mod error;
pub mod filters;
pub mod membership;
pub mod ports;
pub mod room;
pub mod session;
pub mod stats;
pub mod subscription;
pub mod training;
pub mod user;
pub mod validation;

pub use self::auth::{
    AuthOutcome, AuthValidationError, LoginCredentials, MessageResponse, PASSWORD_MISMATCH,
    Registration, RegistrationForm, is_valid_email,
};
pub use self::booking::{Booking, BookingRequest, booked_training_ids};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::filters::{AvailabilityFilter, DateFilter, FilterParseError, TrainingFilter};
pub use self::membership::{
    Membership, MembershipRequest, MembershipRequestDraft, MembershipStatus, RequestStatus,
    RequestStatusUpdate, parse_timestamp, sort_newest_first,
};
pub use self::room::{Room, RoomDraft, RoomValidationError};
pub use self::session::{ListenerHandle, SessionListener, SessionStore};
pub use self::stats::{WEEKDAY_NAMES, WeekdayLoad, WorkloadStats};
pub use self::subscription::{Subscription, SubscriptionDraft, SubscriptionValidationError};
pub use self::training::{
    DEFAULT_DURATION_MINUTES, Training, TrainingBooking, TrainingDraft, TrainingSchedule,
    TrainingUpdate, TrainingValidationError,
};
pub use self::user::{Role, User};
pub use self::validation::{FieldViolation, LocSegment, join_violations};

/// Result alias used by every port.
pub type ApiResult<T> = Result<T, Error>;
