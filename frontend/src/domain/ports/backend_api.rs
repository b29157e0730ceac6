//! Driven port for the club's REST backend.
//!
//! Pages and the session store talk to the backend only through this trait.
//! Production wires the reqwest adapter; unit tests use the generated
//! `MockBackendApi` and integration tests a hand-written in-memory double.

use async_trait::async_trait;

use crate::domain::{
    Booking, Error, LoginCredentials, Membership, MembershipRequest, MessageResponse,
    Registration, RequestStatus, Room, RoomDraft, Subscription, SubscriptionDraft, Training,
    TrainingDraft, TrainingUpdate, User,
};

/// Every backend endpoint the client calls.
///
/// Mutations return `()` because callers always re-fetch afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `POST /users/register/`.
    async fn register(&self, registration: &Registration) -> Result<MessageResponse, Error>;

    /// `POST /users/login/`; the session cookie lands in the cookie store.
    async fn login(&self, credentials: &LoginCredentials) -> Result<MessageResponse, Error>;

    /// `POST /users/logout`.
    async fn logout(&self) -> Result<(), Error>;

    /// `GET /users/me/`.
    async fn current_user(&self) -> Result<User, Error>;

    /// `POST /users/refresh`.
    async fn refresh_token(&self) -> Result<(), Error>;

    /// `GET /users/all_users/` (admin only).
    async fn all_users(&self) -> Result<Vec<User>, Error>;

    /// `GET /trainings/`.
    async fn trainings(&self) -> Result<Vec<Training>, Error>;

    /// `POST /trainings/`.
    async fn create_training(&self, draft: &TrainingDraft) -> Result<(), Error>;

    /// `PATCH /trainings/{id}/`.
    async fn update_training(&self, training_id: i64, update: &TrainingUpdate)
    -> Result<(), Error>;

    /// `DELETE /trainings/{id}/`.
    async fn delete_training(&self, training_id: i64) -> Result<(), Error>;

    /// `GET /trainings/my/`: the trainer's own trainings with bookings.
    async fn my_trainings(&self) -> Result<Vec<Training>, Error>;

    /// `POST /bookings/`.
    async fn create_booking(&self, training_id: i64) -> Result<(), Error>;

    /// `GET /bookings/`: the client's bookings.
    async fn bookings(&self) -> Result<Vec<Booking>, Error>;

    /// `DELETE /bookings/` with the training id in the body.
    async fn cancel_booking(&self, training_id: i64) -> Result<(), Error>;

    /// `GET /rooms/`.
    async fn rooms(&self) -> Result<Vec<Room>, Error>;

    /// `POST /rooms/`.
    async fn create_room(&self, draft: &RoomDraft) -> Result<(), Error>;

    /// `PATCH /rooms/{id}/`.
    async fn update_room(&self, room_id: i64, draft: &RoomDraft) -> Result<(), Error>;

    /// `DELETE /rooms/{id}/`.
    async fn delete_room(&self, room_id: i64) -> Result<(), Error>;

    /// `GET /subscriptions/`.
    async fn subscriptions(&self) -> Result<Vec<Subscription>, Error>;

    /// `POST /subscriptions/`.
    async fn create_subscription(&self, draft: &SubscriptionDraft) -> Result<(), Error>;

    /// `PATCH /subscriptions/{id}/`.
    async fn update_subscription(
        &self,
        subscription_id: i64,
        draft: &SubscriptionDraft,
    ) -> Result<(), Error>;

    /// `DELETE /subscriptions/{id}/`.
    async fn delete_subscription(&self, subscription_id: i64) -> Result<(), Error>;

    /// `POST /memberships/request/`.
    async fn request_membership(&self, subscription_id: i64) -> Result<(), Error>;

    /// `GET /memberships/my/`; fails when the client has no membership.
    async fn my_membership(&self) -> Result<Membership, Error>;

    /// `GET /memberships/request/` (admin only).
    async fn membership_requests(&self) -> Result<Vec<MembershipRequest>, Error>;

    /// `PATCH /memberships/request/{id}/` with `{status}`.
    async fn update_request_status(
        &self,
        request_id: i64,
        status: RequestStatus,
    ) -> Result<(), Error>;

    /// `GET /memberships/all/` (admin only).
    async fn all_memberships(&self) -> Result<Vec<Membership>, Error>;
}
