//! Reqwest-backed adapter for the [`BackendApi`] port.
//!
//! This adapter owns transport details only: URL building, the cookie jar
//! that carries the session, JSON headers, timeouts and status mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::response::{body_preview, classify_response, map_transport_error};
use crate::domain::ports::BackendApi;
use crate::domain::{
    Booking, BookingRequest, Error, LoginCredentials, Membership, MembershipRequest,
    MembershipRequestDraft, MessageResponse, Registration, RequestStatus, RequestStatusUpdate,
    Room, RoomDraft, Subscription, SubscriptionDraft, Training, TrainingDraft, TrainingUpdate,
    User,
};

const JSON: &str = "application/json";

/// Backend adapter issuing JSON requests against one origin.
pub struct ReqwestBackend {
    client: Client,
    base_url: Url,
}

impl ReqwestBackend {
    /// Build an adapter with a cookie store and an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Origin every endpoint path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        endpoint_url(&self.base_url, path)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<Vec<u8>>, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint(path)?;
        debug!(%method, path, "sending backend request");
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|error| {
            warn!(%method, path, %error, "backend request failed");
            map_transport_error(&error)
        })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(&error))?;

        classify_response(status, bytes.to_vec()).inspect_err(|error| {
            warn!(
                %method,
                path,
                status = status.as_u16(),
                body = %body_preview(&bytes),
                %error,
                "backend returned an error status"
            );
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let body = self.send::<()>(Method::GET, path, None).await?;
        decode(path, body)
    }

    async fn post_for<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned + Default,
    {
        match self.send(Method::POST, path, Some(body)).await? {
            Some(bytes) if !bytes.is_empty() => decode(path, Some(bytes)),
            _ => Ok(T::default()),
        }
    }

    async fn mutate<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<(), Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(method, path, body).await.map(|_| ())
    }
}

/// Append `path` to the origin, preserving any path prefix on the origin.
fn endpoint_url(base_url: &Url, path: &str) -> Result<Url, Error> {
    let joined = format!("{}{}", base_url.as_str().trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|error| Error::internal(format!("invalid endpoint {joined}: {error}")))
}

fn decode<T: DeserializeOwned>(path: &str, body: Option<Vec<u8>>) -> Result<T, Error> {
    let Some(bytes) = body else {
        return Err(Error::decode(format!("{path} returned no content")));
    };
    serde_json::from_slice(&bytes)
        .map_err(|error| Error::decode(format!("invalid JSON from {path}: {error}")))
}

#[async_trait]
impl BackendApi for ReqwestBackend {
    async fn register(&self, registration: &Registration) -> Result<MessageResponse, Error> {
        self.post_for("/users/register/", registration).await
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<MessageResponse, Error> {
        self.post_for("/users/login/", credentials).await
    }

    async fn logout(&self) -> Result<(), Error> {
        self.mutate::<()>(Method::POST, "/users/logout", None).await
    }

    async fn current_user(&self) -> Result<User, Error> {
        self.fetch("/users/me/").await
    }

    async fn refresh_token(&self) -> Result<(), Error> {
        self.mutate::<()>(Method::POST, "/users/refresh", None).await
    }

    async fn all_users(&self) -> Result<Vec<User>, Error> {
        self.fetch("/users/all_users/").await
    }

    async fn trainings(&self) -> Result<Vec<Training>, Error> {
        self.fetch("/trainings/").await
    }

    async fn create_training(&self, draft: &TrainingDraft) -> Result<(), Error> {
        self.mutate(Method::POST, "/trainings/", Some(draft)).await
    }

    async fn update_training(
        &self,
        training_id: i64,
        update: &TrainingUpdate,
    ) -> Result<(), Error> {
        let path = format!("/trainings/{training_id}/");
        self.mutate(Method::PATCH, &path, Some(update)).await
    }

    async fn delete_training(&self, training_id: i64) -> Result<(), Error> {
        let path = format!("/trainings/{training_id}/");
        self.mutate::<()>(Method::DELETE, &path, None).await
    }

    async fn my_trainings(&self) -> Result<Vec<Training>, Error> {
        self.fetch("/trainings/my/").await
    }

    async fn create_booking(&self, training_id: i64) -> Result<(), Error> {
        let body = BookingRequest { training_id };
        self.mutate(Method::POST, "/bookings/", Some(&body)).await
    }

    async fn bookings(&self) -> Result<Vec<Booking>, Error> {
        self.fetch("/bookings/").await
    }

    async fn cancel_booking(&self, training_id: i64) -> Result<(), Error> {
        let body = BookingRequest { training_id };
        self.mutate(Method::DELETE, "/bookings/", Some(&body)).await
    }

    async fn rooms(&self) -> Result<Vec<Room>, Error> {
        self.fetch("/rooms/").await
    }

    async fn create_room(&self, draft: &RoomDraft) -> Result<(), Error> {
        self.mutate(Method::POST, "/rooms/", Some(draft)).await
    }

    async fn update_room(&self, room_id: i64, draft: &RoomDraft) -> Result<(), Error> {
        let path = format!("/rooms/{room_id}/");
        self.mutate(Method::PATCH, &path, Some(draft)).await
    }

    async fn delete_room(&self, room_id: i64) -> Result<(), Error> {
        let path = format!("/rooms/{room_id}/");
        self.mutate::<()>(Method::DELETE, &path, None).await
    }

    async fn subscriptions(&self) -> Result<Vec<Subscription>, Error> {
        self.fetch("/subscriptions/").await
    }

    async fn create_subscription(&self, draft: &SubscriptionDraft) -> Result<(), Error> {
        self.mutate(Method::POST, "/subscriptions/", Some(draft)).await
    }

    async fn update_subscription(
        &self,
        subscription_id: i64,
        draft: &SubscriptionDraft,
    ) -> Result<(), Error> {
        let path = format!("/subscriptions/{subscription_id}/");
        self.mutate(Method::PATCH, &path, Some(draft)).await
    }

    async fn delete_subscription(&self, subscription_id: i64) -> Result<(), Error> {
        let path = format!("/subscriptions/{subscription_id}/");
        self.mutate::<()>(Method::DELETE, &path, None).await
    }

    async fn request_membership(&self, subscription_id: i64) -> Result<(), Error> {
        let body = MembershipRequestDraft { subscription_id };
        self.mutate(Method::POST, "/memberships/request/", Some(&body))
            .await
    }

    async fn my_membership(&self) -> Result<Membership, Error> {
        self.fetch("/memberships/my/").await
    }

    async fn membership_requests(&self) -> Result<Vec<MembershipRequest>, Error> {
        self.fetch("/memberships/request/").await
    }

    async fn update_request_status(
        &self,
        request_id: i64,
        status: RequestStatus,
    ) -> Result<(), Error> {
        let path = format!("/memberships/request/{request_id}/");
        let body = RequestStatusUpdate { status };
        self.mutate(Method::PATCH, &path, Some(&body)).await
    }

    async fn all_memberships(&self) -> Result<Vec<Membership>, Error> {
        self.fetch("/memberships/all/").await
    }
}
