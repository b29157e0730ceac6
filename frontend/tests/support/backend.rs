//! In-memory [`BackendApi`] double.
//!
//! Keeps just enough state to behave like the club backend for one signed-in
//! user: accounts, a catalogue, bookings and membership requests. Every call
//! is recorded by name; names listed via [`StubBackend::fail`] return a
//! service error instead.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use frontend::domain::ports::BackendApi;
use frontend::domain::{
    Booking, Error, ErrorCode, LoginCredentials, Membership, MembershipRequest, MessageResponse,
    Registration, RequestStatus, Room, RoomDraft, Subscription, SubscriptionDraft, Training,
    TrainingDraft, TrainingUpdate, User,
};
use serde_json::{Value, json};

#[derive(Default)]
struct State {
    accounts: Vec<(User, String)>,
    signed_in: Option<User>,
    trainings: Vec<Training>,
    rooms: Vec<Room>,
    subscriptions: Vec<Subscription>,
    bookings: Vec<Booking>,
    requests: Vec<MembershipRequest>,
    memberships: Vec<Membership>,
    failing: HashSet<String>,
    calls: Vec<String>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }
}

#[derive(Default)]
pub struct StubBackend {
    state: Mutex<State>,
}

fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("fixture json matches the entity")
}

fn merged(body: Value, extra: Value) -> Value {
    let mut body = body;
    if let (Some(target), Some(source)) = (body.as_object_mut(), extra.as_object()) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
    body
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("stub state lock")
    }

    /// Record `call` and fail it when scripted to.
    fn enter(&self, call: &str) -> Result<MutexGuard<'_, State>, Error> {
        let mut state = self.state();
        state.calls.push(call.to_owned());
        if state.failing.contains(call) {
            return Err(Error::new(ErrorCode::ServiceError, format!("{call} failed")));
        }
        Ok(state)
    }

    pub fn with_account(self, user: User, password: &str) -> Self {
        self.state().accounts.push((user, password.to_owned()));
        self
    }

    /// Start with `user` already signed in.
    pub fn signed_in(self, user: User) -> Self {
        self.state().signed_in = Some(user);
        self
    }

    pub fn with_room(self, id: i64, title: &str, capacity: u32) -> Self {
        self.state()
            .rooms
            .push(from_json(json!({"id": id, "title": title, "capacity": capacity})));
        self
    }

    /// Add a training from backend-shaped JSON.
    pub fn with_training(self, training: Value) -> Self {
        self.state().trainings.push(from_json(training));
        self
    }

    pub fn with_subscription(self, id: i64, title: &str, price: i64, days: i64) -> Self {
        self.state().subscriptions.push(from_json(json!({
            "id": id, "title": title, "price": price, "duration_days": days
        })));
        self
    }

    pub fn with_request(self, request: Value) -> Self {
        self.state().requests.push(from_json(request));
        self
    }

    pub fn with_membership(self, membership: Value) -> Self {
        self.state().memberships.push(from_json(membership));
        self
    }

    /// Make every later call named `call` fail.
    pub fn fail(&self, call: &str) {
        self.state().failing.insert(call.to_owned());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn call_count(&self, call: &str) -> usize {
        self.state().calls.iter().filter(|c| *c == call).count()
    }

    pub fn trainings_snapshot(&self) -> Vec<Training> {
        self.state().trainings.clone()
    }

    pub fn rooms_snapshot(&self) -> Vec<Room> {
        self.state().rooms.clone()
    }

    pub fn subscriptions_snapshot(&self) -> Vec<Subscription> {
        self.state().subscriptions.clone()
    }

    pub fn bookings_snapshot(&self) -> Vec<Booking> {
        self.state().bookings.clone()
    }

    pub fn request_status(&self, request_id: i64) -> Option<RequestStatus> {
        self.state()
            .requests
            .iter()
            .find(|request| request.id == request_id)
            .map(|request| request.status)
    }

    pub fn account_emails(&self) -> Vec<String> {
        self.state()
            .accounts
            .iter()
            .map(|(user, _)| user.email.clone())
            .collect()
    }
}

fn not_found(what: &str) -> Error {
    Error::not_found(format!("{what} not found"))
}

#[async_trait]
impl BackendApi for StubBackend {
    async fn register(&self, registration: &Registration) -> Result<MessageResponse, Error> {
        let mut state = self.enter("register")?;
        if state
            .accounts
            .iter()
            .any(|(user, _)| user.email == registration.email())
        {
            return Err(Error::from_status(400, "Пользователь уже существует"));
        }
        let body = serde_json::to_value(registration).expect("registration serialises");
        let password = body["password"].as_str().unwrap_or_default().to_owned();
        let id = state.next_id();
        let user = from_json(json!({
            "id": id,
            "first_name": registration.first_name(),
            "last_name": registration.last_name(),
            "email": registration.email(),
            "role_name": "client"
        }));
        state.accounts.push((user, password));
        Ok(MessageResponse {
            message: Some("registered".to_owned()),
        })
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<MessageResponse, Error> {
        let mut state = self.enter("login")?;
        let user = state
            .accounts
            .iter()
            .find(|(user, password)| {
                user.email == credentials.email() && password == credentials.password()
            })
            .map(|(user, _)| user.clone())
            .ok_or_else(|| Error::unauthorized("Неверный email или пароль").with_status(401))?;
        state.signed_in = Some(user);
        Ok(MessageResponse::default())
    }

    async fn logout(&self) -> Result<(), Error> {
        self.enter("logout")?.signed_in = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<User, Error> {
        self.enter("current_user")?
            .signed_in
            .clone()
            .ok_or_else(|| Error::unauthorized("Not authenticated").with_status(401))
    }

    async fn refresh_token(&self) -> Result<(), Error> {
        self.enter("refresh_token").map(drop)
    }

    async fn all_users(&self) -> Result<Vec<User>, Error> {
        let state = self.enter("all_users")?;
        let mut users: Vec<User> = state.accounts.iter().map(|(user, _)| user.clone()).collect();
        let missing = state
            .signed_in
            .as_ref()
            .filter(|current| !users.iter().any(|user| user.id == current.id))
            .cloned();
        users.extend(missing);
        Ok(users)
    }

    async fn trainings(&self) -> Result<Vec<Training>, Error> {
        Ok(self.enter("trainings")?.trainings.clone())
    }

    async fn create_training(&self, draft: &TrainingDraft) -> Result<(), Error> {
        let mut state = self.enter("create_training")?;
        let id = state.next_id();
        let body = serde_json::to_value(draft).expect("draft serialises");
        let training = from_json(merged(body, json!({"id": id})));
        state.trainings.push(training);
        Ok(())
    }

    async fn update_training(&self, training_id: i64, update: &TrainingUpdate) -> Result<(), Error> {
        let mut state = self.enter("update_training")?;
        let body = serde_json::to_value(update).expect("update serialises");
        let training = state
            .trainings
            .iter_mut()
            .find(|training| training.id == training_id)
            .ok_or_else(|| not_found("training"))?;
        training.title = body["title"].as_str().unwrap_or_default().to_owned();
        training.description = body["description"].as_str().map(str::to_owned);
        training.date = body["date"]
            .as_str()
            .and_then(|date| date.parse().ok())
            .unwrap_or(training.date);
        training.start_time = body["start_time"].as_str().unwrap_or_default().to_owned();
        training.end_time = body["end_time"].as_str().unwrap_or_default().to_owned();
        Ok(())
    }

    async fn delete_training(&self, training_id: i64) -> Result<(), Error> {
        let mut state = self.enter("delete_training")?;
        state.trainings.retain(|training| training.id != training_id);
        Ok(())
    }

    async fn my_trainings(&self) -> Result<Vec<Training>, Error> {
        let state = self.enter("my_trainings")?;
        let trainer_id = state.signed_in.as_ref().map(|user| user.id);
        Ok(state
            .trainings
            .iter()
            .filter(|training| {
                training.trainer_id == trainer_id
                    || training.trainer.as_ref().map(|t| t.id) == trainer_id
            })
            .cloned()
            .collect())
    }

    async fn create_booking(&self, training_id: i64) -> Result<(), Error> {
        let mut state = self.enter("create_booking")?;
        if state
            .bookings
            .iter()
            .any(|booking| booking.training.id == training_id)
        {
            return Err(Error::from_status(400, "Вы уже записаны на эту тренировку"));
        }
        let training = state
            .trainings
            .iter_mut()
            .find(|training| training.id == training_id)
            .ok_or_else(|| not_found("training"))?;
        if training.is_full() {
            return Err(Error::from_status(400, "Нет свободных мест"));
        }
        training.booking_count += 1;
        let training = training.clone();
        let id = state.next_id();
        state.bookings.push(Booking { id, training });
        Ok(())
    }

    async fn bookings(&self) -> Result<Vec<Booking>, Error> {
        Ok(self.enter("bookings")?.bookings.clone())
    }

    async fn cancel_booking(&self, training_id: i64) -> Result<(), Error> {
        let mut state = self.enter("cancel_booking")?;
        state
            .bookings
            .retain(|booking| booking.training.id != training_id);
        if let Some(training) = state
            .trainings
            .iter_mut()
            .find(|training| training.id == training_id)
        {
            training.booking_count = training.booking_count.saturating_sub(1);
        }
        Ok(())
    }

    async fn rooms(&self) -> Result<Vec<Room>, Error> {
        Ok(self.enter("rooms")?.rooms.clone())
    }

    async fn create_room(&self, draft: &RoomDraft) -> Result<(), Error> {
        let mut state = self.enter("create_room")?;
        let id = state.next_id();
        let body = serde_json::to_value(draft).expect("draft serialises");
        let room = from_json(merged(body, json!({"id": id})));
        state.rooms.push(room);
        Ok(())
    }

    async fn update_room(&self, room_id: i64, draft: &RoomDraft) -> Result<(), Error> {
        let mut state = self.enter("update_room")?;
        let body = serde_json::to_value(draft).expect("draft serialises");
        let room = state
            .rooms
            .iter_mut()
            .find(|room| room.id == room_id)
            .ok_or_else(|| not_found("room"))?;
        *room = from_json(merged(body, json!({"id": room_id})));
        Ok(())
    }

    async fn delete_room(&self, room_id: i64) -> Result<(), Error> {
        self.enter("delete_room")?
            .rooms
            .retain(|room| room.id != room_id);
        Ok(())
    }

    async fn subscriptions(&self) -> Result<Vec<Subscription>, Error> {
        Ok(self.enter("subscriptions")?.subscriptions.clone())
    }

    async fn create_subscription(&self, draft: &SubscriptionDraft) -> Result<(), Error> {
        let mut state = self.enter("create_subscription")?;
        let id = state.next_id();
        let body = serde_json::to_value(draft).expect("draft serialises");
        let subscription = from_json(merged(body, json!({"id": id})));
        state.subscriptions.push(subscription);
        Ok(())
    }

    async fn update_subscription(
        &self,
        subscription_id: i64,
        draft: &SubscriptionDraft,
    ) -> Result<(), Error> {
        let mut state = self.enter("update_subscription")?;
        let body = serde_json::to_value(draft).expect("draft serialises");
        let subscription = state
            .subscriptions
            .iter_mut()
            .find(|subscription| subscription.id == subscription_id)
            .ok_or_else(|| not_found("subscription"))?;
        *subscription = from_json(merged(body, json!({"id": subscription_id})));
        Ok(())
    }

    async fn delete_subscription(&self, subscription_id: i64) -> Result<(), Error> {
        self.enter("delete_subscription")?
            .subscriptions
            .retain(|subscription| subscription.id != subscription_id);
        Ok(())
    }

    async fn request_membership(&self, subscription_id: i64) -> Result<(), Error> {
        let mut state = self.enter("request_membership")?;
        let user = state
            .signed_in
            .clone()
            .ok_or_else(|| Error::unauthorized("Not authenticated"))?;
        let subscription = state
            .subscriptions
            .iter()
            .find(|subscription| subscription.id == subscription_id)
            .cloned()
            .ok_or_else(|| not_found("subscription"))?;
        let id = state.next_id();
        state.requests.push(MembershipRequest {
            id,
            user,
            subscription,
            status: RequestStatus::Pending,
            created_at: "2026-10-19T12:00:00".to_owned(),
        });
        Ok(())
    }

    async fn my_membership(&self) -> Result<Membership, Error> {
        let state = self.enter("my_membership")?;
        let user_id = state.signed_in.as_ref().map(|user| user.id);
        state
            .memberships
            .iter()
            .find(|membership| {
                membership.user_id == user_id
                    || membership.user.as_ref().map(|user| user.id) == user_id
            })
            .cloned()
            .ok_or_else(|| Error::from_status(404, "Абонемент не найден"))
    }

    async fn membership_requests(&self) -> Result<Vec<MembershipRequest>, Error> {
        Ok(self.enter("membership_requests")?.requests.clone())
    }

    async fn update_request_status(
        &self,
        request_id: i64,
        status: RequestStatus,
    ) -> Result<(), Error> {
        let mut state = self.enter("update_request_status")?;
        let request = state
            .requests
            .iter_mut()
            .find(|request| request.id == request_id)
            .ok_or_else(|| not_found("request"))?;
        request.status = status;
        Ok(())
    }

    async fn all_memberships(&self) -> Result<Vec<Membership>, Error> {
        Ok(self.enter("all_memberships")?.memberships.clone())
    }
}
