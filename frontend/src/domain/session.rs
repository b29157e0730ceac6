//! Session store: the cached current user and its change listeners.
//!
//! The store is the single owner of "who is logged in". Every operation that
//! can change the cached user notifies listeners synchronously, in
//! registration order, after the cache is updated. Failures of the backend
//! calls are folded into [`AuthOutcome`] values instead of propagating.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, info};

use super::ports::BackendApi;
use super::{AuthOutcome, LoginCredentials, Registration, Role, User};

/// Callback invoked with the cached user after every session change.
pub type SessionListener = Arc<dyn Fn(Option<&User>) + Send + Sync>;

/// Token returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// Cached authentication state backed by the club API.
pub struct SessionStore {
    api: Arc<dyn BackendApi>,
    user: RwLock<Option<User>>,
    listeners: Mutex<Vec<(ListenerHandle, SessionListener)>>,
    next_handle: AtomicU64,
}

impl SessionStore {
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self {
            api,
            user: RwLock::new(None),
            listeners: Mutex::new(Vec::new()),
            next_handle: AtomicU64::new(0),
        }
    }

    /// Register `listener`; keep the handle to unsubscribe later.
    pub fn subscribe<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn(Option<&User>) + Send + Sync + 'static,
    {
        let handle = ListenerHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((handle, Arc::new(listener)));
        handle
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, handle: ListenerHandle) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != handle);
        listeners.len() != before
    }

    fn set_user(&self, user: Option<User>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    fn notify(&self) {
        // Snapshot both so listeners may call back into the store.
        let listeners: Vec<SessionListener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        let user = self.current_user();
        for listener in listeners {
            listener(user.as_ref());
        }
    }

    /// Refresh the cached user from `/users/me/`.
    ///
    /// Returns `true` when a user is logged in. Listeners are notified on
    /// both paths.
    pub async fn check_auth(&self) -> bool {
        match self.api.current_user().await {
            Ok(user) => {
                debug!(user_id = user.id, "session restored");
                self.set_user(Some(user));
                self.notify();
                true
            }
            Err(error) => {
                debug!(%error, "no active session");
                self.set_user(None);
                self.notify();
                false
            }
        }
    }

    /// Log in and, on success, refresh the cached user.
    pub async fn login(&self, credentials: &LoginCredentials) -> AuthOutcome {
        match self.api.login(credentials).await {
            Ok(response) => {
                info!(email = credentials.email(), "login succeeded");
                self.check_auth().await;
                AuthOutcome::succeeded(response.message)
            }
            Err(error) => {
                info!(email = credentials.email(), %error, "login failed");
                AuthOutcome::failed(error.message())
            }
        }
    }

    /// Register a new client. The session is left untouched.
    pub async fn register(&self, registration: &Registration) -> AuthOutcome {
        match self.api.register(registration).await {
            Ok(response) => AuthOutcome::succeeded(response.message),
            Err(error) => {
                info!(email = registration.email(), %error, "registration failed");
                AuthOutcome::failed(error.message())
            }
        }
    }

    /// Log out, clearing the cache only once the backend confirms.
    pub async fn logout(&self) -> AuthOutcome {
        match self.api.logout().await {
            Ok(()) => {
                self.set_user(None);
                self.notify();
                AuthOutcome::succeeded(None)
            }
            Err(error) => AuthOutcome::failed(error.message()),
        }
    }

    /// Clone of the cached user.
    pub fn current_user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Role of the cached user.
    pub fn role(&self) -> Option<Role> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|user| user.role.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.role().as_ref() == Some(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }

    pub fn is_trainer(&self) -> bool {
        self.has_role(&Role::Trainer)
    }

    pub fn is_client(&self) -> bool {
        self.has_role(&Role::Client)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.current_user())
            .finish_non_exhaustive()
    }
}
