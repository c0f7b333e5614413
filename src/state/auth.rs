//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` is the single owner of the authenticated identity. It
//! persists the bearer token and the identity through the `SessionStorage`
//! port, which the request pipeline reads on every call, so a successful
//! login is immediately visible to the gateway.
//!
//! DESIGN
//! ======
//! Mutators take `&mut self`: two logins on one store cannot interleave.
//! Storage is written before memory, so a failed write never leaves memory
//! claiming a session that a restart would not see.
//!
//! The pipeline clears storage on a 401 without going through the store, so
//! the held session counts only while storage still carries its token. Every
//! accessor checks that before answering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use async_trait::async_trait;

use crate::net::ApiClient;
use crate::net::error::ApiError;
use crate::net::storage::{SessionStorage, StorageError, TOKEN_KEY, USER_KEY, clear_session};
use crate::net::types::{
    LoginRequest, LoginResponse, ProfileUpdateRequest, ProfileUpdateResponse, RegisterRequest, User,
};

/// Errors produced by session mutators.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("identity could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SessionError {
    /// Text suitable for a user-facing notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            Self::Storage(_) | Self::Serialize(_) => "Could not save the session on this device.".to_owned(),
        }
    }
}

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// A session mutator is waiting on the backend.
    pub loading: bool,
    /// `init` has run; guards hold off until then.
    pub initialized: bool,
}

// =============================================================================
// BACKEND SEAM
// =============================================================================

/// The auth subset of the gateway the session store depends on.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn register(&self, user: &RegisterRequest) -> Result<String, ApiError>;

    async fn refresh(&self) -> Result<LoginResponse, ApiError>;

    async fn update_profile(&self, profile: &ProfileUpdateRequest) -> Result<ProfileUpdateResponse, ApiError>;
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.auth().login(credentials).await
    }

    async fn register(&self, user: &RegisterRequest) -> Result<String, ApiError> {
        self.auth().register(user).await
    }

    async fn refresh(&self) -> Result<LoginResponse, ApiError> {
        self.auth().refresh().await
    }

    async fn update_profile(&self, profile: &ProfileUpdateRequest) -> Result<ProfileUpdateResponse, ApiError> {
        self.profile().update(profile).await
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    backend: Arc<dyn AuthBackend>,
    state: AuthState,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>, backend: Arc<dyn AuthBackend>) -> Self {
        Self { storage, backend, state: AuthState::default() }
    }

    /// Snapshot for the route guards. A session revoked behind the store's
    /// back shows up as signed out.
    #[must_use]
    pub fn state(&self) -> AuthState {
        if self.held() {
            return self.state.clone();
        }
        AuthState { user: None, token: None, ..self.state.clone() }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref().filter(|_| self.held())
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref().filter(|_| self.held())
    }

    /// Identity present and a non-empty token held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some() && self.token().is_some_and(|t| !t.is_empty())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }

    /// The in-memory token is still the persisted one.
    fn held(&self) -> bool {
        match self.state.token.as_deref() {
            Some(token) => self.storage.get(TOKEN_KEY).as_deref() == Some(token),
            None => false,
        }
    }

    /// Restore a persisted session. Never touches the network.
    ///
    /// A token without an identity (or the reverse) restores nothing. An
    /// identity that no longer deserializes is removed along with its token.
    pub fn init(&mut self) {
        self.state.user = None;
        self.state.token = None;
        self.state.loading = false;

        match (self.storage.get(TOKEN_KEY), self.storage.get(USER_KEY)) {
            (Some(token), Some(raw_user)) => match serde_json::from_str::<User>(&raw_user) {
                Ok(user) => {
                    tracing::debug!(username = %user.username, "restored persisted session");
                    self.state.user = Some(user);
                    self.state.token = Some(token);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "persisted identity is unreadable; clearing session");
                    clear_session(self.storage.as_ref());
                }
            },
            (token, user) => {
                if token.is_some() != user.is_some() {
                    tracing::debug!("incomplete persisted session ignored");
                }
            }
        }
        self.state.initialized = true;
    }

    /// Authenticate and persist the session.
    ///
    /// # Errors
    ///
    /// Returns the gateway error for rejected credentials, or a storage error
    /// when the session cannot be persisted. Either way the store is left
    /// signed out, including any session it held before the call.
    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<(), SessionError> {
        let result = {
            let _loading = Loading::raise(&mut self.state.loading);
            self.backend.login(credentials).await
        };
        match result {
            Ok(response) => self.establish(response),
            Err(e) => {
                tracing::debug!(error = %e, username = %credentials.username, "login rejected");
                self.logout();
                Err(e.into())
            }
        }
    }

    /// Create an account, then sign in with the same credentials. Returns the
    /// backend's confirmation text.
    ///
    /// # Errors
    ///
    /// Returns the first failure of either step. A failed registration issues
    /// no login.
    pub async fn register(&mut self, new_user: &RegisterRequest) -> Result<String, SessionError> {
        let result = {
            let _loading = Loading::raise(&mut self.state.loading);
            self.backend.register(new_user).await
        };
        let message = result?;
        tracing::info!(username = %new_user.username, "registered");

        self.login(&new_user.credentials()).await?;
        Ok(message)
    }

    /// Drop the session from memory and storage. Storage failures are logged.
    pub fn logout(&mut self) {
        if let Some(user) = self.state.user.take() {
            tracing::info!(username = %user.username, "signed out");
        }
        self.state.token = None;
        clear_session(self.storage.as_ref());
    }

    /// Exchange the current token for a fresh one.
    ///
    /// # Errors
    ///
    /// Returns the gateway error. A 401 has already cleared the persisted
    /// session; memory is cleared here to match.
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        let result = {
            let _loading = Loading::raise(&mut self.state.loading);
            self.backend.refresh().await
        };
        match result {
            Ok(response) => self.establish(response),
            Err(e) => {
                if e.is_auth_failure() {
                    self.state.user = None;
                    self.state.token = None;
                }
                Err(e.into())
            }
        }
    }

    /// Update the profile and replace the held identity with the backend's
    /// copy. Returns the backend's confirmation text.
    ///
    /// # Errors
    ///
    /// Returns the gateway error (e.g. email already in use) or a storage
    /// error when the new identity cannot be persisted.
    pub async fn update_profile(&mut self, profile: &ProfileUpdateRequest) -> Result<String, SessionError> {
        let result = {
            let _loading = Loading::raise(&mut self.state.loading);
            self.backend.update_profile(profile).await
        };
        let response = result?;

        let encoded = serde_json::to_string(&response.user)?;
        self.storage.set(USER_KEY, &encoded)?;
        self.state.user = Some(response.user);
        Ok(response.message)
    }

    fn establish(&mut self, response: LoginResponse) -> Result<(), SessionError> {
        let user = response.identity();
        let encoded = serde_json::to_string(&user)?;

        if let Err(e) = self.persist(&response.token, &encoded) {
            tracing::warn!(error = %e, "session could not be persisted");
            self.state.user = None;
            self.state.token = None;
            clear_session(self.storage.as_ref());
            return Err(e.into());
        }

        tracing::info!(username = %user.username, admin = user.is_admin(), "signed in");
        self.state.user = Some(user);
        self.state.token = Some(response.token);
        Ok(())
    }

    fn persist(&self, token: &str, encoded_user: &str) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token)?;
        self.storage.set(USER_KEY, encoded_user)
    }
}

/// Holds `loading` up for one backend call. Lowered on drop, so a call whose
/// future is abandoned mid-flight does not leave the guards waiting.
struct Loading<'a>(&'a mut bool);

impl<'a> Loading<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user())
            .field("loading", &self.state.loading)
            .field("initialized", &self.state.initialized)
            .finish_non_exhaustive()
    }
}
