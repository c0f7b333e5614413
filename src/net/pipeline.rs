//! Request pipeline wrapped around every gateway call.
//!
//! DESIGN
//! ======
//! Two steps compose around each request:
//! - outgoing: attach the persisted token as a bearer credential, if any;
//! - incoming: on 401, clear the persisted session and navigate the
//!   application to the login entry point.
//!
//! Every other response is passed through untouched. Each step is a plain
//! method so it can be exercised without issuing a request.

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response, StatusCode};

use super::error::ApiError;
use super::storage::{SessionStorage, TOKEN_KEY, clear_session};

/// Application-wide navigation, used to send the user to the login entry
/// point when the backend reports an authentication failure.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

#[derive(Clone)]
pub struct RequestPipeline {
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl RequestPipeline {
    pub fn new(storage: Arc<dyn SessionStorage>, navigator: Arc<dyn Navigator>, login_path: impl Into<String>) -> Self {
        Self { storage, navigator, login_path: login_path.into() }
    }

    #[must_use]
    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Attach `Authorization: Bearer <token>` when a non-empty token is
    /// persisted. The token is read at call time, so a logout between two
    /// calls drops the header from the second.
    pub fn attach_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.storage.get(TOKEN_KEY) {
            Some(token) if !token.trim().is_empty() => request.header(AUTHORIZATION, format!("Bearer {token}")),
            _ => request,
        }
    }

    /// React to an authentication failure. Returns `true` when the status was
    /// a 401 and the session was cleared.
    pub fn handle_auth_failure(&self, status: StatusCode) -> bool {
        if status != StatusCode::UNAUTHORIZED {
            return false;
        }
        tracing::warn!(login_path = %self.login_path, "backend rejected credentials; clearing session");
        clear_session(self.storage.as_ref());
        self.navigator.navigate(&self.login_path);
        true
    }

    /// Run a request through both steps.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] on transport failure and
    /// [`ApiError::Unauthorized`] after handling a 401. Other statuses are
    /// returned as `Ok` for the caller to interpret.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.attach_auth(request).send().await.map_err(ApiError::from)?;
        let status = response.status();
        if self.handle_auth_failure(status) {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Unauthorized { body });
        }
        Ok(response)
    }
}

impl std::fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}
