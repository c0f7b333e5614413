//! Auth resource group: login, register, token refresh.

use reqwest::Method;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::{LoginRequest, LoginResponse, RegisterRequest};

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/auth/login`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for rejected credentials.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.client.endpoint("/api/auth/login")?;
        self.client
            .fetch_json(self.client.request(Method::POST, url).json(credentials))
            .await
    }

    /// `POST /api/auth/register`. Returns the backend's confirmation text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the username or email is taken.
    pub async fn register(&self, user: &RegisterRequest) -> Result<String, ApiError> {
        let url = self.client.endpoint("/api/auth/register")?;
        self.client
            .fetch_text(self.client.request(Method::POST, url).json(user))
            .await
    }

    /// `POST /api/auth/refresh` with the current bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the token is no longer valid.
    pub async fn refresh(&self) -> Result<LoginResponse, ApiError> {
        let url = self.client.endpoint("/api/auth/refresh")?;
        self.client.fetch_json(self.client.request(Method::POST, url)).await
    }
}
