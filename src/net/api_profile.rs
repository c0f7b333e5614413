//! Profile resource group.

use reqwest::Method;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::{ProfileUpdateRequest, ProfileUpdateResponse, User};

pub struct ProfileApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProfileApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/user/profile`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn get(&self) -> Result<User, ApiError> {
        let url = self.client.endpoint("/api/user/profile")?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    /// `PUT /api/user/profile`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the email is already in use.
    pub async fn update(&self, profile: &ProfileUpdateRequest) -> Result<ProfileUpdateResponse, ApiError> {
        let url = self.client.endpoint("/api/user/profile")?;
        self.client
            .fetch_json(self.client.request(Method::PUT, url).json(profile))
            .await
    }
}
