//! Self-service accounts resource group.

use reqwest::Method;
use rust_decimal::Decimal;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::Account;

pub struct AccountsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AccountsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/accounts`: accounts owned by the current user.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn list(&self) -> Result<Vec<Account>, ApiError> {
        let url = self.client.endpoint("/api/accounts")?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    /// `GET /api/accounts/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn get(&self, account_id: i64) -> Result<Account, ApiError> {
        let url = self.client.endpoint(&format!("/api/accounts/{account_id}"))?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    /// `GET /api/accounts/iban/{iban}`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn by_iban(&self, iban: &str) -> Result<Account, ApiError> {
        let url = self.client.endpoint_with_segment("/api/accounts/iban", iban)?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    /// `GET /api/accounts/{id}/balance`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn balance(&self, account_id: i64) -> Result<Decimal, ApiError> {
        let url = self.client.endpoint(&format!("/api/accounts/{account_id}/balance"))?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }
}
