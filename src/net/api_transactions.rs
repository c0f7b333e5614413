//! Self-service transactions resource group.

use chrono::NaiveDateTime;
use reqwest::Method;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::{Page, Transaction};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub struct TransactionsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TransactionsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/transactions/account/{id}?page&size`, zero-based pages of
    /// [`DEFAULT_PAGE_SIZE`] unless told otherwise.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn by_account(&self, account_id: i64, page: u32, size: u32) -> Result<Page<Transaction>, ApiError> {
        let url = self.client.endpoint(&format!("/api/transactions/account/{account_id}"))?;
        let request = self
            .client
            .request(Method::GET, url)
            .query(&[("page", page), ("size", size)]);
        self.client.fetch_json(request).await
    }

    /// `GET /api/transactions/account/{id}/date-range?startDate&endDate`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn by_account_in_range(
        &self,
        account_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Transaction>, ApiError> {
        let url = self
            .client
            .endpoint(&format!("/api/transactions/account/{account_id}/date-range"))?;
        let request = self.client.request(Method::GET, url).query(&[
            ("startDate", start.format("%Y-%m-%dT%H:%M:%S").to_string()),
            ("endDate", end.format("%Y-%m-%dT%H:%M:%S").to_string()),
        ]);
        self.client.fetch_json(request).await
    }

    /// `GET /api/transactions/user`: every transaction of the current user.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn for_user(&self) -> Result<Vec<Transaction>, ApiError> {
        let url = self.client.endpoint("/api/transactions/user")?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    /// `GET /api/transactions/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn get(&self, transaction_id: i64) -> Result<Transaction, ApiError> {
        let url = self.client.endpoint(&format!("/api/transactions/{transaction_id}"))?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    /// `GET /api/transactions/reference/{reference}`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn by_reference(&self, reference: &str) -> Result<Transaction, ApiError> {
        let url = self
            .client
            .endpoint_with_segment("/api/transactions/reference", reference)?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }
}
