//! Self-service transfers resource group.

use reqwest::Method;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::{Page, Transfer, TransferRequest};

pub struct TransfersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TransfersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/transfers/execute`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with the backend's reason (insufficient
    /// funds, foreign source account, ...).
    pub async fn execute(&self, transfer: &TransferRequest) -> Result<Transfer, ApiError> {
        let url = self.client.endpoint("/api/transfers/execute")?;
        tracing::debug!(from = %transfer.from_iban, to = %transfer.to_iban, amount = %transfer.amount, "submitting transfer");
        self.client
            .fetch_json(self.client.request(Method::POST, url).json(transfer))
            .await
    }

    /// `GET /api/transfers/user?page&size`: zero-based pages.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn for_user(&self, page: u32, size: u32) -> Result<Page<Transfer>, ApiError> {
        let url = self.client.endpoint("/api/transfers/user")?;
        let request = self
            .client
            .request(Method::GET, url)
            .query(&[("page", page), ("size", size)]);
        self.client.fetch_json(request).await
    }

    /// `GET /api/transfers/{id}`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn get(&self, transfer_id: i64) -> Result<Transfer, ApiError> {
        let url = self.client.endpoint(&format!("/api/transfers/{transfer_id}"))?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    /// `GET /api/transfers/reference/{reference}`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn by_reference(&self, reference: &str) -> Result<Transfer, ApiError> {
        let url = self
            .client
            .endpoint_with_segment("/api/transfers/reference", reference)?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    /// `POST /api/transfers/{id}/cancel?reason=`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the transfer can no longer be
    /// cancelled.
    pub async fn cancel(&self, transfer_id: i64, reason: &str) -> Result<Transfer, ApiError> {
        let url = self.client.endpoint(&format!("/api/transfers/{transfer_id}/cancel"))?;
        let request = self
            .client
            .request(Method::POST, url)
            .query(&[("reason", reason)]);
        self.client.fetch_json(request).await
    }
}
