//! Administrative resource group.
//!
//! The user-management calls (`users`, `user`, `update_user`, `delete_user`)
//! target endpoints the backend does not ship yet. Each one swallows its own
//! failure and yields an empty value, so admin pages render empty tables
//! instead of failing. The pipeline still runs first: a 401 on these calls
//! clears the session like any other. Nothing else in this group degrades.

use reqwest::Method;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::{Account, AccountCreationRequest, Transaction, Transfer, User, UserPatch};

pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    // =========================================================================
    // ACCOUNTS
    // =========================================================================

    /// `GET /api/accounts/all`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn all_accounts(&self) -> Result<Vec<Account>, ApiError> {
        let url = self.client.endpoint("/api/accounts/all")?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    /// `POST /api/accounts`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn create_account(&self, account: &AccountCreationRequest) -> Result<Account, ApiError> {
        let url = self.client.endpoint("/api/accounts")?;
        self.client
            .fetch_json(self.client.request(Method::POST, url).json(account))
            .await
    }

    // =========================================================================
    // TRANSACTIONS
    // =========================================================================

    /// `GET /api/transactions/all`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn all_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let url = self.client.endpoint("/api/transactions/all")?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    /// `POST /api/transactions/{id}/reverse?reason=`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn reverse_transaction(&self, transaction_id: i64, reason: &str) -> Result<Transaction, ApiError> {
        let url = self
            .client
            .endpoint(&format!("/api/transactions/{transaction_id}/reverse"))?;
        let request = self
            .client
            .request(Method::POST, url)
            .query(&[("reason", reason)]);
        self.client.fetch_json(request).await
    }

    // =========================================================================
    // TRANSFERS
    // =========================================================================

    /// `GET /api/transfers/all`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn all_transfers(&self) -> Result<Vec<Transfer>, ApiError> {
        let url = self.client.endpoint("/api/transfers/all")?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    /// `GET /api/transfers/pending`
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn pending_transfers(&self) -> Result<Vec<Transfer>, ApiError> {
        let url = self.client.endpoint("/api/transfers/pending")?;
        self.client.fetch_json(self.client.request(Method::GET, url)).await
    }

    // =========================================================================
    // USERS (degraded)
    // =========================================================================

    /// `GET /api/admin/users`. Empty on any failure.
    pub async fn users(&self) -> Vec<User> {
        let result = match self.client.endpoint("/api/admin/users") {
            Ok(url) => self.client.fetch_json(self.client.request(Method::GET, url)).await,
            Err(e) => Err(e),
        };
        degrade(result, "list users")
    }

    /// `GET /api/admin/users/{id}`. `User::default()` on any failure.
    pub async fn user(&self, user_id: i64) -> User {
        let result = match self.client.endpoint(&format!("/api/admin/users/{user_id}")) {
            Ok(url) => self.client.fetch_json(self.client.request(Method::GET, url)).await,
            Err(e) => Err(e),
        };
        degrade(result, "get user")
    }

    /// `PUT /api/admin/users/{id}`. `User::default()` on any failure.
    pub async fn update_user(&self, user_id: i64, patch: &UserPatch) -> User {
        let result = match self.client.endpoint(&format!("/api/admin/users/{user_id}")) {
            Ok(url) => {
                self.client
                    .fetch_json(self.client.request(Method::PUT, url).json(patch))
                    .await
            }
            Err(e) => Err(e),
        };
        degrade(result, "update user")
    }

    /// `DELETE /api/admin/users/{id}`. Failures are logged and dropped.
    pub async fn delete_user(&self, user_id: i64) {
        let result = match self.client.endpoint(&format!("/api/admin/users/{user_id}")) {
            Ok(url) => self.client.fetch_empty(self.client.request(Method::DELETE, url)).await,
            Err(e) => Err(e),
        };
        degrade(result, "delete user");
    }
}

fn degrade<T: Default>(result: Result<T, ApiError>, operation: &'static str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(operation, error = %e, "admin user endpoint unavailable; using empty result");
            T::default()
        }
    }
}
