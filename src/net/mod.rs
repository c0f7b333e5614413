//! Networking modules for the backend REST gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the only place that issues HTTP calls. Every call flows through
//! `pipeline`, which reads the bearer token from the `storage` port and
//! reacts to authentication failures. `types` defines the wire schema and
//! `error` the failure taxonomy callers see.

pub mod api;
mod api_accounts;
mod api_admin;
mod api_auth;
mod api_profile;
mod api_transactions;
mod api_transfers;
pub mod error;
pub mod pipeline;
pub mod storage;
pub mod types;

pub use api::ApiClient;
pub use api_accounts::AccountsApi;
pub use api_admin::AdminApi;
pub use api_auth::AuthApi;
pub use api_profile::ProfileApi;
pub use api_transactions::{DEFAULT_PAGE_SIZE, TransactionsApi};
pub use api_transfers::TransfersApi;
pub use error::ApiError;
