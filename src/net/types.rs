//! Wire DTOs mirrored from backend JSON.
//!
//! DESIGN
//! ======
//! These records carry no invariants of their own; the backend owns balances
//! and ledger integrity. Field names follow the backend's camelCase keys,
//! money is a `Decimal` carried as a JSON number, and timestamps are the
//! zone-less local date-times the backend emits.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTITY
// =============================================================================

/// The two roles the backend knows about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Client,
    Admin,
}

impl Role {
    /// Cast a backend role string. Anything other than `ADMIN` is treated as a
    /// plain client.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("ADMIN") {
            Self::Admin
        } else {
            Self::Client
        }
    }
}

/// Authenticated identity as returned by auth, profile and admin endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// "First Last", falling back to the username when both names are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() { self.username.clone() } else { full.to_owned() }
    }
}

/// Partial user update for the admin endpoint. Absent fields are omitted from
/// the request body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterRequest {
    /// Credentials for the login that follows a successful registration.
    #[must_use]
    pub fn credentials(&self) -> LoginRequest {
        LoginRequest { username: self.username.clone(), password: self.password.clone() }
    }
}

/// Body of a successful login or token refresh.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "type", default)]
    pub token_type: String,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl LoginResponse {
    /// Identity derived from the login body. Names are not part of this
    /// response and stay empty until the profile is fetched or updated.
    #[must_use]
    pub fn identity(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: String::new(),
            last_name: String::new(),
            role: Role::from_wire(&self.role),
        }
    }
}

// =============================================================================
// ACCOUNTS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Checking,
    Savings,
}

impl AccountType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "CHECKING",
            Self::Savings => "SAVINGS",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub iban: String,
    pub balance: Decimal,
    pub account_type: AccountType,
    pub account_name: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreationRequest {
    pub account_name: String,
    pub account_type: AccountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_balance: Option<Decimal>,
    pub user_id: i64,
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Debit,
    Credit,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub description: String,
    pub reference_number: String,
    pub transaction_date: NaiveDateTime,
    pub balance_after: Decimal,
    #[serde(default, alias = "fee", skip_serializing_if = "Option::is_none")]
    pub transfer_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_iban: Option<String>,
}

impl Transaction {
    #[must_use]
    pub fn is_credit(&self) -> bool {
        self.transaction_type == TransactionType::Credit
    }
}

// =============================================================================
// TRANSFERS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransferStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: i64,
    pub amount: Decimal,
    #[serde(default)]
    pub transfer_fee: Decimal,
    pub from_iban: String,
    pub to_iban: String,
    pub beneficiary_name: String,
    #[serde(default)]
    pub description: String,
    pub reference_number: String,
    pub status: TransferStatus,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_iban: String,
    pub to_iban: String,
    pub amount: Decimal,
    pub beneficiary_name: String,
    pub description: String,
}

// =============================================================================
// PAGING
// =============================================================================

/// One page of a backend-paginated listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
    /// Zero-based page index, when reported.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { content: Vec::new(), total_pages: 0, total_elements: 0, number: 0, size: 0 }
    }
}

// =============================================================================
// PROFILE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdateResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
}
