//! Administrator overview: bank-wide listings and the figures derived from
//! them.
//!
//! The user listing comes from a degraded endpoint and may be empty; every
//! other listing must load or the whole overview is withheld.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::dashboard::{MonthKey, RECENT_TRANSACTIONS};
use super::toast::Toasts;
use super::transactions::newest_first;
use crate::net::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{Account, AccountType, Transaction, Transfer, User};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdminStats {
    pub total_balance: Decimal,
    pub transaction_volume: Decimal,
    pub transfer_volume: Decimal,
    pub total_accounts: usize,
    pub total_users: usize,
    pub total_transactions: usize,
    pub total_transfers: usize,
    pub pending_transfers: usize,
}

/// Transaction count and volume booked in one month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthlyActivity {
    pub month: MonthKey,
    pub count: usize,
    pub volume: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminOverview {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub transfers: Vec<Transfer>,
    pub users: Vec<User>,
    pub pending: Vec<Transfer>,
}

impl AdminOverview {
    /// Fetch the five listings concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first failure among the non-degraded listings.
    pub async fn load(client: &ApiClient) -> Result<Self, ApiError> {
        let admin = client.admin();
        let (accounts, transactions, transfers, users, pending) = tokio::try_join!(
            admin.all_accounts(),
            admin.all_transactions(),
            admin.all_transfers(),
            async { Ok::<_, ApiError>(admin.users().await) },
            admin.pending_transfers(),
        )?;
        tracing::debug!(
            accounts = accounts.len(),
            transactions = transactions.len(),
            transfers = transfers.len(),
            users = users.len(),
            pending = pending.len(),
            "admin overview loaded"
        );
        Ok(Self { accounts, transactions, transfers, users, pending })
    }

    #[must_use]
    pub fn stats(&self) -> AdminStats {
        AdminStats {
            total_balance: self.accounts.iter().map(|a| a.balance).sum(),
            transaction_volume: self.transactions.iter().map(|t| t.amount).sum(),
            transfer_volume: self.transfers.iter().map(|t| t.amount).sum(),
            total_accounts: self.accounts.len(),
            total_users: self.users.len(),
            total_transactions: self.transactions.len(),
            total_transfers: self.transfers.len(),
            pending_transfers: self.pending.len(),
        }
    }

    /// Number of accounts per type.
    #[must_use]
    pub fn account_distribution(&self) -> Vec<(AccountType, usize)> {
        let mut counts: BTreeMap<AccountType, usize> = BTreeMap::new();
        for account in &self.accounts {
            *counts.entry(account.account_type).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    /// Per-month transaction count and volume, oldest month first.
    #[must_use]
    pub fn monthly_activity(&self) -> Vec<MonthlyActivity> {
        let mut buckets: BTreeMap<MonthKey, (usize, Decimal)> = BTreeMap::new();
        for tx in &self.transactions {
            let entry = buckets.entry(MonthKey::of(tx.transaction_date)).or_default();
            entry.0 += 1;
            entry.1 += tx.amount;
        }
        buckets
            .into_iter()
            .map(|(month, (count, volume))| MonthlyActivity { month, count, volume })
            .collect()
    }

    #[must_use]
    pub fn recent_transactions(&self) -> Vec<Transaction> {
        let mut recent = self.transactions.clone();
        recent.sort_by(newest_first);
        recent.truncate(RECENT_TRANSACTIONS);
        recent
    }

    /// The oldest pending transfers, up to the panel size.
    #[must_use]
    pub fn pending_queue(&self) -> Vec<Transfer> {
        let mut queue = self.pending.clone();
        queue.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        queue.truncate(RECENT_TRANSACTIONS);
        queue
    }
}

/// Load the overview, raising an error toast on failure.
pub async fn load_overview(client: &ApiClient, toasts: &mut Toasts) -> Option<AdminOverview> {
    toasts.report(AdminOverview::load(client).await, "Failed to load admin overview data")
}
