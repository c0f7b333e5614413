//! Dashboard view model: the user's accounts and transactions plus the
//! figures derived from them.
//!
//! DESIGN
//! ======
//! Both lists are fetched together and applied only when both arrive, so the
//! page never shows balances from one moment next to a history from another.
//! A failed reload raises a toast and keeps the previous data on screen.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;

use super::toast::Toasts;
use super::transactions::newest_first;
use crate::net::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{Account, AccountType, Transaction, TransactionType};

/// Rows in the "recent transactions" panel.
pub const RECENT_TRANSACTIONS: usize = 5;

/// Calendar month used to bucket activity, ordered chronologically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    #[must_use]
    pub fn of(at: NaiveDateTime) -> Self {
        Self { year: at.year(), month: at.month() }
    }

    /// Short label such as `Feb 2024`.
    #[must_use]
    pub fn label(self) -> String {
        const NAMES: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
        let name = self
            .month
            .checked_sub(1)
            .and_then(|i| NAMES.get(i as usize))
            .copied()
            .unwrap_or("???");
        format!("{name} {}", self.year)
    }
}

/// Income and expenses booked in one month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthlyFlow {
    pub month: MonthKey,
    pub income: Decimal,
    pub expenses: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardData {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
}

impl DashboardData {
    /// Fetch accounts and transactions concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first failure; nothing is returned unless both succeed.
    pub async fn load(client: &ApiClient) -> Result<Self, ApiError> {
        let (accounts_api, transactions_api) = (client.accounts(), client.transactions());
        let (accounts, transactions) = tokio::try_join!(accounts_api.list(), transactions_api.for_user())?;
        tracing::debug!(accounts = accounts.len(), transactions = transactions.len(), "dashboard loaded");
        Ok(Self { accounts, transactions })
    }

    #[must_use]
    pub fn total_balance(&self) -> Decimal {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    #[must_use]
    pub fn total_credits(&self) -> Decimal {
        sum_of(&self.transactions, TransactionType::Credit)
    }

    /// Debits as a positive spending figure, whatever sign the backend used.
    #[must_use]
    pub fn total_debits(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Debit)
            .map(|t| t.amount.abs())
            .sum()
    }

    /// Mean absolute transaction amount, `None` without transactions.
    #[must_use]
    pub fn average_amount(&self) -> Option<Decimal> {
        if self.transactions.is_empty() {
            return None;
        }
        let total: Decimal = self.transactions.iter().map(|t| t.amount.abs()).sum();
        Some(total / Decimal::from(self.transactions.len()))
    }

    /// Income and expenses of one month, e.g. the current one.
    #[must_use]
    pub fn month_totals(&self, month: MonthKey) -> MonthlyFlow {
        self.monthly_flow()
            .into_iter()
            .find(|f| f.month == month)
            .unwrap_or(MonthlyFlow { month, income: Decimal::ZERO, expenses: Decimal::ZERO })
    }

    /// Transactions booked in `month`.
    #[must_use]
    pub fn month_count(&self, month: MonthKey) -> usize {
        self.transactions
            .iter()
            .filter(|t| MonthKey::of(t.transaction_date) == month)
            .count()
    }

    /// Per-month income and expenses, oldest month first.
    #[must_use]
    pub fn monthly_flow(&self) -> Vec<MonthlyFlow> {
        let mut buckets: BTreeMap<MonthKey, (Decimal, Decimal)> = BTreeMap::new();
        for tx in &self.transactions {
            let entry = buckets.entry(MonthKey::of(tx.transaction_date)).or_default();
            if tx.is_credit() {
                entry.0 += tx.amount;
            } else {
                entry.1 += tx.amount.abs();
            }
        }
        buckets
            .into_iter()
            .map(|(month, (income, expenses))| MonthlyFlow { month, income, expenses })
            .collect()
    }

    /// Summed balance per account type.
    #[must_use]
    pub fn balance_by_type(&self) -> Vec<(AccountType, Decimal)> {
        let mut by_type: BTreeMap<AccountType, Decimal> = BTreeMap::new();
        for account in &self.accounts {
            *by_type.entry(account.account_type).or_default() += account.balance;
        }
        by_type.into_iter().collect()
    }

    #[must_use]
    pub fn recent_transactions(&self) -> Vec<Transaction> {
        let mut recent = self.transactions.clone();
        recent.sort_by(newest_first);
        recent.truncate(RECENT_TRANSACTIONS);
        recent
    }
}

fn sum_of(transactions: &[Transaction], kind: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.transaction_type == kind)
        .map(|t| t.amount)
        .sum()
}

// =============================================================================
// VIEW
// =============================================================================

/// Last successfully loaded dashboard.
#[derive(Clone, Debug, Default)]
pub struct DashboardView {
    pub data: DashboardData,
    pub loaded: bool,
    pub loading: bool,
}

impl DashboardView {
    /// Reload from the backend. On failure an error toast is raised and the
    /// previous data stays in place. Returns whether new data was applied.
    pub async fn reload(&mut self, client: &ApiClient, toasts: &mut Toasts) -> bool {
        self.loading = true;
        let result = DashboardData::load(client).await;
        self.loading = false;

        match toasts.report(result, "Failed to load dashboard data") {
            Some(data) => {
                self.data = data;
                self.loaded = true;
                true
            }
            None => false,
        }
    }
}
