//! Transaction history view: client-side filter, sort and pagination.
//!
//! DESIGN
//! ======
//! The history page loads every transaction of the user once and narrows it
//! locally, so changing a filter never issues a request. Pages are 1-based.

#[cfg(test)]
#[path = "transactions_test.rs"]
mod transactions_test;

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::net::types::{Transaction, TransactionType};

/// Rows shown per page of the history view.
pub const TRANSACTIONS_PER_PAGE: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Credit,
    Debit,
}

impl TypeFilter {
    fn admits(self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Credit => kind == TransactionType::Credit,
            Self::Debit => kind == TransactionType::Debit,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Every criterion of the history view. The default admits everything,
/// newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: TypeFilter,
    /// Case-insensitive needle matched against description and reference.
    pub search: String,
    /// Earliest day included.
    pub from: Option<NaiveDate>,
    /// Last day included, through its final second.
    pub to: Option<NaiveDate>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub sort_by: SortKey,
    pub order: SortOrder,
}

impl TransactionFilter {
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        if !self.kind.admits(tx.transaction_type) {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty()
            && !tx.description.to_lowercase().contains(&needle)
            && !tx.reference_number.to_lowercase().contains(&needle)
        {
            return false;
        }

        let day = tx.transaction_date.date();
        if self.from.is_some_and(|from| day < from) || self.to.is_some_and(|to| day > to) {
            return false;
        }

        if self.min_amount.is_some_and(|min| tx.amount < min) || self.max_amount.is_some_and(|max| tx.amount > max) {
            return false;
        }
        true
    }

    /// Matching transactions in display order. Ties keep their input order.
    #[must_use]
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut out: Vec<Transaction> = transactions.iter().filter(|tx| self.matches(tx)).cloned().collect();
        out.sort_by(|a, b| {
            let ord = match self.sort_by {
                SortKey::Date => a.transaction_date.cmp(&b.transaction_date),
                SortKey::Amount => a.amount.cmp(&b.amount),
            };
            match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        out
    }

    /// Whether any criterion narrows the list.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.kind != TypeFilter::All
            || !self.search.trim().is_empty()
            || self.from.is_some()
            || self.to.is_some()
            || self.min_amount.is_some()
            || self.max_amount.is_some()
    }

    /// Reset every narrowing criterion, keeping the sort.
    pub fn clear(&mut self) {
        *self = Self { sort_by: self.sort_by, order: self.order, ..Self::default() };
    }
}

/// One page of a locally paginated list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// 1-based page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based position of the first row shown; 0 when the list is empty.
    pub first_row: usize,
    pub last_row: usize,
}

impl<T> PageSlice<T> {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Cut `items` into pages of `per_page` and return page `page` (1-based).
/// Out-of-range pages are clamped to the nearest valid one.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> PageSlice<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * per_page).min(total_items);
    let end = (start + per_page).min(total_items);
    let first_row = if start < end { start + 1 } else { 0 };

    PageSlice { items: items[start..end].to_vec(), page, total_pages, total_items, first_row, last_row: end }
}

/// Order used by every "most recent" listing: newest first, then highest id.
pub(crate) fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    b.transaction_date.cmp(&a.transaction_date).then_with(|| b.id.cmp(&a.id))
}
