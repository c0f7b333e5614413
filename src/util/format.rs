//! Display formatting for money, timestamps and IBANs.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::net::types::TransactionType;

fn two_places(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `€1234.50`, with a leading minus for negative amounts.
#[must_use]
pub fn format_eur(amount: Decimal) -> String {
    let rounded = two_places(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-€{:.2}", rounded.abs())
    } else {
        format!("€{:.2}", rounded.abs())
    }
}

/// `+€12.00` for credits and `-€12.00` for debits, whatever the sign of
/// `amount`.
#[must_use]
pub fn format_signed_amount(amount: Decimal, kind: TransactionType) -> String {
    let sign = match kind {
        TransactionType::Credit => '+',
        TransactionType::Debit => '-',
    };
    format!("{sign}€{:.2}", two_places(amount.abs()))
}

/// `Feb 1, 2024, 08:30 AM`
#[must_use]
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// `Feb 1, 2024`
#[must_use]
pub fn format_date(at: NaiveDateTime) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// IBAN in groups of four, upper-cased, e.g. `FR76 3000 6000 0112`.
#[must_use]
pub fn format_iban(iban: &str) -> String {
    let compact: Vec<char> = iban
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    compact
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
