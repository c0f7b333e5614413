use super::*;
use crate::test_helpers::{at, dec};

#[test]
fn format_eur_pads_and_rounds_to_cents() {
    assert_eq!(format_eur(dec("1234.5")), "€1234.50");
    assert_eq!(format_eur(dec("0")), "€0.00");
    assert_eq!(format_eur(dec("2.005")), "€2.01");
}

#[test]
fn format_eur_negative() {
    assert_eq!(format_eur(dec("-12.3")), "-€12.30");
    assert_eq!(format_eur(dec("-0.001")), "€0.00");
}

#[test]
fn signed_amount_follows_direction() {
    assert_eq!(format_signed_amount(dec("50"), TransactionType::Credit), "+€50.00");
    assert_eq!(format_signed_amount(dec("-50"), TransactionType::Debit), "-€50.00");
    assert_eq!(format_signed_amount(dec("7.5"), TransactionType::Debit), "-€7.50");
}

#[test]
fn timestamps_render_in_twelve_hour_clock() {
    assert_eq!(format_timestamp(at("2024-02-01T08:30:00")), "Feb 1, 2024, 08:30 AM");
    assert_eq!(format_timestamp(at("2024-12-24T18:05:00")), "Dec 24, 2024, 06:05 PM");
    assert_eq!(format_date(at("2024-02-01T08:30:00")), "Feb 1, 2024");
}

#[test]
fn iban_is_grouped_by_four() {
    assert_eq!(format_iban("fr7630006000011234567890189"), "FR76 3000 6000 0112 3456 7890 189");
    assert_eq!(format_iban("FR76 3000"), "FR76 3000");
    assert_eq!(format_iban(""), "");
}
