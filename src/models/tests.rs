#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::transaction::{DEFAULT_ACCOUNT, DEFAULT_CATEGORY, DEFAULT_DESCRIPTION};
use super::*;

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap()
}

fn input(amount: &str) -> TransactionInput {
    TransactionInput {
        date: None,
        description: "Groceries".into(),
        amount: amount.into(),
        category: "Food".into(),
        is_income: false,
        account: "Checking".into(),
    }
}

// ── Validation ────────────────────────────────────────────────

#[test]
fn test_valid_amount() {
    let txn = input("42.99").validate(now()).unwrap();
    assert_eq!(txn.amount, dec!(42.99));
    assert_eq!(txn.description, "Groceries");
    assert!(!txn.is_income);
}

#[test]
fn test_amount_whitespace_trimmed() {
    let txn = input("  100.00  ").validate(now()).unwrap();
    assert_eq!(txn.amount, dec!(100.00));
}

#[test]
fn test_non_numeric_amount_rejected() {
    let err = input("abc").validate(now()).unwrap_err();
    assert!(err.to_string().contains("invalid amount"));
}

#[test]
fn test_empty_amount_rejected() {
    assert!(input("").validate(now()).is_err());
}

#[test]
fn test_negative_amount_rejected() {
    // Direction comes from is_income, never from sign.
    let err = input("-5.00").validate(now()).unwrap_err();
    assert!(err.to_string().contains("positive magnitude"));
}

#[test]
fn test_zero_amount_allowed() {
    let txn = input("0").validate(now()).unwrap();
    assert_eq!(txn.amount, rust_decimal::Decimal::ZERO);
}

// ── Field defaults ────────────────────────────────────────────

#[test]
fn test_empty_fields_get_defaults() {
    let txn = TransactionInput {
        amount: "10".into(),
        ..Default::default()
    }
    .validate(now())
    .unwrap();
    assert_eq!(txn.description, DEFAULT_DESCRIPTION);
    assert_eq!(txn.category, DEFAULT_CATEGORY);
    assert_eq!(txn.account, DEFAULT_ACCOUNT);
}

#[test]
fn test_whitespace_only_fields_get_defaults() {
    let txn = TransactionInput {
        amount: "10".into(),
        description: "   ".into(),
        category: " ".into(),
        account: "\t".into(),
        ..Default::default()
    }
    .validate(now())
    .unwrap();
    assert_eq!(txn.description, DEFAULT_DESCRIPTION);
    assert_eq!(txn.category, DEFAULT_CATEGORY);
    assert_eq!(txn.account, DEFAULT_ACCOUNT);
}

#[test]
fn test_missing_date_defaults_to_now() {
    let txn = input("10").validate(now()).unwrap();
    assert_eq!(txn.date, now());
}

#[test]
fn test_explicit_date_kept() {
    let explicit = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let txn = TransactionInput {
        date: Some(explicit),
        amount: "10".into(),
        ..Default::default()
    }
    .validate(now())
    .unwrap();
    assert_eq!(txn.date, explicit);
}

#[test]
fn test_new_transaction_has_no_id() {
    let txn = input("10").validate(now()).unwrap();
    assert!(txn.id.is_none());
}

// ── signed_amount ─────────────────────────────────────────────

#[test]
fn test_signed_amount() {
    let mut txn = input("25.50").validate(now()).unwrap();
    assert_eq!(txn.signed_amount(), dec!(-25.50));
    txn.is_income = true;
    assert_eq!(txn.signed_amount(), dec!(25.50));
}
