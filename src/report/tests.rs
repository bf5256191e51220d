#![allow(clippy::unwrap_used)]

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::Transaction;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn txn(date: NaiveDateTime, amount: Decimal, account: &str, is_income: bool) -> Transaction {
    Transaction {
        id: None,
        date,
        description: "test".into(),
        amount,
        category: "Uncategorized".into(),
        is_income,
        account: account.into(),
    }
}

// ── resolve_windows ───────────────────────────────────────────

#[test]
fn test_month_start_is_first_at_midnight() {
    let w = resolve_windows(dt(2024, 3, 15, 14, 37));
    assert_eq!(w.month_start, dt(2024, 3, 1, 0, 0));
}

#[test]
fn test_week_start_is_monday_at_midnight() {
    // 2024-03-15 is a Friday; the preceding Monday is the 11th.
    let w = resolve_windows(dt(2024, 3, 15, 14, 37));
    assert_eq!(w.week_start, dt(2024, 3, 11, 0, 0));
    assert_eq!(w.week_start.weekday(), Weekday::Mon);
}

#[test]
fn test_monday_is_its_own_week_start() {
    let w = resolve_windows(dt(2024, 3, 11, 9, 0));
    assert_eq!(w.week_start, dt(2024, 3, 11, 0, 0));
}

#[test]
fn test_sunday_maps_back_six_days() {
    let w = resolve_windows(dt(2024, 3, 17, 23, 59));
    assert_eq!(w.week_start, dt(2024, 3, 11, 0, 0));
}

#[test]
fn test_week_start_can_cross_month_boundary() {
    // 2024-03-02 is a Saturday; its Monday is in February.
    let w = resolve_windows(dt(2024, 3, 2, 8, 0));
    assert_eq!(w.week_start, dt(2024, 2, 26, 0, 0));
    assert_eq!(w.month_start, dt(2024, 3, 1, 0, 0));
}

#[test]
fn test_windows_never_after_now() {
    for day in 1..=28 {
        let now = dt(2024, 2, day, 12, 0);
        let w = resolve_windows(now);
        assert!(w.month_start <= now);
        assert!(w.week_start <= now);
        assert_eq!(w.week_start.weekday(), Weekday::Mon);
        assert_eq!(w.month_start.day(), 1);
    }
}

#[test]
fn test_resolve_is_idempotent() {
    let now = dt(2024, 7, 4, 16, 20);
    assert_eq!(resolve_windows(now), resolve_windows(now));
}

// ── aggregate: filtering & ordering ───────────────────────────

#[test]
fn test_filter_excludes_before_window() {
    let start = dt(2024, 3, 11, 0, 0);
    let txns = vec![
        txn(dt(2024, 3, 10, 23, 59), dec!(10), "Checking", false),
        txn(dt(2024, 3, 11, 0, 0), dec!(20), "Checking", false),
        txn(dt(2024, 3, 12, 9, 0), dec!(30), "Checking", false),
    ];
    let report = aggregate(&txns, start, &ReportPolicy::default());
    assert_eq!(report.filtered.len(), 2);
    assert!(report.filtered.iter().all(|t| t.date >= start));
}

#[test]
fn test_filtered_sorted_newest_first() {
    let start = dt(2024, 3, 1, 0, 0);
    let txns = vec![
        txn(dt(2024, 3, 2, 0, 0), dec!(1), "Checking", false),
        txn(dt(2024, 3, 9, 0, 0), dec!(2), "Checking", false),
        txn(dt(2024, 3, 5, 0, 0), dec!(3), "Checking", false),
    ];
    let report = aggregate(&txns, start, &ReportPolicy::default());
    let dates: Vec<_> = report.filtered.iter().map(|t| t.date).collect();
    assert_eq!(
        dates,
        vec![dt(2024, 3, 9, 0, 0), dt(2024, 3, 5, 0, 0), dt(2024, 3, 2, 0, 0)]
    );
}

#[test]
fn test_date_ties_keep_insertion_order() {
    let start = dt(2024, 3, 1, 0, 0);
    let same = dt(2024, 3, 5, 12, 0);
    let txns = vec![
        txn(same, dec!(1), "Checking", false),
        txn(same, dec!(2), "Checking", false),
        txn(same, dec!(3), "Checking", false),
    ];
    let report = aggregate(&txns, start, &ReportPolicy::default());
    let amounts: Vec<_> = report.filtered.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![dec!(1), dec!(2), dec!(3)]);
}

#[test]
fn test_empty_input_gives_empty_report() {
    let report = aggregate(&[], dt(2024, 3, 1, 0, 0), &ReportPolicy::default());
    assert!(report.filtered.is_empty());
    assert!(report.income_by_account.is_empty());
    assert!(report.expense_by_account.is_empty());
    assert_eq!(report.income_total, Decimal::ZERO);
    assert_eq!(report.expense_excluding_savings_total, Decimal::ZERO);
    assert_eq!(report.net_excluding_savings, Decimal::ZERO);
}

#[test]
fn test_future_window_gives_empty_report() {
    let txns = vec![txn(dt(2024, 3, 5, 0, 0), dec!(100), "Checking", true)];
    let report = aggregate(&txns, dt(2030, 1, 1, 0, 0), &ReportPolicy::default());
    assert!(report.filtered.is_empty());
    assert_eq!(report.income_total, Decimal::ZERO);
}

// ── aggregate: grouping & totals ──────────────────────────────

#[test]
fn test_week_of_typical_activity() {
    // Monday 2024-03-11; paycheck Tuesday, HYSA transfer Tuesday,
    // groceries Wednesday.
    let monday = dt(2024, 3, 11, 0, 0);
    let txns = vec![
        txn(dt(2024, 3, 12, 0, 0), dec!(3000), "Checking", true),
        txn(dt(2024, 3, 12, 0, 0), dec!(500), "HYSA", false),
        txn(dt(2024, 3, 13, 0, 0), dec!(200), "Checking", false),
    ];
    let report = aggregate(&txns, monday, &ReportPolicy::default());

    assert_eq!(report.income_total, dec!(3000));
    assert_eq!(report.expense_by_account.get("HYSA"), Some(&dec!(500)));
    assert_eq!(report.expense_by_account.get("Checking"), Some(&dec!(200)));
    assert_eq!(report.expense_excluding_savings_total, dec!(200));
    assert_eq!(report.net_excluding_savings, dec!(2800));
}

#[test]
fn test_grouping_sums_per_account() {
    let start = dt(2024, 3, 1, 0, 0);
    let txns = vec![
        txn(dt(2024, 3, 2, 0, 0), dec!(100), "Checking", true),
        txn(dt(2024, 3, 3, 0, 0), dec!(50), "Checking", true),
        txn(dt(2024, 3, 4, 0, 0), dec!(25), "HYSA", true),
    ];
    let report = aggregate(&txns, start, &ReportPolicy::default());
    assert_eq!(report.income_by_account.get("Checking"), Some(&dec!(150)));
    assert_eq!(report.income_by_account.get("HYSA"), Some(&dec!(25)));
    assert_eq!(report.income_by_account.len(), 2);
}

#[test]
fn test_no_zero_filled_accounts() {
    let start = dt(2024, 3, 1, 0, 0);
    let txns = vec![txn(dt(2024, 3, 2, 0, 0), dec!(10), "Checking", false)];
    let report = aggregate(&txns, start, &ReportPolicy::default());
    assert!(report.income_by_account.is_empty());
    assert_eq!(report.expense_by_account.len(), 1);
}

#[test]
fn test_income_by_account_sums_to_income_total() {
    let start = dt(2024, 3, 1, 0, 0);
    let txns = vec![
        txn(dt(2024, 3, 2, 0, 0), dec!(100.25), "Checking", true),
        txn(dt(2024, 3, 3, 0, 0), dec!(0.75), "HYSA", true),
        txn(dt(2024, 3, 4, 0, 0), dec!(9), "ROTH", true),
        txn(dt(2024, 3, 5, 0, 0), dec!(40), "Checking", false),
    ];
    let report = aggregate(&txns, start, &ReportPolicy::default());
    let sum: Decimal = report.income_by_account.values().copied().sum();
    assert_eq!(sum, report.income_total);
    assert_eq!(sum, dec!(110));
}

#[test]
fn test_expense_by_account_includes_excluded_accounts() {
    // The per-account breakdown counts everything; only the
    // excluding-savings total drops HYSA/ROTH.
    let start = dt(2024, 3, 1, 0, 0);
    let txns = vec![
        txn(dt(2024, 3, 2, 0, 0), dec!(300), "HYSA", false),
        txn(dt(2024, 3, 3, 0, 0), dec!(150), "ROTH", false),
        txn(dt(2024, 3, 4, 0, 0), dec!(75), "Checking", false),
    ];
    let report = aggregate(&txns, start, &ReportPolicy::default());
    let breakdown_sum: Decimal = report.expense_by_account.values().copied().sum();
    assert_eq!(breakdown_sum, dec!(525));
    assert_eq!(report.expense_excluding_savings_total, dec!(75));
    assert_ne!(breakdown_sum, report.expense_excluding_savings_total);
}

#[test]
fn test_net_identity_holds() {
    let start = dt(2024, 3, 1, 0, 0);
    let txns = vec![
        txn(dt(2024, 3, 2, 0, 0), dec!(1234.56), "Checking", true),
        txn(dt(2024, 3, 3, 0, 0), dec!(78.90), "Checking", false),
        txn(dt(2024, 3, 4, 0, 0), dec!(500), "HYSA", false),
    ];
    let report = aggregate(&txns, start, &ReportPolicy::default());
    assert_eq!(
        report.net_excluding_savings,
        report.income_total - report.expense_excluding_savings_total
    );
}

#[test]
fn test_transaction_before_window_changes_nothing() {
    let start = dt(2024, 3, 11, 0, 0);
    let in_window = vec![txn(dt(2024, 3, 12, 0, 0), dec!(100), "Checking", true)];
    let mut with_old = in_window.clone();
    with_old.push(txn(dt(2024, 2, 1, 0, 0), dec!(999), "Checking", false));

    let a = aggregate(&in_window, start, &ReportPolicy::default());
    let b = aggregate(&with_old, start, &ReportPolicy::default());
    assert_eq!(a.filtered, b.filtered);
    assert_eq!(a.income_total, b.income_total);
    assert_eq!(a.expense_excluding_savings_total, b.expense_excluding_savings_total);
    assert_eq!(a.income_by_account, b.income_by_account);
    assert_eq!(a.expense_by_account, b.expense_by_account);
}

// ── ReportPolicy ──────────────────────────────────────────────

#[test]
fn test_default_policy_excludes_hysa_and_roth() {
    let policy = ReportPolicy::default();
    assert!(policy.excludes("HYSA"));
    assert!(policy.excludes("ROTH"));
    assert!(!policy.excludes("Checking"));
}

#[test]
fn test_custom_exclusion_set() {
    let start = dt(2024, 3, 1, 0, 0);
    let txns = vec![
        txn(dt(2024, 3, 2, 0, 0), dec!(100), "Brokerage", false),
        txn(dt(2024, 3, 3, 0, 0), dec!(40), "Checking", false),
    ];
    let policy = ReportPolicy::new(["Brokerage"]);
    let report = aggregate(&txns, start, &policy);
    assert_eq!(report.expense_excluding_savings_total, dec!(40));
}

#[test]
fn test_empty_exclusion_set_counts_everything() {
    let start = dt(2024, 3, 1, 0, 0);
    let txns = vec![
        txn(dt(2024, 3, 2, 0, 0), dec!(100), "HYSA", false),
        txn(dt(2024, 3, 3, 0, 0), dec!(40), "Checking", false),
    ];
    let policy = ReportPolicy::new(Vec::<String>::new());
    let report = aggregate(&txns, start, &policy);
    assert_eq!(report.expense_excluding_savings_total, dec!(140));
}

#[test]
fn test_exclusion_only_applies_to_expenses() {
    // Income posted to an excluded account still counts as income.
    let start = dt(2024, 3, 1, 0, 0);
    let txns = vec![txn(dt(2024, 3, 2, 0, 0), dec!(12), "HYSA", true)];
    let report = aggregate(&txns, start, &ReportPolicy::default());
    assert_eq!(report.income_total, dec!(12));
    assert_eq!(report.net_excluding_savings, dec!(12));
}

#[test]
fn test_exclusion_is_case_sensitive() {
    let policy = ReportPolicy::default();
    assert!(!policy.excludes("hysa"));
    assert!(!policy.excludes("Hysa"));
}
