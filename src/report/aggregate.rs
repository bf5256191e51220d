use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::Transaction;

/// Accounts excluded from the net-expense calculation, typically
/// savings and retirement accounts whose "expenses" are transfers
/// rather than spending.
#[derive(Debug, Clone)]
pub struct ReportPolicy {
    excluded_accounts: HashSet<String>,
}

impl ReportPolicy {
    pub fn new<I, S>(excluded_accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_accounts: excluded_accounts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn excludes(&self, account: &str) -> bool {
        self.excluded_accounts.contains(account)
    }
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self::new(["HYSA", "ROTH"])
    }
}

/// Everything the presentation layer needs for one report window.
#[derive(Debug, Clone)]
pub struct WindowReport {
    pub window_start: NaiveDateTime,
    /// Transactions with `date >= window_start`, newest first.
    /// Same-instant transactions keep their input order.
    pub filtered: Vec<Transaction>,
    /// Group-by sums: accounts with no matching transactions are absent,
    /// never zero-filled.
    pub income_by_account: BTreeMap<String, Decimal>,
    pub expense_by_account: BTreeMap<String, Decimal>,
    pub income_total: Decimal,
    /// Expenses whose account the policy does not exclude.
    pub expense_excluding_savings_total: Decimal,
    pub net_excluding_savings: Decimal,
}

/// Filter a transaction snapshot by a window start and reduce it to
/// per-account sums and totals. Pure function over the given slice;
/// called once per window with no shared state between calls.
pub fn aggregate(
    transactions: &[Transaction],
    window_start: NaiveDateTime,
    policy: &ReportPolicy,
) -> WindowReport {
    let mut filtered: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.date >= window_start)
        .cloned()
        .collect();
    // sort_by is stable, so equal dates keep insertion order.
    filtered.sort_by(|a, b| b.date.cmp(&a.date));

    let mut income_by_account: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut expense_by_account: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut income_total = Decimal::ZERO;
    let mut expense_excluding_savings_total = Decimal::ZERO;

    for txn in &filtered {
        if txn.is_income {
            *income_by_account
                .entry(txn.account.clone())
                .or_insert(Decimal::ZERO) += txn.amount;
            income_total += txn.amount;
        } else {
            *expense_by_account
                .entry(txn.account.clone())
                .or_insert(Decimal::ZERO) += txn.amount;
            if !policy.excludes(&txn.account) {
                expense_excluding_savings_total += txn.amount;
            }
        }
    }

    WindowReport {
        window_start,
        filtered,
        income_by_account,
        expense_by_account,
        income_total,
        expense_excluding_savings_total,
        net_excluding_savings: income_total - expense_excluding_savings_total,
    }
}
