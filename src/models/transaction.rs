use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Storage format for timestamps. Lexicographic order matches
/// chronological order, which the date index relies on.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) const DEFAULT_DESCRIPTION: &str = "No description";
pub(crate) const DEFAULT_CATEGORY: &str = "Uncategorized";
pub(crate) const DEFAULT_ACCOUNT: &str = "Checking";

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub date: NaiveDateTime,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub is_income: bool,
    pub account: String,
}

impl Transaction {
    /// Amount with a display sign attached: income positive, expense negative.
    /// The stored amount is always a magnitude; direction lives in `is_income`.
    pub fn signed_amount(&self) -> Decimal {
        if self.is_income {
            self.amount
        } else {
            -self.amount
        }
    }
}

/// Raw, unvalidated fields as they arrive from the command line or a
/// `:`-command. `validate` is the only way to turn this into a `Transaction`.
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub date: Option<NaiveDateTime>,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub is_income: bool,
    pub account: String,
}

impl TransactionInput {
    /// Validate and apply field defaults. The amount must parse as a decimal
    /// and be a non-negative magnitude; every other field falls back to a
    /// default instead of being rejected. `now` fills in a missing date.
    pub fn validate(self, now: NaiveDateTime) -> Result<Transaction> {
        let raw = self.amount.trim().to_string();
        let amount = match Decimal::from_str(&raw) {
            Ok(a) => a,
            Err(_) => bail!("invalid amount: '{raw}' is not a number"),
        };
        if amount.is_sign_negative() {
            bail!("invalid amount: '{raw}' must be a positive magnitude");
        }

        Ok(Transaction {
            id: None,
            date: self.date.unwrap_or(now),
            description: non_empty_or(self.description, DEFAULT_DESCRIPTION),
            amount,
            category: non_empty_or(self.category, DEFAULT_CATEGORY),
            is_income: self.is_income,
            account: non_empty_or(self.account, DEFAULT_ACCOUNT),
        })
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
