mod transaction;

pub use transaction::{Transaction, TransactionInput};
pub(crate) use transaction::DATE_FORMAT;

#[cfg(test)]
mod tests;
