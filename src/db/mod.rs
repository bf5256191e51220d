mod schema;

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{Transaction, DATE_FORMAT};

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions (date, description, amount, category, is_income, account, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                txn.date.format(DATE_FORMAT).to_string(),
                txn.description,
                txn.amount.to_string(),
                txn.category,
                txn.is_income,
                txn.account,
                chrono::Utc::now().naive_utc().format(DATE_FORMAT).to_string(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Full snapshot, newest first. The report engine re-filters this
    /// per window, so one read serves both the week and month views.
    pub(crate) fn get_transactions(&self) -> Result<Vec<Transaction>> {
        self.query_transactions(
            "SELECT id, date, description, amount, category, is_income, account
             FROM transactions ORDER BY date DESC, id DESC",
            &[],
        )
    }

    pub(crate) fn get_transactions_since(&self, bound: NaiveDateTime) -> Result<Vec<Transaction>> {
        let bound_str = bound.format(DATE_FORMAT).to_string();
        self.query_transactions(
            "SELECT id, date, description, amount, category, is_income, account
             FROM transactions WHERE date >= ?1 ORDER BY date DESC, id DESC",
            &[&bound_str],
        )
    }

    fn query_transactions(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::types::ToSql],
    ) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| {
            let date_str: String = row.get(1)?;
            let amount_str: String = row.get(3)?;
            Ok(Transaction {
                id: Some(row.get(0)?),
                date: NaiveDateTime::parse_from_str(&date_str, DATE_FORMAT).unwrap_or_default(),
                description: row.get(2)?,
                amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                category: row.get(4)?,
                is_income: row.get(5)?,
                account: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    /// Delete by id. A missing id is an error, not a no-op.
    pub(crate) fn delete_transaction(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if changed == 0 {
            bail!("transaction {id} not found");
        }
        Ok(())
    }

    // ── Export ────────────────────────────────────────────────

    pub(crate) fn export_to_csv(&self, path: &str) -> Result<usize> {
        let txns = self.get_transactions()?;
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create export file: {path}"))?;

        writer.write_record(["id", "date", "description", "amount", "category", "is_income", "account"])?;
        for txn in &txns {
            writer.write_record([
                txn.id.map(|i| i.to_string()).unwrap_or_default(),
                txn.date.format(DATE_FORMAT).to_string(),
                txn.description.clone(),
                txn.amount.to_string(),
                txn.category.clone(),
                txn.is_income.to_string(),
                txn.account.clone(),
            ])?;
        }
        writer.flush()?;
        Ok(txns.len())
    }
}
