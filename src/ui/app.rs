use anyhow::Result;
use chrono::Utc;

use crate::db::Database;
use crate::models::Transaction;
use crate::report::{aggregate, resolve_windows, ReportPolicy, WindowReport, Windows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) pending_action: Option<PendingAction>,

    // Reports
    pub(crate) policy: ReportPolicy,
    pub(crate) windows: Windows,
    pub(crate) week: WindowReport,
    pub(crate) month: WindowReport,

    // Transactions
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_count: i64,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        let policy = ReportPolicy::default();
        let windows = resolve_windows(Utc::now().naive_utc());
        let week = aggregate(&[], windows.week_start, &policy);
        let month = aggregate(&[], windows.month_start, &policy);

        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::from("Press ? for help, : for commands"),
            show_help: false,
            pending_action: None,
            policy,
            windows,
            week,
            month,
            transactions: Vec::new(),
            transaction_count: 0,
            transaction_index: 0,
            transaction_scroll: 0,
            visible_rows: 20,
        }
    }

    /// Reload the snapshot from the database and recompute both window
    /// reports. The windows themselves are re-resolved so a session left
    /// open across midnight stays current.
    pub(crate) fn refresh_all(&mut self, db: &mut Database) -> Result<()> {
        self.windows = resolve_windows(Utc::now().naive_utc());
        self.transactions = db.get_transactions()?;
        self.transaction_count = db.get_transaction_count()?;
        self.month = aggregate(&self.transactions, self.windows.month_start, &self.policy);
        self.week = aggregate(&self.transactions, self.windows.week_start, &self.policy);

        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        Ok(())
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }
}
