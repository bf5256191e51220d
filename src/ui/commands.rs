use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::Utc;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::models::TransactionInput;
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit cashflow", cmd_quit, r);
    register_command!("quit", "Quit cashflow", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add 12.50 lunch @Checking #Food, +income for income)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add transaction (e.g. :a 3000 paycheck +income)",
        cmd_add,
        r
    );
    register_command!(
        "delete",
        "Delete transaction by id, or the selected one (e.g. :delete 42)",
        cmd_delete,
        r
    );
    register_command!(
        "export",
        "Export all transactions to CSV (e.g. :export ~/txns.csv)",
        cmd_export,
        r
    );
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn execute(raw: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(());
    }
    let (name, args) = raw.split_once(' ').unwrap_or((raw, ""));
    match COMMANDS.get(name) {
        Some(cmd) => (cmd.run)(args.trim(), app, db),
        None => {
            app.status_message = format!("Unknown command: {name} (try :help)");
            Ok(())
        }
    }
}

// ── Command implementations ───────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

/// `:add <amount> <description...> [@account] [#category] [+income]`
/// Amount is the only required field; everything else has a default.
fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let mut parts = args.split_whitespace();
    let Some(amount) = parts.next() else {
        app.status_message =
            "Usage: :add <amount> <description> [@account] [#category] [+income]".into();
        return Ok(());
    };

    let mut input = TransactionInput {
        amount: amount.to_string(),
        ..Default::default()
    };
    let mut description_words: Vec<&str> = Vec::new();
    for token in parts {
        if let Some(account) = token.strip_prefix('@') {
            input.account = account.to_string();
        } else if let Some(category) = token.strip_prefix('#') {
            input.category = category.to_string();
        } else if token == "+income" || token == "+i" {
            input.is_income = true;
        } else {
            description_words.push(token);
        }
    }
    input.description = description_words.join(" ");

    match input.validate(Utc::now().naive_utc()) {
        Ok(txn) => {
            let kind = if txn.is_income { "income" } else { "expense" };
            let summary = format!(
                "Added {kind} {} to {} ({})",
                format_amount(txn.amount),
                txn.account,
                txn.description
            );
            db.insert_transaction(&txn)?;
            app.refresh_all(db)?;
            app.status_message = summary;
        }
        // Validation failures are user feedback, not program errors.
        Err(e) => app.status_message = e.to_string(),
    }
    Ok(())
}

/// `:delete [id]` — with no id, targets the transaction under the cursor.
/// Either way the delete goes through the confirm prompt.
fn cmd_delete(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let target = if args.is_empty() {
        app.selected_transaction()
            .and_then(|t| t.id.map(|id| (id, t.description.clone())))
    } else {
        match args.parse::<i64>() {
            Ok(id) => {
                let description = app
                    .transactions
                    .iter()
                    .find(|t| t.id == Some(id))
                    .map(|t| t.description.clone())
                    .unwrap_or_else(|| format!("id {id}"));
                Some((id, description))
            }
            Err(_) => {
                app.status_message = format!("Not a transaction id: {args}");
                return Ok(());
            }
        }
    };

    match target {
        Some((id, description)) => {
            app.pending_action = Some(PendingAction::DeleteTransaction { id, description });
            app.input_mode = InputMode::Confirm;
        }
        None => app.status_message = "No transaction selected".into(),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/cashflow-export.csv")
    } else {
        args.to_string()
    };
    match db.export_to_csv(&path) {
        Ok(count) => app.status_message = format!("Exported {count} transactions to {path}"),
        Err(e) => app.status_message = format!("Export failed: {e}"),
    }
    Ok(())
}
