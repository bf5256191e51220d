use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::db::Database;
use crate::models::{TransactionInput, DATE_FORMAT};
use crate::report::{aggregate, resolve_windows, ReportPolicy, WindowReport};
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "report" | "r" => cli_report(db),
        "add" => cli_add(&args[2..], db),
        "delete" => cli_delete(&args[2..], db),
        "list" => cli_list(&args[2..], db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("cashflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("cashflow — local-only personal finance tracker");
    println!();
    println!("Usage: cashflow [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  report                        Print this week's and this month's summary");
    println!("  add <amount> <description...> Record a transaction");
    println!("    --account <name>            Account to post to (default: Checking)");
    println!("    --category <name>           Category label (default: Uncategorized)");
    println!("    --income                    Record as income instead of expense");
    println!("    --date <YYYY-MM-DD>         Backdate the transaction (default: now)");
    println!("  delete <id>                   Delete a transaction by id");
    println!("  list [n]                      Show the n most recent transactions (default 20)");
    println!("  export [path]                 Export all transactions to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_report(db: &mut Database) -> Result<()> {
    let now = Utc::now().naive_utc();
    let windows = resolve_windows(now);
    let txns = db.get_transactions()?;
    let policy = ReportPolicy::default();

    let week = aggregate(&txns, windows.week_start, &policy);
    let month = aggregate(&txns, windows.month_start, &policy);

    print_window("This Week", &week);
    println!();
    print_window("This Month", &month);
    Ok(())
}

fn print_window(label: &str, report: &WindowReport) {
    println!(
        "{label} (since {})",
        report.window_start.format("%Y-%m-%d")
    );
    println!("{}", "─".repeat(44));
    println!("  {:<26}{}", "Income:", format_amount(report.income_total));
    println!(
        "  {:<26}{}",
        "Spending (excl. savings):",
        format_amount(report.expense_excluding_savings_total)
    );
    println!(
        "  {:<26}{}",
        "Net:",
        format_amount(report.net_excluding_savings)
    );

    if !report.income_by_account.is_empty() {
        println!();
        println!("  Income by account:");
        for (account, total) in &report.income_by_account {
            println!("    {account:<20} {}", format_amount(*total));
        }
    }
    if !report.expense_by_account.is_empty() {
        println!();
        println!("  Expenses by account:");
        for (account, total) in &report.expense_by_account {
            println!("    {account:<20} {}", format_amount(*total));
        }
    }
    println!("  Transactions: {}", report.filtered.len());
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        bail!("Usage: cashflow add <amount> <description...> [--account <name>] [--category <name>] [--income] [--date <YYYY-MM-DD>]");
    }

    let mut input = TransactionInput {
        amount: args[0].clone(),
        ..Default::default()
    };
    let mut description_words: Vec<String> = Vec::new();

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--account" => {
                input.account = iter
                    .next()
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("--account needs a value"))?;
            }
            "--category" => {
                input.category = iter
                    .next()
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("--category needs a value"))?;
            }
            "--income" => input.is_income = true,
            "--date" => {
                let raw = iter
                    .next()
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("--date needs a value"))?;
                input.date = Some(parse_date_arg(&raw)?);
            }
            word => description_words.push(word.to_string()),
        }
    }
    input.description = description_words.join(" ");

    let txn = input.validate(Utc::now().naive_utc())?;
    let kind = if txn.is_income { "income" } else { "expense" };
    let id = db.insert_transaction(&txn)?;
    println!(
        "Added #{id}: {kind} {} to {} on {} ({})",
        format_amount(txn.amount),
        txn.account,
        txn.date.format("%Y-%m-%d"),
        txn.description
    );
    Ok(())
}

fn parse_date_arg(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, DATE_FORMAT) {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    bail!("Invalid date: {raw} (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)")
}

fn cli_delete(args: &[String], db: &mut Database) -> Result<()> {
    let Some(raw) = args.first() else {
        bail!("Usage: cashflow delete <id>");
    };
    let id: i64 = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("Not a transaction id: {raw}"))?;
    db.delete_transaction(id)?;
    println!("Deleted transaction #{id}");
    Ok(())
}

fn cli_list(args: &[String], db: &mut Database) -> Result<()> {
    let limit: usize = args
        .first()
        .and_then(|a| a.parse().ok())
        .unwrap_or(20);

    let txns = db.get_transactions()?;
    if txns.is_empty() {
        println!("No transactions yet. Add one with: cashflow add <amount> <description>");
        return Ok(());
    }

    println!(
        "{:>6}  {:<16}  {:<28}  {:<14}  {:<12}  {:>12}",
        "id", "date", "description", "category", "account", "amount"
    );
    for txn in txns.iter().take(limit) {
        let sign = if txn.is_income { "+" } else { "-" };
        println!(
            "{:>6}  {:<16}  {:<28}  {:<14}  {:<12}  {:>12}",
            txn.id.unwrap_or_default(),
            txn.date.format("%Y-%m-%d %H:%M"),
            crate::ui::util::truncate(&txn.description, 28),
            crate::ui::util::truncate(&txn.category, 14),
            crate::ui::util::truncate(&txn.account, 12),
            format!("{sign}{}", format_amount(txn.amount)),
        );
    }
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/cashflow-export.csv")
        });

    let count = db.export_to_csv(&output_path)?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}
