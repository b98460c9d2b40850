use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::analytics;
use crate::config::Config;
use crate::db::Store;
use crate::ledger::{available_budget_categories, Ledger};
use crate::models::{parse_amount, BudgetDraft, BudgetPeriod, Category, TransactionDraft, TransactionType};
use crate::report;

/// Everything a command needs besides its arguments.
pub(crate) struct Session<S: Store> {
    pub ledger: Ledger<S>,
    pub config: Config,
    pub today: NaiveDate,
}

/// Run one command and return the text to print.
pub(crate) fn execute<S: Store>(args: &[String], session: &mut Session<S>) -> Result<String> {
    let Some(command) = args.first() else {
        return cli_summary(&[], session);
    };
    let rest = &args[1..];

    match command.as_str() {
        "summary" | "s" => cli_summary(rest, session),
        "add" | "a" => cli_add(rest, session),
        "delete" | "rm" => cli_delete(rest, session),
        "list" | "ls" => cli_list(rest, session),
        "budgets" => cli_budgets(rest, session),
        "budget" => cli_budget_add(rest, session),
        "budget-delete" => cli_budget_delete(rest, session),
        "breakdown" => cli_breakdown(rest, session),
        "trend" => cli_trend(rest, session),
        "categories" => cli_categories(rest),
        "export" => cli_export(rest, session),
        "--help" | "-h" | "help" => Ok(usage()),
        "--version" | "-V" | "version" => Ok(format!("financeflow {}\n", env!("CARGO_PKG_VERSION"))),
        other => anyhow::bail!("Unknown command: {other}\n\n{}", usage()),
    }
}

pub(crate) fn usage() -> String {
    [
        "FinanceFlow: local-only personal finance tracker",
        "",
        "Usage: financeflow [command]",
        "",
        "Commands:",
        "  summary                                 Income, expenses and balance (default)",
        "  (summary, budgets, breakdown and trend accept --json)",
        "  add <income|expense> <amount> <category> <description>",
        "      --date <YYYY-MM-DD>                 Transaction date (default: today)",
        "  delete <id>                             Remove a transaction",
        "  list                                    List transactions, newest first",
        "      --limit <n>                         Show at most n transactions",
        "  budgets                                 Show budget progress",
        "  budget <category> <amount>              Set a budget for an expense category",
        "      --period <monthly|yearly>           Budget period (default: monthly)",
        "  budget-delete <id>                      Remove a budget",
        "  breakdown                               Expenses grouped by category",
        "  trend                                   Income and expenses per month",
        "      --months <n>                        Number of months to show",
        "  categories [income|expense]             List categories",
        "  export [path]                           Export transactions to CSV",
        "  --help, -h                              Show this help",
        "  --version, -V                           Show version",
        "",
    ]
    .join("\n")
}

/// Flags that take a value. `--json` is the only switch.
const VALUE_FLAGS: &[&str] = &["--date", "--limit", "--months", "--period"];

/// Value following `--name`, if the flag is present.
fn flag<'a>(args: &'a [String], name: &str) -> Result<Option<&'a str>> {
    let Some(pos) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    match args.get(pos + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => anyhow::bail!("{name} requires a value"),
    }
}

/// Arguments that are neither flags nor flag values.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

fn parse_count(raw: &str, name: &str) -> Result<usize> {
    raw.parse()
        .with_context(|| format!("{name} must be a whole number, got '{raw}'"))
}

fn wants_json(args: &[String]) -> bool {
    args.iter().any(|a| a == "--json")
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    out.push('\n');
    Ok(out)
}

fn cli_summary<S: Store>(args: &[String], session: &Session<S>) -> Result<String> {
    let summary = analytics::compute_summary(session.ledger.transactions(), session.today);
    if wants_json(args) {
        return to_json(&summary);
    }
    Ok(report::render_summary(&summary, session.today))
}

fn cli_add<S: Store>(args: &[String], session: &mut Session<S>) -> Result<String> {
    let pos = positional(args);
    if pos.len() < 4 {
        anyhow::bail!(
            "Usage: financeflow add <income|expense> <amount> <category> <description> [--date YYYY-MM-DD]"
        );
    }

    let category = resolve_category(pos[2]);
    let description = pos[3..].join(" ");
    let date = flag(args, "--date")?
        .map(str::to_string)
        .unwrap_or_else(|| session.today.format("%Y-%m-%d").to_string());

    let draft = TransactionDraft::parse(pos[0], pos[1], &category, &description, &date)?;
    let summary_line = format!(
        "Added {} {} · {} · {}",
        draft.kind,
        report::format_amount(draft.amount),
        draft.category,
        draft.date.format("%Y-%m-%d"),
    );
    let id = session.ledger.add_transaction(draft)?;
    Ok(format!("{summary_line}\nid: {id}\n"))
}

fn cli_delete<S: Store>(args: &[String], session: &mut Session<S>) -> Result<String> {
    let Some(id) = args.first() else {
        anyhow::bail!("Usage: financeflow delete <id>");
    };
    if session.ledger.remove_transaction(id)? {
        Ok(format!("Deleted transaction {id}\n"))
    } else {
        Ok(format!("No transaction with id {id}\n"))
    }
}

fn cli_list<S: Store>(args: &[String], session: &Session<S>) -> Result<String> {
    let limit = flag(args, "--limit")?
        .map(|raw| parse_count(raw, "--limit"))
        .transpose()?;
    let rows = analytics::recent_transactions(session.ledger.transactions(), limit);
    Ok(report::render_transactions(&rows))
}

fn cli_budgets<S: Store>(args: &[String], session: &Session<S>) -> Result<String> {
    let progress = session
        .ledger
        .budgets()
        .iter()
        .map(|b| analytics::budget_progress(b, session.ledger.transactions(), session.today))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if wants_json(args) {
        return to_json(&progress);
    }
    Ok(report::render_budgets(&progress))
}

fn cli_breakdown<S: Store>(args: &[String], session: &Session<S>) -> Result<String> {
    let transactions = session.ledger.transactions();
    let breakdown = analytics::category_breakdown(transactions);
    if wants_json(args) {
        return to_json(&breakdown);
    }
    let summary = analytics::compute_summary(transactions, session.today);
    Ok(report::render_breakdown(&breakdown, summary.total_expenses))
}

fn cli_budget_add<S: Store>(args: &[String], session: &mut Session<S>) -> Result<String> {
    let pos = positional(args);
    if pos.len() < 2 {
        anyhow::bail!("Usage: financeflow budget <category> <amount> [--period monthly|yearly]");
    }

    // Category names may contain spaces; the amount is always last.
    let amount = parse_amount(pos[pos.len() - 1])?;
    let category = resolve_category(&pos[..pos.len() - 1].join(" "));
    let period = match flag(args, "--period")? {
        Some(raw) => BudgetPeriod::parse(raw)?,
        None => BudgetPeriod::Monthly,
    };

    let draft = BudgetDraft::new(category, amount, period)?;
    if !available_budget_categories(session.ledger.budgets())
        .iter()
        .any(|c| c.name == draft.category)
    {
        anyhow::bail!("A budget for '{}' already exists", draft.category);
    }

    let line = format!(
        "Budget set: {} {} {}",
        draft.category,
        report::format_amount(draft.amount),
        draft.period
    );
    let id = session.ledger.add_budget(draft)?;
    Ok(format!("{line}\nid: {id}\n"))
}

fn cli_budget_delete<S: Store>(args: &[String], session: &mut Session<S>) -> Result<String> {
    let Some(id) = args.first() else {
        anyhow::bail!("Usage: financeflow budget-delete <id>");
    };
    if session.ledger.remove_budget(id)? {
        Ok(format!("Deleted budget {id}\n"))
    } else {
        Ok(format!("No budget with id {id}\n"))
    }
}

fn cli_trend<S: Store>(args: &[String], session: &Session<S>) -> Result<String> {
    let window = match flag(args, "--months")? {
        Some(raw) => parse_count(raw, "--months")?,
        None => session.config.trend_window,
    };
    let trend = analytics::monthly_trend(session.ledger.transactions(), window);
    if wants_json(args) {
        return to_json(&trend);
    }
    Ok(report::render_trend(&trend))
}

fn cli_categories(args: &[String]) -> Result<String> {
    let kind = args
        .first()
        .map(|raw| TransactionType::parse(raw))
        .transpose()?;
    Ok(report::render_categories(kind))
}

fn cli_export<S: Store>(args: &[String], session: &Session<S>) -> Result<String> {
    let path = match positional(args).first() {
        Some(p) => PathBuf::from(shellexpand(p)),
        None => session
            .config
            .data_dir
            .join(format!("financeflow-export-{}.csv", session.today.format("%Y-%m-%d"))),
    };
    let count = crate::export::write_csv(&path, session.ledger.transactions())?;
    if count == 0 {
        Ok("No transactions to export\n".to_string())
    } else {
        Ok(format!("Exported {count} transactions to {}\n", path.display()))
    }
}

/// Map user input onto the registry's spelling; unknown names pass through
/// so that draft validation can report them.
fn resolve_category(input: &str) -> String {
    Category::find_by_name_ignore_case(input.trim())
        .map(|c| c.name.to_string())
        .unwrap_or_else(|| input.trim().to_string())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
