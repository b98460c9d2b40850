//! Plain-text views for the CLI. Everything here formats values computed by
//! `analytics`; no sums or date comparisons happen in this module.

mod util;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt::Write;

use crate::analytics::{BudgetProgress, CategoryTotal, FinancialSummary, MonthlyTotals};
use crate::models::{Category, Transaction, TransactionType};

pub(crate) use util::{format_amount, month_label, progress_bar, truncate};

const RULE_WIDTH: usize = 48;
const BAR_WIDTH: usize = 20;

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

pub(crate) fn render_summary(summary: &FinancialSummary, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "FinanceFlow — {}", today.format("%B %Y"));
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{:<14}{:>16}{:>16}", "", "This month", "All time");
    let rows = [
        ("Income", summary.monthly_income, summary.total_income),
        ("Expenses", summary.monthly_expenses, summary.total_expenses),
        ("Balance", summary.monthly_balance, summary.balance),
    ];
    for (label, month, total) in rows {
        let _ = writeln!(
            out,
            "  {label:<12}{:>16}{:>16}",
            format_amount(month),
            format_amount(total)
        );
    }
    out
}

pub(crate) fn render_budgets(progress: &[BudgetProgress]) -> String {
    if progress.is_empty() {
        return "No budgets set yet. Use `financeflow budget <category> <amount>` to add one.\n"
            .to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Budgets");
    let _ = writeln!(out, "{}", rule());
    for p in progress {
        let _ = writeln!(
            out,
            "  {:<18} {:<8} {} {:>4}%  {}",
            truncate(&p.budget.category, 18),
            p.budget.period.as_str(),
            progress_bar(p.status.progress(), BAR_WIDTH),
            p.status.percentage_used.round_dp(0).to_string(),
            p.status.status.as_str(),
        );
        let tail = if p.over_by > Decimal::ZERO {
            format!("{} over budget", format_amount(p.over_by))
        } else {
            format!("{} remaining", format_amount(p.remaining))
        };
        let _ = writeln!(
            out,
            "    Spent {} of {} · {tail}",
            format_amount(p.spent),
            format_amount(p.budget.amount),
        );
        let _ = writeln!(out, "    id: {}", p.budget.id);
    }
    out
}

/// `total` is the all-time expense total from `compute_summary`.
pub(crate) fn render_breakdown(breakdown: &[CategoryTotal], total: Decimal) -> String {
    if breakdown.is_empty() {
        return "No expense data available\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Expenses by Category");
    let _ = writeln!(out, "{}", rule());
    for c in breakdown {
        let _ = writeln!(
            out,
            "  {:<20} {:>14} {:>5}%",
            truncate(&c.category, 20),
            format_amount(c.amount),
            c.share.round_dp(1).to_string(),
        );
    }
    let _ = writeln!(out, "  {:<20} {:>14}", "Total", format_amount(total));
    out
}

pub(crate) fn render_trend(trend: &[MonthlyTotals]) -> String {
    if trend.is_empty() {
        return "No transaction data available\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Monthly Trend");
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "  {:<10}{:>16}{:>16}", "Month", "Income", "Expenses");
    for m in trend {
        let _ = writeln!(
            out,
            "  {:<10}{:>16}{:>16}",
            month_label(&m.period),
            format_amount(m.income),
            format_amount(m.expense),
        );
    }
    out
}

pub(crate) fn render_transactions(transactions: &[&Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions yet\n".to_string();
    }

    let mut out = String::new();
    for txn in transactions {
        let signed = if txn.is_income() { txn.amount } else { -txn.amount };
        let _ = writeln!(
            out,
            "{}  {:<24} {:<18} {:>14}  {}",
            txn.date.format("%Y-%m-%d"),
            truncate(&txn.description, 24),
            truncate(&txn.category, 18),
            format_amount(signed),
            txn.id,
        );
    }
    out
}

pub(crate) fn render_categories(kind: Option<TransactionType>) -> String {
    let mut out = String::new();
    for cat in Category::all()
        .iter()
        .filter(|c| kind.map_or(true, |k| c.kind == k))
    {
        let _ = writeln!(
            out,
            "  {:>2}  {:<20} {:<8} {:<8} {}",
            cat.id,
            cat.name,
            cat.kind.as_str(),
            cat.color,
            cat.icon
        );
    }
    out
}

#[cfg(test)]
mod tests;
