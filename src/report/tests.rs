#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::analytics::{budget_progress, category_breakdown, compute_summary, monthly_trend};
use crate::models::{Budget, BudgetPeriod};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn txn(id: &str, kind: TransactionType, amount: Decimal, category: &str, on: &str) -> Transaction {
    Transaction {
        id: id.into(),
        kind,
        amount,
        category: category.into(),
        description: format!("{category} entry"),
        date: date(on),
        created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        txn("t1", TransactionType::Income, dec!(1000), "Salary", "2024-01-15"),
        txn("t2", TransactionType::Expense, dec!(200), "Food & Dining", "2024-01-20"),
    ]
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_exact_width() {
    assert_eq!(truncate("hello", 5), "hello");
    assert_eq!(truncate("hello!", 5), "hell…");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
}

#[test]
fn test_format_amount_negative_rounding_to_zero_drops_sign() {
    assert_eq!(format_amount(dec!(-0.001)), "$0.00");
    assert_eq!(format_amount(dec!(-999.999)), "-$1,000.00");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(10000000.00)), "$10,000,000.00");
}

#[test]
fn test_format_amount_rounds_long_fractions() {
    assert_eq!(format_amount(dec!(133.3333)), "$133.33");
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
}

// ── progress_bar / month_label ────────────────────────────────

#[test]
fn test_progress_bar_fill() {
    assert_eq!(progress_bar(dec!(0), 4), "[░░░░]");
    assert_eq!(progress_bar(dec!(50), 4), "[██░░]");
    assert_eq!(progress_bar(dec!(100), 4), "[████]");
}

#[test]
fn test_progress_bar_clamps() {
    assert_eq!(progress_bar(dec!(250), 4), "[████]");
    assert_eq!(progress_bar(dec!(-10), 4), "[░░░░]");
}

#[test]
fn test_month_label() {
    assert_eq!(month_label("2024-03"), "Mar 2024");
    assert_eq!(month_label("garbage"), "garbage");
}

// ── Views ─────────────────────────────────────────────────────

#[test]
fn test_render_summary() {
    let today = date("2024-01-25");
    let out = render_summary(&compute_summary(&sample(), today), today);
    assert!(out.starts_with("FinanceFlow — January 2024"));
    assert!(out.contains("$1,000.00"));
    assert!(out.contains("$800.00"));
}

#[test]
fn test_render_budgets_over() {
    let budget = Budget {
        id: "b1".into(),
        category: "Food & Dining".into(),
        amount: dec!(150),
        period: BudgetPeriod::Monthly,
        color: "#ef4444".into(),
    };
    let progress = budget_progress(&budget, &sample(), date("2024-01-25")).unwrap();
    let out = render_budgets(&[progress]);
    assert!(out.contains("133%"));
    assert!(out.contains("over"));
    assert!(out.contains("$50.00 over budget"));
    assert!(out.contains("id: b1"));
}

#[test]
fn test_render_budgets_empty() {
    assert!(render_budgets(&[]).starts_with("No budgets set yet"));
}

#[test]
fn test_render_breakdown() {
    let txns = sample();
    let total = compute_summary(&txns, date("2024-01-25")).total_expenses;
    let out = render_breakdown(&category_breakdown(&txns), total);
    assert!(out.contains("Food & Dining"));
    assert!(out.contains("100%"));
    assert!(out.contains("$200.00"));
    assert!(!out.contains("Salary"));
    assert_eq!(
        render_breakdown(&[], Decimal::ZERO),
        "No expense data available\n"
    );
}

#[test]
fn test_render_trend() {
    let out = render_trend(&monthly_trend(&sample(), 6));
    assert!(out.contains("Jan 2024"));
    assert_eq!(render_trend(&[]), "No transaction data available\n");
}

#[test]
fn test_render_transactions_signs_expenses() {
    let txns = sample();
    let refs: Vec<&Transaction> = txns.iter().collect();
    let out = render_transactions(&refs);
    assert!(out.contains("-$200.00"));
    assert!(out.contains("$1,000.00"));
    assert!(out.contains("t2"));
}

#[test]
fn test_render_categories_filter() {
    let income = render_categories(Some(TransactionType::Income));
    assert!(income.contains("Salary"));
    assert!(!income.contains("Travel"));
    assert_eq!(render_categories(None).lines().count(), 15);
}
