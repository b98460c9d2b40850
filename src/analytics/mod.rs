//! Derived figures computed from the transaction and budget collections.
//!
//! Every function here is a fresh O(n) scan. Nothing is cached, because the
//! "current month" window moves with the calendar. Callers pass `today`
//! explicitly so the window is fixed for the duration of one computation.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::FinanceError;
use crate::models::{Budget, BudgetPeriod, Category, Transaction, TransactionType};

/// Number of months shown by the trend when no window is configured.
pub(crate) const DEFAULT_TREND_WINDOW: usize = 6;

const WARNING_THRESHOLD: Decimal = Decimal::from_parts(70, 0, 0, false, 0);
const OVER_THRESHOLD: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub monthly_balance: Decimal,
}

fn same_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

fn in_period(date: NaiveDate, period: BudgetPeriod, today: NaiveDate) -> bool {
    match period {
        BudgetPeriod::Monthly => same_month(date, today),
        BudgetPeriod::Yearly => date.year() == today.year(),
    }
}

pub(crate) fn compute_summary(transactions: &[Transaction], today: NaiveDate) -> FinancialSummary {
    let mut summary = FinancialSummary::default();

    for txn in transactions {
        let this_month = same_month(txn.date, today);
        match txn.kind {
            TransactionType::Income => {
                summary.total_income += txn.amount;
                if this_month {
                    summary.monthly_income += txn.amount;
                }
            }
            TransactionType::Expense => {
                summary.total_expenses += txn.amount;
                if this_month {
                    summary.monthly_expenses += txn.amount;
                }
            }
        }
    }

    summary.balance = summary.total_income - summary.total_expenses;
    summary.monthly_balance = summary.monthly_income - summary.monthly_expenses;
    summary
}

/// Expense total for the budget's category inside its current period window.
pub(crate) fn compute_budget_spent(
    budget: &Budget,
    transactions: &[Transaction],
    today: NaiveDate,
) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .filter(|t| t.category == budget.category)
        .filter(|t| in_period(t.date, budget.period, today))
        .map(|t| t.amount)
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BudgetHealth {
    Good,
    Warning,
    Over,
}

impl BudgetHealth {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BudgetStatus {
    pub status: BudgetHealth,
    /// Unclamped; may exceed 100.
    pub percentage_used: Decimal,
}

impl BudgetStatus {
    /// Value for a progress bar, capped at 100.
    pub(crate) fn progress(&self) -> Decimal {
        self.percentage_used.min(ONE_HUNDRED)
    }
}

pub(crate) fn budget_status(spent: Decimal, limit: Decimal) -> Result<BudgetStatus, FinanceError> {
    if limit <= Decimal::ZERO {
        return Err(FinanceError::InvalidBudget(limit));
    }

    let percentage_used = spent
        .checked_mul(ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(limit))
        .ok_or_else(|| {
            FinanceError::validation(format!(
                "Spending of {spent} is out of range for a limit of {limit}"
            ))
        })?;
    let status = if percentage_used < WARNING_THRESHOLD {
        BudgetHealth::Good
    } else if percentage_used < OVER_THRESHOLD {
        BudgetHealth::Warning
    } else {
        BudgetHealth::Over
    };

    Ok(BudgetStatus {
        status,
        percentage_used,
    })
}

/// Everything the budget view shows for one budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BudgetProgress {
    pub budget: Budget,
    pub spent: Decimal,
    pub status: BudgetStatus,
    pub remaining: Decimal,
    pub over_by: Decimal,
}

pub(crate) fn budget_progress(
    budget: &Budget,
    transactions: &[Transaction],
    today: NaiveDate,
) -> Result<BudgetProgress, FinanceError> {
    let spent = compute_budget_spent(budget, transactions, today);
    let status = budget_status(spent, budget.amount)?;
    Ok(BudgetProgress {
        budget: budget.clone(),
        spent,
        status,
        remaining: (budget.amount - spent).max(Decimal::ZERO),
        over_by: (spent - budget.amount).max(Decimal::ZERO),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub color: &'static str,
    /// Percent of all expenses, `0..=100`.
    pub share: Decimal,
}

/// Expense totals per category, largest first.
pub(crate) fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut grand_total = Decimal::ZERO;

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        grand_total += txn.amount;
        match totals.iter_mut().find(|c| c.category == txn.category) {
            Some(existing) => existing.amount += txn.amount,
            None => totals.push(CategoryTotal {
                category: txn.category.clone(),
                amount: txn.amount,
                color: Category::color_for(&txn.category),
                share: Decimal::ZERO,
            }),
        }
    }

    if grand_total > Decimal::ZERO {
        for c in &mut totals {
            c.share = c.amount / grand_total * ONE_HUNDRED;
        }
    }

    // Stable sort: equal totals keep first-seen order.
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub(crate) struct MonthlyTotals {
    /// `YYYY-MM`
    pub period: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Income/expense per calendar month, ascending, limited to the latest
/// `window` months that actually contain transactions.
pub(crate) fn monthly_trend(transactions: &[Transaction], window: usize) -> Vec<MonthlyTotals> {
    let mut by_month: BTreeMap<(i32, u32), MonthlyTotals> = BTreeMap::new();

    for txn in transactions {
        let entry = by_month
            .entry((txn.date.year(), txn.date.month()))
            .or_insert_with(|| MonthlyTotals {
                period: txn.date.format("%Y-%m").to_string(),
                ..Default::default()
            });
        match txn.kind {
            TransactionType::Income => entry.income += txn.amount,
            TransactionType::Expense => entry.expense += txn.amount,
        }
    }

    let skip = by_month.len().saturating_sub(window);
    by_month.into_values().skip(skip).collect()
}

/// Transactions for the list view: newest date first, then newest entry.
pub(crate) fn recent_transactions(transactions: &[Transaction], limit: Option<usize>) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    if let Some(limit) = limit {
        sorted.truncate(limit);
    }
    sorted
}
