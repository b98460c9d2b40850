use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, TransactionType, MAX_AMOUNT};
use crate::error::FinanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BudgetPeriod {
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub(crate) fn parse(s: &str) -> Result<Self, FinanceError> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" | "y" => Ok(Self::Yearly),
            _ => Err(FinanceError::parse("budget period", s)),
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending ceiling for one expense category.
///
/// Spending against the budget is never stored here; see
/// `analytics::compute_budget_spent`. Older saved data may carry a `spent`
/// key, which serde skips on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Budget {
    pub id: String,
    pub category: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetDraft {
    pub category: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub color: String,
}

impl BudgetDraft {
    pub(crate) fn new(
        category: String,
        amount: Decimal,
        period: BudgetPeriod,
    ) -> Result<Self, FinanceError> {
        if amount <= Decimal::ZERO {
            return Err(FinanceError::validation(
                "Budget amount must be greater than zero",
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(FinanceError::validation(format!(
                "Budget amount cannot exceed {MAX_AMOUNT}"
            )));
        }
        let cat = Category::find_by_name(&category)
            .filter(|c| c.kind == TransactionType::Expense)
            .ok_or_else(|| {
                FinanceError::validation(format!("Not an expense category: {category}"))
            })?;

        Ok(Self {
            color: cat.color.to_string(),
            category,
            amount,
            period,
        })
    }
}
