use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Category;
use crate::error::FinanceError;

/// Largest amount a transaction or budget may carry (one trillion). Totals
/// over any realistic number of entries stay far inside `Decimal`'s range.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub(crate) fn parse(s: &str) -> Result<Self, FinanceError> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            _ => Err(FinanceError::parse("transaction type", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Always non-negative; direction comes from `kind`.
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

/// A validated, not yet persisted transaction.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionDraft {
    pub kind: TransactionType,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl TransactionDraft {
    pub(crate) fn new(
        kind: TransactionType,
        amount: Decimal,
        category: String,
        description: String,
        date: NaiveDate,
    ) -> Result<Self, FinanceError> {
        if amount < Decimal::ZERO {
            return Err(FinanceError::validation("Amount cannot be negative"));
        }
        if amount > MAX_AMOUNT {
            return Err(FinanceError::validation(format!(
                "Amount cannot exceed {MAX_AMOUNT}"
            )));
        }
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(FinanceError::validation("Description cannot be empty"));
        }
        let Some(cat) = Category::find_by_name(&category) else {
            return Err(FinanceError::validation(format!(
                "Unknown category: {category}"
            )));
        };
        if cat.kind != kind {
            return Err(FinanceError::validation(format!(
                "Category '{}' is not an {} category",
                cat.name, kind
            )));
        }

        Ok(Self {
            kind,
            amount,
            category,
            description,
            date,
        })
    }

    /// Build a draft from raw form/command-line input.
    ///
    /// Dates must be `YYYY-MM-DD`. Amounts may carry a leading `$` and
    /// thousands separators.
    pub(crate) fn parse(
        kind: &str,
        amount: &str,
        category: &str,
        description: &str,
        date: &str,
    ) -> Result<Self, FinanceError> {
        let kind = TransactionType::parse(kind)?;
        let amount = parse_amount(amount)?;
        let date = parse_date(date)?;
        Self::new(
            kind,
            amount,
            category.to_string(),
            description.to_string(),
            date,
        )
    }
}

pub(crate) fn parse_amount(s: &str) -> Result<Decimal, FinanceError> {
    let cleaned = s.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return Err(FinanceError::validation("Amount is required"));
    }
    Decimal::from_str(&cleaned).map_err(|_| FinanceError::parse("amount", s))
}

fn parse_date(s: &str) -> Result<NaiveDate, FinanceError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| FinanceError::parse("date", s))
}
