use rust_decimal::Decimal;

/// Domain errors raised by draft construction and budget classification.
///
/// Removing an id that is not present is deliberately absent from this list:
/// removal is a no-op in that case.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub(crate) enum FinanceError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Budget limit must be greater than zero (got {0})")]
    InvalidBudget(Decimal),
    #[error("Could not parse {field} from '{value}'")]
    Parse { field: &'static str, value: String },
}

impl FinanceError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn parse(field: &'static str, value: &str) -> Self {
        Self::Parse {
            field,
            value: value.to_string(),
        }
    }
}
