mod budget;
mod category;
mod transaction;

pub(crate) use budget::{Budget, BudgetDraft, BudgetPeriod};
pub(crate) use category::Category;
pub(crate) use transaction::{
    parse_amount, Transaction, TransactionDraft, TransactionType, MAX_AMOUNT,
};
