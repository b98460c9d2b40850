//! Commands that add and remove transactions and budgets.
//!
//! The free functions are pure: they take the current collection and return a
//! new one. `Ledger` wraps them with a `Store` so that every command rewrites
//! the affected key.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::db::{Store, BUDGETS_KEY, TRANSACTIONS_KEY};
use crate::models::{
    Budget, BudgetDraft, Category, Transaction, TransactionDraft, TransactionType, MAX_AMOUNT,
};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn add_transaction(
    transactions: &[Transaction],
    draft: TransactionDraft,
) -> (Vec<Transaction>, String) {
    let id = new_id();
    let mut next = Vec::with_capacity(transactions.len() + 1);
    next.extend_from_slice(transactions);
    next.push(Transaction {
        id: id.clone(),
        kind: draft.kind,
        amount: draft.amount,
        category: draft.category,
        description: draft.description,
        date: draft.date,
        created_at: Utc::now(),
    });
    (next, id)
}

/// Removing an id that is not present returns an unchanged copy.
pub(crate) fn remove_transaction(transactions: &[Transaction], id: &str) -> Vec<Transaction> {
    transactions.iter().filter(|t| t.id != id).cloned().collect()
}

/// Duplicate categories are not checked here; see `available_budget_categories`.
pub(crate) fn add_budget(budgets: &[Budget], draft: BudgetDraft) -> (Vec<Budget>, String) {
    let id = new_id();
    let mut next = Vec::with_capacity(budgets.len() + 1);
    next.extend_from_slice(budgets);
    next.push(Budget {
        id: id.clone(),
        category: draft.category,
        amount: draft.amount,
        period: draft.period,
        color: draft.color,
    });
    (next, id)
}

pub(crate) fn remove_budget(budgets: &[Budget], id: &str) -> Vec<Budget> {
    budgets.iter().filter(|b| b.id != id).cloned().collect()
}

/// Expense categories that do not have a budget yet.
pub(crate) fn available_budget_categories(budgets: &[Budget]) -> Vec<&'static Category> {
    Category::for_type(TransactionType::Expense)
        .filter(|c| !budgets.iter().any(|b| b.category == c.name))
        .collect()
}

/// The persisted collections plus the store they came from.
pub(crate) struct Ledger<S: Store> {
    store: S,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

impl<S: Store> Ledger<S> {
    pub(crate) fn load(store: S) -> Result<Self> {
        let transactions: Vec<Transaction> = store.load(TRANSACTIONS_KEY)?;
        let budgets: Vec<Budget> = store.load(BUDGETS_KEY)?;

        // Stored data may come from another client; amounts outside the
        // range drafts accept would overflow the aggregates.
        if let Some(bad) = transactions
            .iter()
            .find(|t| t.amount < Decimal::ZERO || t.amount > MAX_AMOUNT)
        {
            anyhow::bail!(
                "Stored transaction {} has an out-of-range amount: {}",
                bad.id,
                bad.amount
            );
        }
        if let Some(bad) = budgets.iter().find(|b| b.amount > MAX_AMOUNT) {
            anyhow::bail!(
                "Stored budget {} has an out-of-range amount: {}",
                bad.id,
                bad.amount
            );
        }

        tracing::debug!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            "ledger loaded"
        );
        Ok(Self {
            store,
            transactions,
            budgets,
        })
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub(crate) fn add_transaction(&mut self, draft: TransactionDraft) -> Result<String> {
        let (next, id) = add_transaction(&self.transactions, draft);
        self.store.save(TRANSACTIONS_KEY, &next)?;
        self.transactions = next;
        tracing::info!(%id, "transaction added");
        Ok(id)
    }

    /// Returns whether anything was removed. Saves either way.
    pub(crate) fn remove_transaction(&mut self, id: &str) -> Result<bool> {
        let next = remove_transaction(&self.transactions, id);
        let removed = next.len() != self.transactions.len();
        self.store.save(TRANSACTIONS_KEY, &next)?;
        self.transactions = next;
        if removed {
            tracing::info!(id, "transaction removed");
        }
        Ok(removed)
    }

    pub(crate) fn add_budget(&mut self, draft: BudgetDraft) -> Result<String> {
        let (next, id) = add_budget(&self.budgets, draft);
        self.store.save(BUDGETS_KEY, &next)?;
        self.budgets = next;
        tracing::info!(%id, "budget added");
        Ok(id)
    }

    pub(crate) fn remove_budget(&mut self, id: &str) -> Result<bool> {
        let next = remove_budget(&self.budgets, id);
        let removed = next.len() != self.budgets.len();
        self.store.save(BUDGETS_KEY, &next)?;
        self.budgets = next;
        if removed {
            tracing::info!(id, "budget removed");
        }
        Ok(removed)
    }

    #[cfg(test)]
    pub(crate) fn into_store(self) -> S {
        self.store
    }
}
