use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

const HEADERS: [&str; 6] = ["date", "type", "category", "description", "amount", "id"];

/// Write transactions to a CSV file, newest first. Returns the row count.
pub(crate) fn write_csv(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_to(file, transactions)?;
    tracing::info!(path = %path.display(), count, "transactions exported");
    Ok(count)
}

pub(crate) fn write_to<W: Write>(writer: W, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)
        .context("Failed to write CSV header")?;

    let rows = crate::analytics::recent_transactions(transactions, None);
    for txn in &rows {
        let date = txn.date.format("%Y-%m-%d").to_string();
        let amount = format!("{:.2}", txn.amount.round_dp(2));
        wtr.write_record([
            date.as_str(),
            txn.kind.as_str(),
            txn.category.as_str(),
            txn.description.as_str(),
            amount.as_str(),
            txn.id.as_str(),
        ])
        .context("Failed to write CSV record")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(rows.len())
}
