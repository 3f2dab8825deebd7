use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::models::Transaction;

const HEADERS: [&str; 5] = ["Date", "Description", "Category", "Type", "Amount"];

/// Default download name: `transactions_<YYYY-MM-DD>.csv`.
pub(crate) fn export_file_name(today: NaiveDate) -> String {
    format!("transactions_{}.csv", today.format("%Y-%m-%d"))
}

/// Render transactions as CSV in list order. Returns `None` when there is
/// nothing to export.
///
/// Cells containing a comma, quote or newline are quoted, with inner quotes
/// doubled.
pub(crate) fn to_csv(transactions: &[Transaction]) -> Result<Option<String>> {
    if transactions.is_empty() {
        return Ok(None);
    }

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(HEADERS)?;
    for txn in transactions {
        wtr.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            txn.description.clone(),
            txn.category.clone(),
            txn.kind.as_str().to_string(),
            format!("{:.2}", txn.amount),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
    let text = String::from_utf8(bytes).context("Exported CSV is not valid UTF-8")?;
    Ok(Some(text))
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
