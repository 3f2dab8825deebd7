//! AI budget advice.
//!
//! The transaction history is flattened to `{category, date, amount, type}`
//! records, serialized as a JSON array and handed to a text-generation
//! backend. The reply is returned verbatim.

mod ollama;

pub(crate) use ollama::OllamaBackend;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::error::InsightsError;
use crate::models::{Transaction, TransactionType};

/// Below this many transactions the advice is not worth asking for.
pub(crate) const MIN_TRANSACTIONS: usize = 5;

pub(crate) type Result<T> = std::result::Result<T, InsightsError>;

/// A text-generation service that turns a transaction history into advice.
pub(crate) trait InsightsBackend {
    fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct HistoryEntry<'a> {
    category: &'a str,
    date: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(rename = "type")]
    kind: TransactionType,
}

/// JSON array of the fields the advisor needs.
pub(crate) fn transaction_history_json(transactions: &[Transaction]) -> Result<String> {
    let entries: Vec<HistoryEntry<'_>> = transactions
        .iter()
        .map(|t| HistoryEntry {
            category: &t.category,
            date: t.date,
            amount: t.amount,
            kind: t.kind,
        })
        .collect();
    Ok(serde_json::to_string(&entries)?)
}

pub(crate) fn build_prompt(transaction_history: &str) -> String {
    format!(
        "You are a personal finance advisor. Analyze the user's transaction history \
         and provide personalized insights and recommendations on how to save money.\n\n\
         Transaction History:\n{transaction_history}\n\n\
         Provide specific and actionable advice."
    )
}

/// Ask `backend` for advice on `transactions`.
pub(crate) fn budget_insights(
    backend: &dyn InsightsBackend,
    transactions: &[Transaction],
) -> Result<String> {
    if transactions.len() < MIN_TRANSACTIONS {
        return Err(InsightsError::NotEnoughData {
            required: MIN_TRANSACTIONS,
            actual: transactions.len(),
        });
    }

    let history = transaction_history_json(transactions)?;
    info!(transactions = transactions.len(), "requesting budget insights");
    let insights = backend.generate(&build_prompt(&history))?;
    let insights = insights.trim();
    if insights.is_empty() {
        return Err(InsightsError::EmptyResponse);
    }
    Ok(insights.to_string())
}
