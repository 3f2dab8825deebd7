//! Domain error types. Command handlers wrap these in `anyhow`.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV file is empty")]
    Empty,

    #[error("CSV headers must include \"Date\", \"Description\", and \"Amount\" (missing: {})", .0.join(", "))]
    MissingHeaders(Vec<String>),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum CategoryError {
    #[error("Category name cannot be empty")]
    EmptyName,

    #[error("Category \"{name}\" of type \"{kind}\" already exists")]
    Duplicate { name: String, kind: String },

    #[error("Category not found: {0}")]
    NotFound(String),

    #[error("Built-in category \"{0}\" cannot be deleted")]
    BuiltIn(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum BudgetError {
    #[error("Budget amount cannot be negative: {0}")]
    Negative(Decimal),
}

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Please add at least {required} transactions to get meaningful insights (have {actual})")]
    NotEnoughData { required: usize, actual: usize },

    #[error("Insights service is not configured (set OLLAMA_HOST or [insights] host)")]
    NotConfigured,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Insights service returned an empty response")]
    EmptyResponse,
}
