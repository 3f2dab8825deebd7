use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::ImportError;
use crate::models::{Transaction, TransactionType, MAX_AMOUNT, STATEMENT_IMPORT_CATEGORY};

/// Outcome of parsing a statement. `transactions` may be empty.
#[derive(Debug, Default)]
pub(crate) struct ImportReport {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) skipped: Vec<SkippedRow>,
}

/// A data row that was dropped. `line` is 1-based and counts the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SkippedRow {
    pub(crate) line: usize,
    pub(crate) reason: String,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    description: usize,
    amount: usize,
    category: Option<usize>,
    kind: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, ImportError> {
        let normalized: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| normalized.iter().position(|h| h == name);

        let (date, description, amount) = match (find("date"), find("description"), find("amount")) {
            (Some(d), Some(desc), Some(a)) => (d, desc, a),
            (d, desc, a) => {
                let missing = [("Date", d), ("Description", desc), ("Amount", a)]
                    .into_iter()
                    .filter(|(_, idx)| idx.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect();
                return Err(ImportError::MissingHeaders(missing));
            }
        };

        Ok(Self {
            date,
            description,
            amount,
            category: find("category"),
            kind: find("type"),
        })
    }

    fn required_len(&self) -> usize {
        self.date.max(self.description).max(self.amount) + 1
    }
}

/// Parse a CSV bank statement.
///
/// The first row must be a header naming `date`, `description` and `amount`
/// (any case, any order); otherwise nothing is imported. Bad data rows are
/// skipped and reported without stopping the import.
pub(crate) fn parse_statement(text: &str) -> Result<ImportReport, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut records = rdr.records();
    let header: Vec<String> = loop {
        match records.next() {
            None => return Err(ImportError::Empty),
            Some(record) => {
                let record = record?;
                let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                if row.iter().all(|f| f.trim().is_empty()) {
                    continue;
                }
                break row;
            }
        }
    };
    let columns = Columns::from_header(&header)?;

    let mut report = ImportReport::default();
    for record in records {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
                skip(&mut report, line, format!("unreadable row: {e}"));
                continue;
            }
        };
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        if row.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        match parse_row(&row, &columns) {
            Ok(txn) => report.transactions.push(txn),
            Err(reason) => skip(&mut report, line, reason),
        }
    }

    debug!(
        imported = report.transactions.len(),
        skipped = report.skipped.len(),
        "parsed statement"
    );
    Ok(report)
}

fn skip(report: &mut ImportReport, line: usize, reason: String) {
    warn!("Skipping row {line}: {reason}");
    report.skipped.push(SkippedRow { line, reason });
}

fn parse_row(row: &[String], columns: &Columns) -> Result<Transaction, String> {
    if row.len() < columns.required_len() {
        return Err(format!(
            "expected at least {} columns, found {}",
            columns.required_len(),
            row.len()
        ));
    }

    let date_str = row[columns.date].trim();
    let description = row[columns.description].trim();
    let amount_str = row[columns.amount].trim();
    if date_str.is_empty() || description.is_empty() || amount_str.is_empty() {
        return Err("missing date, description or amount".into());
    }

    let date = parse_date(date_str).map_err(|_| format!("invalid date '{date_str}'"))?;
    let amount = parse_decimal(amount_str).map_err(|_| format!("invalid amount '{amount_str}'"))?;

    let cell = |idx: Option<usize>| {
        idx.and_then(|i| row.get(i))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    };
    let kind = cell(columns.kind)
        .and_then(TransactionType::parse)
        .unwrap_or_else(|| TransactionType::from_signed(amount));
    let category = cell(columns.category).unwrap_or(STATEMENT_IMPORT_CATEGORY);

    Ok(Transaction::new(
        kind,
        category.to_string(),
        amount,
        date,
        description.to_string(),
    ))
}

/// Parse a timestamp or a plain date. Plain dates land on midnight UTC.
///
/// Timestamps with an offset keep their wall-clock date and time, so the
/// stored day is the day printed on the statement.
pub(crate) fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local().and_utc());
    }
    for fmt in &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            if let Some(midnight) = d.and_hms_opt(0, 0, 0) {
                return Ok(midnight.and_utc());
            }
        }
    }
    anyhow::bail!("Could not parse date: {}", s)
}

pub(crate) fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ','], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        anyhow::bail!("Empty amount");
    }
    let amount = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_str(&cleaned.replace('"', "")))
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .with_context(|| format!("Failed to parse '{}' as decimal", s))?;
    if amount.abs() > MAX_AMOUNT {
        anyhow::bail!("Amount out of range: {}", s.trim());
    }
    Ok(amount)
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
