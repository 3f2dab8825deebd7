//! Command-line argument definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use uuid::Uuid;

use crate::import::parse_decimal;
use crate::models::TransactionType;

/// FinanceFlow - track income, expenses and monthly budgets locally
#[derive(Parser, Debug)]
#[command(name = "financeflow")]
#[command(about = "Local-only personal finance tracker", long_about = None)]
#[command(version)]
pub(crate) struct Args {
    /// Directory holding financeflow.db (overrides config and FINANCEFLOW_DATA_DIR)
    #[arg(long, global = true)]
    pub(crate) data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Record an income or expense
    Add {
        #[arg(short = 't', long = "type", value_enum, default_value_t = TransactionType::Expense)]
        kind: TransactionType,

        /// Category name
        #[arg(short, long)]
        category: String,

        /// Positive amount
        #[arg(short, long, value_parser = positive_amount)]
        amount: Decimal,

        /// Date as YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// List transactions, newest first
    #[command(alias = "ls")]
    List {
        /// Only show this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Show at most this many rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Replace fields of an existing transaction
    Edit {
        id: Uuid,

        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<TransactionType>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long, value_parser = positive_amount)]
        amount: Option<Decimal>,

        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a transaction by id
    #[command(alias = "rm")]
    Delete { id: Uuid },

    /// Import a CSV bank statement (needs Date, Description and Amount columns)
    Import { file: PathBuf },

    /// Export all transactions to CSV
    Export {
        /// Output path (default: ./transactions_<today>.csv)
        path: Option<PathBuf>,
    },

    /// Totals, spending by category, monthly trend and budget status
    #[command(alias = "s")]
    Summary,

    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoryAction>,
    },

    /// Manage monthly budgets
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Ask the AI advisor for savings advice
    Insights,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CategoryAction {
    /// List built-in and custom categories
    List,
    /// Create a custom category
    Add {
        name: String,
        #[arg(short = 't', long = "type", value_enum, default_value_t = TransactionType::Expense)]
        kind: TransactionType,
    },
    /// Delete a custom category by id or name
    Delete { category: String },
}

#[derive(Subcommand, Debug)]
pub(crate) enum BudgetAction {
    /// Show budgets and this month's spending
    List,
    /// Set the monthly limit for an expense category
    Set {
        category: String,
        #[arg(value_parser = non_negative_amount)]
        amount: Decimal,
    },
    /// Remove the limit for an expense category
    Remove { category: String },
}

fn positive_amount(s: &str) -> Result<Decimal, String> {
    let amount = parse_decimal(s).map_err(|e| e.to_string())?;
    if amount <= Decimal::ZERO {
        return Err("amount must be positive".into());
    }
    Ok(amount)
}

fn non_negative_amount(s: &str) -> Result<Decimal, String> {
    let amount = parse_decimal(s).map_err(|e| e.to_string())?;
    if amount < Decimal::ZERO {
        return Err("budget cannot be negative".into());
    }
    Ok(amount)
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
