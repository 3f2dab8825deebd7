use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::error;
use uuid::Uuid;

use super::format::{format_amount, progress_bar, truncate};
use crate::alerts::{month_spending, BudgetAlert};
use crate::analytics;
use crate::args::{BudgetAction, CategoryAction, Command};
use crate::config::Config;
use crate::insights::{budget_insights, OllamaBackend};
use crate::models::{normalize_amount, Category, Transaction, TransactionType};
use crate::tracker::Tracker;

pub(crate) fn as_cli(command: Command, tracker: &mut Tracker, config: &Config) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    match command {
        Command::Add {
            kind,
            category,
            amount,
            date,
            description,
        } => cli_add(tracker, kind, &category, amount, date, description, today),
        Command::List { month, limit } => cli_list(tracker, month.as_deref(), limit),
        Command::Edit {
            id,
            kind,
            category,
            amount,
            date,
            description,
        } => cli_edit(tracker, id, kind, category, amount, date, description),
        Command::Delete { id } => cli_delete(tracker, id),
        Command::Import { file } => cli_import(tracker, &file, today),
        Command::Export { path } => cli_export(tracker, path, today),
        Command::Summary => cli_summary(tracker, today),
        Command::Categories { action } => cli_categories(tracker, action),
        Command::Budget { action } => cli_budget(tracker, action, today),
        Command::Insights => cli_insights(tracker, config),
    }
}

fn print_alert(alert: &BudgetAlert) {
    println!("⚠ {alert}");
}

/// Midnight UTC of `day`. Stored dates only carry day precision from the CLI.
fn day_start(day: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}

// ── Transactions ──────────────────────────────────────────────

fn resolve_category(tracker: &Tracker, name: &str, kind: TransactionType) -> Result<String> {
    tracker
        .find_category(name, Some(kind))
        .map(|c| c.name)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown {kind} category '{name}'. See `financeflow categories` for the list"
            )
        })
}

fn cli_add(
    tracker: &mut Tracker,
    kind: TransactionType,
    category: &str,
    amount: Decimal,
    date: Option<NaiveDate>,
    description: String,
    today: NaiveDate,
) -> Result<()> {
    let category = resolve_category(tracker, category, kind)?;
    let txn = Transaction::new(
        kind,
        category,
        amount,
        day_start(date.unwrap_or(today)),
        description.trim().to_string(),
    );

    let label = if txn.is_income() { "Income" } else { "Expense" };
    println!(
        "{label} of {} for {} added ({})",
        format_amount(txn.amount),
        txn.category,
        txn.id
    );
    if let Some(alert) = tracker.add_transaction(txn, today) {
        print_alert(&alert);
    }
    Ok(())
}

fn cli_list(tracker: &Tracker, month: Option<&str>, limit: Option<usize>) -> Result<()> {
    let rows: Vec<&Transaction> = tracker
        .transactions()
        .iter()
        .filter(|t| month.map_or(true, |m| t.month() == m))
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if rows.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<36}  {:<10}  {:<7}  {:<20}  {:>12}  Description",
        "ID", "Date", "Type", "Category", "Amount"
    );
    println!("{}", "─".repeat(110));
    for t in rows {
        println!(
            "{:<36}  {:<10}  {:<7}  {:<20}  {:>12}  {}",
            t.id,
            t.day(),
            t.kind,
            truncate(&t.category, 20),
            format_amount(t.signed_amount()),
            truncate(&t.description, 30),
        );
    }
    Ok(())
}

fn cli_edit(
    tracker: &mut Tracker,
    id: Uuid,
    kind: Option<TransactionType>,
    category: Option<String>,
    amount: Option<Decimal>,
    date: Option<NaiveDate>,
    description: Option<String>,
) -> Result<()> {
    let mut txn = tracker
        .transaction(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Transaction not found: {id}"))?;

    if let Some(kind) = kind {
        txn.kind = kind;
    }
    // a type change must land in a category of the new type
    if kind.is_some() || category.is_some() {
        let name = category.unwrap_or_else(|| txn.category.clone());
        txn.category = resolve_category(tracker, &name, txn.kind)?;
    }
    if let Some(amount) = amount {
        txn.amount = normalize_amount(amount);
    }
    if let Some(date) = date {
        txn.date = day_start(date);
    }
    if let Some(description) = description {
        txn.description = description.trim().to_string();
    }

    tracker.update_transaction(txn);
    println!("Updated {id}");
    Ok(())
}

fn cli_delete(tracker: &mut Tracker, id: Uuid) -> Result<()> {
    let description = tracker
        .transaction(id)
        .map(|t| t.description.clone())
        .ok_or_else(|| anyhow::anyhow!("Transaction not found: {id}"))?;
    tracker.delete_transaction(id);
    println!("Deleted: {}", if description.is_empty() { id.to_string() } else { description });
    Ok(())
}

// ── CSV ───────────────────────────────────────────────────────

fn cli_import(tracker: &mut Tracker, file: &Path, today: NaiveDate) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Could not read file: {}", file.display()))?;

    let outcome = tracker
        .import_statement(&text, today)
        .context("Upload failed")?;

    if outcome.imported == 0 {
        println!("No transactions found: the file was processed but no valid rows were found");
    } else {
        println!("{} transaction(s) imported successfully", outcome.imported);
    }
    if !outcome.skipped.is_empty() {
        println!("{} row(s) skipped:", outcome.skipped.len());
        for row in &outcome.skipped {
            println!("  line {}: {}", row.line, row.reason);
        }
    }
    for alert in &outcome.alerts {
        print_alert(alert);
    }
    Ok(())
}

fn cli_export(tracker: &Tracker, path: Option<PathBuf>, today: NaiveDate) -> Result<()> {
    let Some(csv) = crate::export::to_csv(tracker.transactions())? else {
        println!("No transactions to export");
        return Ok(());
    };
    let path = path.unwrap_or_else(|| PathBuf::from(crate::export::export_file_name(today)));
    std::fs::write(&path, csv)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!(
        "Exported {} transactions to {}",
        tracker.transactions().len(),
        path.display()
    );
    Ok(())
}

// ── Summary ───────────────────────────────────────────────────

fn cli_summary(tracker: &Tracker, today: NaiveDate) -> Result<()> {
    let transactions = tracker.transactions();
    let totals = analytics::summary(transactions);

    println!("FinanceFlow: {}", today.format("%B %Y"));
    println!("{}", "─".repeat(40));
    println!("  Income:     +{}", format_amount(totals.income));
    println!("  Expenses:   -{}", format_amount(totals.expenses));
    println!("  Net:         {}", format_amount(totals.net));
    println!("  Total Txns:  {}", transactions.len());

    let spending = analytics::spending_by_category(transactions);
    if !spending.is_empty() {
        println!();
        println!("Spending by Category:");
        for (name, amount) in &spending {
            println!("  {:<24} {:>12}", truncate(name, 24), format_amount(*amount));
        }
    }

    let months = analytics::monthly_totals(transactions);
    if !months.is_empty() {
        println!();
        println!("Income vs Expenses:");
        for m in &months {
            println!(
                "  {}   +{:>12}   -{:>12}",
                m.month,
                format_amount(m.income),
                format_amount(m.expenses)
            );
        }
    }

    print_budget_status(tracker, today);
    Ok(())
}

fn print_budget_status(tracker: &Tracker, today: NaiveDate) {
    let rows = analytics::budget_vs_actual(
        &tracker.all_categories(),
        tracker.budgets(),
        tracker.transactions(),
        today,
    );
    if rows.is_empty() {
        return;
    }
    println!();
    println!("Budget vs Actual ({}):", today.format("%Y-%m"));
    for row in &rows {
        println!(
            "  {:<24} {} {:>12} / {:<12}{}",
            truncate(&row.category, 24),
            progress_bar(row.ratio(), 20),
            format_amount(row.actual),
            format_amount(row.budget),
            if row.is_over() { "  OVER" } else { "" }
        );
    }
}

// ── Categories ────────────────────────────────────────────────

fn cli_categories(tracker: &mut Tracker, action: Option<CategoryAction>) -> Result<()> {
    match action.unwrap_or(CategoryAction::List) {
        CategoryAction::List => {
            let all = tracker.all_categories();
            for kind in [TransactionType::Expense, TransactionType::Income] {
                println!("{}:", if kind == TransactionType::Expense { "Expense" } else { "Income" });
                for c in all.iter().filter(|c| c.kind == kind) {
                    if c.is_custom {
                        println!("  {:<24} (custom, id {})", c.name, c.id);
                    } else {
                        println!("  {c}");
                    }
                }
            }
            Ok(())
        }
        CategoryAction::Add { name, kind } => {
            let category = tracker.add_custom_category(&name, kind)?;
            println!("Added {} category '{}' ({})", category.kind, category.name, category.id);
            Ok(())
        }
        CategoryAction::Delete { category } => {
            let id = Category::find_by_name_ignore_case(tracker.custom_categories(), &category, None)
                .map(|c| c.id.clone())
                .unwrap_or(category);
            let removed = tracker.delete_custom_category(&id)?;
            println!("Deleted category '{}'", removed.name);
            Ok(())
        }
    }
}

// ── Budgets ───────────────────────────────────────────────────

fn expense_category(tracker: &Tracker, name: &str) -> Result<Category> {
    tracker
        .find_category(name, Some(TransactionType::Expense))
        .ok_or_else(|| anyhow::anyhow!("Unknown expense category '{name}'"))
}

fn cli_budget(tracker: &mut Tracker, action: Option<BudgetAction>, today: NaiveDate) -> Result<()> {
    match action.unwrap_or(BudgetAction::List) {
        BudgetAction::List => {
            if tracker.budgets().is_empty() {
                println!("No budgets set");
                return Ok(());
            }
            let all = tracker.all_categories();
            for (id, limit) in tracker.budgets().iter() {
                match Category::find_by_id(&all, id) {
                    Some(c) => {
                        let spent = month_spending(tracker.transactions(), &c.name, today);
                        println!(
                            "  {:<24} {:>12} budget   {:>12} spent this month",
                            truncate(&c.name, 24),
                            format_amount(limit),
                            format_amount(spent)
                        );
                    }
                    // category was deleted, the limit stays behind
                    None => println!(
                        "  {:<24} {:>12} budget   (deleted category)",
                        truncate(id, 24),
                        format_amount(limit)
                    ),
                }
            }
            Ok(())
        }
        BudgetAction::Set { category, amount } => {
            let category = expense_category(tracker, &category)?;
            tracker.set_budget(&category.id, amount)?;
            println!("Budget for {} set to {}", category.name, format_amount(amount));
            Ok(())
        }
        BudgetAction::Remove { category } => {
            let category = expense_category(tracker, &category)?;
            match tracker.remove_budget(&category.id) {
                Some(_) => println!("Budget for {} removed", category.name),
                None => println!("No budget set for {}", category.name),
            }
            Ok(())
        }
    }
}

// ── Insights ──────────────────────────────────────────────────

fn cli_insights(tracker: &Tracker, config: &Config) -> Result<()> {
    let backend = OllamaBackend::from_config(&config.insights)?;
    match budget_insights(&backend, tracker.transactions()) {
        Ok(advice) => {
            println!("AI Budget Advisor");
            println!("{}", "─".repeat(40));
            println!("{advice}");
            Ok(())
        }
        Err(e) => {
            error!("Failed to get AI insights: {e}");
            Err(e).context("Sorry, we couldn't generate insights at this time. Please try again later")
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
