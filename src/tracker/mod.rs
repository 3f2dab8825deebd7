//! In-memory finance state backed by JSON snapshots in the key-value store.
//!
//! Every mutation rewrites the affected snapshot, the same way each list
//! was persisted wholesale on change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, info};
use uuid::Uuid;

use crate::alerts::{check_budget_crossing, BudgetAlert};
use crate::db::{Database, KEY_BUDGETS, KEY_CUSTOM_CATEGORIES, KEY_TRANSACTIONS};
use crate::error::{BudgetError, CategoryError, ImportError};
use crate::import::{parse_statement, SkippedRow};
use crate::models::{default_categories, Budgets, Category, Transaction, TransactionType};

/// Result of pushing a CSV statement through the normal insert path.
#[derive(Debug, Default)]
pub(crate) struct ImportOutcome {
    pub(crate) imported: usize,
    pub(crate) skipped: Vec<SkippedRow>,
    pub(crate) alerts: Vec<BudgetAlert>,
}

pub(crate) struct Tracker {
    db: Database,
    transactions: Vec<Transaction>,
    custom_categories: Vec<Category>,
    budgets: Budgets,
}

impl Tracker {
    pub(crate) fn open(db: Database) -> Self {
        let transactions: Vec<Transaction> = db.load(KEY_TRANSACTIONS);
        let custom_categories: Vec<Category> = db.load(KEY_CUSTOM_CATEGORIES);
        let budgets: Budgets = db.load(KEY_BUDGETS);
        debug!(
            transactions = transactions.len(),
            custom_categories = custom_categories.len(),
            budgets = budgets.len(),
            "loaded state"
        );
        Self {
            db,
            transactions,
            custom_categories,
            budgets,
        }
    }

    // ── Transactions ──────────────────────────────────────────

    /// Newest first.
    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Record a transaction at the front of the list. Returns an alert if
    /// this expense pushed its category over the monthly budget.
    pub(crate) fn add_transaction(
        &mut self,
        txn: Transaction,
        today: NaiveDate,
    ) -> Option<BudgetAlert> {
        let alert = self
            .budget_for_category_name(&txn.category)
            .and_then(|budget| check_budget_crossing(&self.transactions, &txn, budget, today));
        if let Some(alert) = &alert {
            info!("{alert}");
        }

        debug!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "adding transaction");
        self.transactions.insert(0, txn);
        self.save_transactions();
        alert
    }

    /// Remove the transaction with `id`. Others keep their order.
    pub(crate) fn delete_transaction(&mut self, id: Uuid) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            self.save_transactions();
        }
        removed
    }

    /// Replace the stored transaction that has the same id.
    pub(crate) fn update_transaction(&mut self, updated: Transaction) -> bool {
        match self.transactions.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                self.save_transactions();
                true
            }
            None => false,
        }
    }

    /// Parse a CSV statement and add every valid row.
    pub(crate) fn import_statement(
        &mut self,
        text: &str,
        today: NaiveDate,
    ) -> Result<ImportOutcome, ImportError> {
        let report = parse_statement(text)?;
        let mut outcome = ImportOutcome {
            imported: report.transactions.len(),
            skipped: report.skipped,
            alerts: Vec::new(),
        };
        for txn in report.transactions {
            if let Some(alert) = self.add_transaction(txn, today) {
                outcome.alerts.push(alert);
            }
        }
        info!(
            imported = outcome.imported,
            skipped = outcome.skipped.len(),
            "statement import finished"
        );
        Ok(outcome)
    }

    fn save_transactions(&self) {
        self.db.save(KEY_TRANSACTIONS, &self.transactions);
    }

    // ── Categories ────────────────────────────────────────────

    /// Built-in categories followed by custom ones, deduplicated by id.
    pub(crate) fn all_categories(&self) -> Vec<Category> {
        let mut seen = HashSet::new();
        default_categories()
            .into_iter()
            .chain(self.custom_categories.iter().cloned())
            .filter(|c| seen.insert(c.id.clone()))
            .collect()
    }

    pub(crate) fn custom_categories(&self) -> &[Category] {
        &self.custom_categories
    }

    pub(crate) fn find_category(&self, name: &str, kind: Option<TransactionType>) -> Option<Category> {
        let all = self.all_categories();
        Category::find_by_name(&all, name, kind)
            .or_else(|| Category::find_by_name_ignore_case(&all, name, kind))
            .cloned()
    }

    pub(crate) fn add_custom_category(
        &mut self,
        name: &str,
        kind: TransactionType,
    ) -> Result<Category, CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if Category::find_by_name_ignore_case(&self.all_categories(), name, Some(kind)).is_some() {
            return Err(CategoryError::Duplicate {
                name: name.to_string(),
                kind: kind.to_string(),
            });
        }

        let category = Category::new_custom(name, kind, self.custom_categories.len());
        self.custom_categories.push(category.clone());
        self.db.save(KEY_CUSTOM_CATEGORIES, &self.custom_categories);
        Ok(category)
    }

    /// Delete a custom category by id. Budgets and transactions that refer
    /// to it are left untouched.
    pub(crate) fn delete_custom_category(&mut self, id: &str) -> Result<Category, CategoryError> {
        let Some(pos) = self.custom_categories.iter().position(|c| c.id == id) else {
            return Err(match Category::find_by_id(&default_categories(), id) {
                Some(builtin) => CategoryError::BuiltIn(builtin.name.clone()),
                None => CategoryError::NotFound(id.to_string()),
            });
        };
        let removed = self.custom_categories.remove(pos);
        self.db.save(KEY_CUSTOM_CATEGORIES, &self.custom_categories);
        Ok(removed)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    pub(crate) fn budget_for(&self, category_id: &str) -> Option<Decimal> {
        self.budgets.get(category_id)
    }

    pub(crate) fn set_budget(&mut self, category_id: &str, limit: Decimal) -> Result<(), BudgetError> {
        self.budgets.set(category_id, limit)?;
        self.db.save(KEY_BUDGETS, &self.budgets);
        Ok(())
    }

    pub(crate) fn remove_budget(&mut self, category_id: &str) -> Option<Decimal> {
        let removed = self.budgets.remove(category_id);
        if removed.is_some() {
            self.db.save(KEY_BUDGETS, &self.budgets);
        }
        removed
    }

    /// Budget for the expense category a transaction names. Transactions
    /// refer to categories by name, so the first expense category with that
    /// name supplies the budget.
    pub(crate) fn budget_for_category_name(&self, name: &str) -> Option<Decimal> {
        let all = self.all_categories();
        let category = Category::find_by_name(&all, name, Some(TransactionType::Expense))?;
        self.budgets.get(&category.id)
    }
}
