//! Pure functions over the transaction list that feed the summary views.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::alerts::month_spending;
use crate::models::{Budgets, Category, Transaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Summary {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) net: Decimal,
}

/// Income and expense totals for one "YYYY-MM" month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyTotals {
    pub(crate) month: String,
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetStatus {
    pub(crate) category: String,
    pub(crate) budget: Decimal,
    pub(crate) actual: Decimal,
}

impl BudgetStatus {
    pub(crate) fn is_over(&self) -> bool {
        self.actual > self.budget
    }

    /// Share of the budget spent. A zero budget divides by one.
    pub(crate) fn ratio(&self) -> Decimal {
        let denom = if self.budget.is_zero() {
            Decimal::ONE
        } else {
            self.budget
        };
        self.actual / denom
    }
}

pub(crate) fn summary(transactions: &[Transaction]) -> Summary {
    let mut s = Summary::default();
    for t in transactions {
        match t.kind {
            TransactionType::Income => s.income += t.amount,
            TransactionType::Expense => s.expenses += t.amount,
        }
    }
    s.net = s.income - s.expenses;
    s
}

/// Expense totals per category name, largest first.
pub(crate) fn spending_by_category(transactions: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(t.category.as_str()).or_default() += t.amount;
    }
    let mut result: Vec<(String, Decimal)> = totals
        .into_iter()
        .map(|(name, amount)| (name.to_string(), amount))
        .collect();
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

/// Per-month income and expenses, oldest month first.
pub(crate) fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let entry = months.entry(t.month()).or_default();
        match t.kind {
            TransactionType::Income => entry.0 += t.amount,
            TransactionType::Expense => entry.1 += t.amount,
        }
    }
    months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyTotals {
            month,
            income,
            expenses,
        })
        .collect()
}

/// Current-month spending against budget for every expense category that
/// has a positive budget, most consumed first.
pub(crate) fn budget_vs_actual(
    categories: &[Category],
    budgets: &Budgets,
    transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<BudgetStatus> {
    let mut rows: Vec<BudgetStatus> = categories
        .iter()
        .filter(|c| c.kind == TransactionType::Expense)
        .filter_map(|c| {
            let budget = budgets.get(&c.id).filter(|b| *b > Decimal::ZERO)?;
            Some(BudgetStatus {
                category: c.name.clone(),
                budget,
                actual: month_spending(transactions, &c.name, today),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.ratio().cmp(&a.ratio()));
    rows
}
