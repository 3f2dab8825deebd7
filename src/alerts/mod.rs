//! Budget-threshold check run when an expense is recorded.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::Transaction;

/// Raised once, at the moment a category's monthly spending first goes over
/// its budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetAlert {
    pub(crate) category: String,
    pub(crate) budget: Decimal,
    pub(crate) total: Decimal,
}

impl std::fmt::Display for BudgetAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Budget exceeded for {}: spent ${:.2} of ${:.2} this month",
            self.category, self.total, self.budget
        )
    }
}

/// First and last day of the calendar month containing `day`.
pub(crate) fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day.with_day(1).unwrap_or(day);
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next_month
        .and_then(|d| d.pred_opt())
        .unwrap_or(start);
    (start, end)
}

/// Sum of expenses in `category` dated within the month containing `today`.
pub(crate) fn month_spending(
    transactions: &[Transaction],
    category: &str,
    today: NaiveDate,
) -> Decimal {
    let (start, end) = month_bounds(today);
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.category == category)
        .filter(|t| (start..=end).contains(&t.day()))
        .map(|t| t.amount)
        .sum()
}

/// Decide whether adding `new_txn` to `existing` pushes its category over
/// `budget` for the month containing `today`.
///
/// Fires only on the crossing: spending must be at or under the budget
/// before and over it after.
pub(crate) fn check_budget_crossing(
    existing: &[Transaction],
    new_txn: &Transaction,
    budget: Decimal,
    today: NaiveDate,
) -> Option<BudgetAlert> {
    if !new_txn.is_expense() {
        return None;
    }

    let before = month_spending(existing, &new_txn.category, today);
    let (start, end) = month_bounds(today);
    let after = if (start..=end).contains(&new_txn.day()) {
        before + new_txn.amount
    } else {
        before
    };

    if before <= budget && after > budget {
        Some(BudgetAlert {
            category: new_txn.category.clone(),
            budget,
            total: after,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests;
