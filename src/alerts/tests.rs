#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::TransactionType;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(category: &str, amount: Decimal, date: NaiveDate) -> Transaction {
    Transaction::new(
        TransactionType::Expense,
        category.into(),
        amount,
        Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap()),
        "test".into(),
    )
}

// ── month_bounds ──────────────────────────────────────────────

#[test]
fn test_month_bounds_mid_month() {
    assert_eq!(month_bounds(day(2024, 3, 15)), (day(2024, 3, 1), day(2024, 3, 31)));
}

#[test]
fn test_month_bounds_leap_february() {
    assert_eq!(month_bounds(day(2024, 2, 10)), (day(2024, 2, 1), day(2024, 2, 29)));
}

#[test]
fn test_month_bounds_december() {
    assert_eq!(month_bounds(day(2023, 12, 31)), (day(2023, 12, 1), day(2023, 12, 31)));
}

// ── month_spending ────────────────────────────────────────────

#[test]
fn test_month_spending_filters_category_month_and_type() {
    let today = day(2024, 5, 20);
    let mut income = expense("Groceries", dec!(1000), day(2024, 5, 2));
    income.kind = TransactionType::Income;
    let txns = vec![
        expense("Groceries", dec!(10), day(2024, 5, 1)),
        expense("Groceries", dec!(20), day(2024, 5, 31)),
        expense("Groceries", dec!(40), day(2024, 4, 30)),
        expense("Travel", dec!(80), day(2024, 5, 10)),
        income,
    ];
    assert_eq!(month_spending(&txns, "Groceries", today), dec!(30));
}

// ── check_budget_crossing ─────────────────────────────────────

#[test]
fn test_crossing_over_budget_alerts() {
    let today = day(2024, 5, 20);
    let txn = expense("Groceries", dec!(100.01), today);
    let alert = check_budget_crossing(&[], &txn, dec!(100), today).unwrap();
    assert_eq!(alert.category, "Groceries");
    assert_eq!(alert.budget, dec!(100));
    assert_eq!(alert.total, dec!(100.01));
}

#[test]
fn test_under_budget_no_alert() {
    let today = day(2024, 5, 20);
    let txn = expense("Groceries", dec!(99.99), today);
    assert!(check_budget_crossing(&[], &txn, dec!(100), today).is_none());
}

#[test]
fn test_exactly_at_budget_no_alert() {
    let today = day(2024, 5, 20);
    let txn = expense("Groceries", dec!(100), today);
    assert!(check_budget_crossing(&[], &txn, dec!(100), today).is_none());
}

#[test]
fn test_already_over_budget_no_repeat() {
    let today = day(2024, 5, 20);
    let first = expense("Groceries", dec!(150), day(2024, 5, 3));
    let second = expense("Groceries", dec!(5), today);
    assert!(check_budget_crossing(&[first], &second, dec!(100), today).is_none());
}

#[test]
fn test_crossing_counts_prior_spending() {
    let today = day(2024, 5, 20);
    let prior = vec![
        expense("Groceries", dec!(60), day(2024, 5, 3)),
        expense("Groceries", dec!(30), day(2024, 5, 9)),
    ];
    let txn = expense("Groceries", dec!(20), today);
    let alert = check_budget_crossing(&prior, &txn, dec!(100), today).unwrap();
    assert_eq!(alert.total, dec!(110));
}

#[test]
fn test_zero_budget_any_expense_alerts() {
    let today = day(2024, 5, 20);
    let txn = expense("Travel", dec!(0.01), today);
    assert!(check_budget_crossing(&[], &txn, Decimal::ZERO, today).is_some());
}

#[test]
fn test_income_never_alerts() {
    let today = day(2024, 5, 20);
    let mut txn = expense("Groceries", dec!(500), today);
    txn.kind = TransactionType::Income;
    assert!(check_budget_crossing(&[], &txn, dec!(100), today).is_none());
}

#[test]
fn test_new_transaction_outside_month_no_alert() {
    let today = day(2024, 5, 20);
    let txn = expense("Groceries", dec!(500), day(2024, 4, 28));
    assert!(check_budget_crossing(&[], &txn, dec!(100), today).is_none());
}

#[test]
fn test_alert_message_mentions_everything() {
    let alert = BudgetAlert {
        category: "Groceries".into(),
        budget: dec!(100),
        total: dec!(120.5),
    };
    let msg = alert.to_string();
    assert!(msg.contains("Groceries"));
    assert!(msg.contains("$100.00"));
    assert!(msg.contains("$120.50"));
}
