#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

// ── parse_decimal ─────────────────────────────────────────────

#[test]
fn test_parse_decimal_basic() {
    assert_eq!(parse_decimal("100.50").unwrap(), dec!(100.50));
    assert_eq!(parse_decimal("-42.99").unwrap(), dec!(-42.99));
}

#[test]
fn test_parse_decimal_with_currency() {
    assert_eq!(parse_decimal("$1,234.56").unwrap(), dec!(1234.56));
    assert_eq!(parse_decimal("-$99.99").unwrap(), dec!(-99.99));
}

#[test]
fn test_parse_decimal_parentheses_negative() {
    assert_eq!(parse_decimal("(500.00)").unwrap(), dec!(-500.00));
}

#[test]
fn test_parse_decimal_empty_is_error() {
    assert!(parse_decimal("").is_err());
    assert!(parse_decimal("  ").is_err());
}

#[test]
fn test_parse_decimal_invalid() {
    assert!(parse_decimal("not_a_number").is_err());
    assert!(parse_decimal("12abc").is_err());
}

#[test]
fn test_parse_decimal_rejects_out_of_range() {
    assert!(parse_decimal("-79228162514264337593543950335").is_err());
    assert!(parse_decimal("1000000000000.01").is_err());
    assert_eq!(parse_decimal("-1000000000000").unwrap(), dec!(-1000000000000));
}

// ── parse_date ────────────────────────────────────────────────

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_date_iso() {
    assert_eq!(parse_date("2024-01-15").unwrap().date_naive(), ymd(2024, 1, 15));
}

#[test]
fn test_parse_date_us() {
    assert_eq!(parse_date("01/15/2024").unwrap().date_naive(), ymd(2024, 1, 15));
    assert_eq!(parse_date("01/15/24").unwrap().date_naive(), ymd(2024, 1, 15));
}

#[test]
fn test_parse_date_rfc3339() {
    let d = parse_date("2024-01-15T23:30:00+00:00").unwrap();
    assert_eq!(d.date_naive(), ymd(2024, 1, 15));
}

#[test]
fn test_parse_date_keeps_statement_day_with_offset() {
    let late = parse_date("2024-01-15T23:30:00-05:00").unwrap();
    assert_eq!(late.date_naive(), ymd(2024, 1, 15));
    let early = parse_date("2024-02-01T00:15:00+09:00").unwrap();
    assert_eq!(early.date_naive(), ymd(2024, 2, 1));
    assert_eq!(early.format("%H:%M").to_string(), "00:15");
}

#[test]
fn test_parse_date_invalid() {
    assert!(parse_date("not-a-date").is_err());
    assert!(parse_date("2024-13-45").is_err());
}

// ── parse_statement ───────────────────────────────────────────

#[test]
fn test_statement_basic() {
    let csv = "Date,Description,Amount\n2024-01-10,Coffee,-4.50\n2024-01-11,Paycheck,1500\n";
    let report = parse_statement(csv).unwrap();
    assert_eq!(report.transactions.len(), 2);
    assert!(report.skipped.is_empty());

    let coffee = &report.transactions[0];
    assert_eq!(coffee.kind, TransactionType::Expense);
    assert_eq!(coffee.amount, dec!(4.50));
    assert_eq!(coffee.category, STATEMENT_IMPORT_CATEGORY);
    assert_eq!(coffee.description, "Coffee");
    assert_eq!(coffee.day(), ymd(2024, 1, 10));

    let pay = &report.transactions[1];
    assert_eq!(pay.kind, TransactionType::Income);
    assert_eq!(pay.amount, dec!(1500));
    assert_ne!(coffee.id, pay.id);
}

#[test]
fn test_statement_header_case_and_order_independent() {
    let csv = "  AMOUNT ,date,DeScRiPtIoN\n-20,2024-02-01,Gas\n";
    let report = parse_statement(csv).unwrap();
    assert_eq!(report.transactions.len(), 1);
    assert_eq!(report.transactions[0].description, "Gas");
    assert_eq!(report.transactions[0].amount, dec!(20));
}

#[test]
fn test_statement_one_bad_amount_of_three() {
    let csv = "Date,Description,Amount\n\
               2024-01-10,Coffee,-4.50\n\
               2024-01-11,Lunch,abc\n\
               2024-01-12,Refund,12.00\n";
    let report = parse_statement(csv).unwrap();
    assert_eq!(report.transactions.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 3);
    assert!(report.skipped[0].reason.contains("abc"));
}

#[test]
fn test_statement_missing_amount_header_rejected() {
    let csv = "Date,Description,Value\n2024-01-10,Coffee,-4.50\n";
    match parse_statement(csv) {
        Err(ImportError::MissingHeaders(missing)) => assert_eq!(missing, vec!["Amount"]),
        other => panic!("expected MissingHeaders, got {other:?}"),
    }
}

#[test]
fn test_statement_empty_rejected() {
    assert!(matches!(parse_statement(""), Err(ImportError::Empty)));
}

#[test]
fn test_statement_header_only_yields_nothing() {
    let report = parse_statement("Date,Description,Amount\n").unwrap();
    assert!(report.transactions.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn test_statement_skips_short_empty_and_bad_date_rows() {
    let csv = "Date,Description,Amount\n\
               2024-01-10,Coffee\n\
               2024-01-11,,5\n\
               yesterday,Snack,-3\n\
               2024-01-12,Book,-15\n";
    let report = parse_statement(csv).unwrap();
    assert_eq!(report.transactions.len(), 1);
    assert_eq!(report.transactions[0].description, "Book");
    let lines: Vec<usize> = report.skipped.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![2, 3, 4]);
}

#[test]
fn test_statement_zero_amount_is_income() {
    let report = parse_statement("Date,Description,Amount\n2024-01-10,Adjustment,0\n").unwrap();
    assert_eq!(report.transactions[0].kind, TransactionType::Income);
}

#[test]
fn test_statement_quoted_fields() {
    let csv = "Date,Description,Amount\n2024-01-10,\"Dinner, with \"\"friends\"\"\",\"-1,200.00\"\n";
    let report = parse_statement(csv).unwrap();
    let txn = &report.transactions[0];
    assert_eq!(txn.description, "Dinner, with \"friends\"");
    assert_eq!(txn.amount, dec!(1200.00));
}

#[test]
fn test_statement_honours_category_and_type_columns() {
    let csv = "Date,Description,Category,Type,Amount\n\
               2024-03-01,Rent,Housing,expense,1200.00\n\
               2024-03-02,Bonus,,income,50\n";
    let report = parse_statement(csv).unwrap();
    let rent = &report.transactions[0];
    assert_eq!(rent.category, "Housing");
    assert_eq!(rent.kind, TransactionType::Expense);
    assert_eq!(rent.amount, dec!(1200.00));
    let bonus = &report.transactions[1];
    assert_eq!(bonus.category, STATEMENT_IMPORT_CATEGORY);
    assert_eq!(bonus.kind, TransactionType::Income);
}

#[test]
fn test_statement_skips_out_of_range_amounts() {
    let csv = "Date,Description,Amount\n\
               2024-01-10,Huge,-79228162514264337593543950335\n\
               2024-01-11,Huge again,-79228162514264337593543950335\n\
               2024-01-12,Coffee,-4.50\n";
    let report = parse_statement(csv).unwrap();
    assert_eq!(report.transactions.len(), 1);
    assert_eq!(report.transactions[0].description, "Coffee");
    let lines: Vec<usize> = report.skipped.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![2, 3]);
}

#[test]
fn test_statement_amounts_rounded_to_cents() {
    let csv = "Date,Description,Amount\n2024-01-10,Fuel,-12.345\n2024-01-11,Tip,0.004\n";
    let report = parse_statement(csv).unwrap();
    assert_eq!(report.transactions[0].amount, dec!(12.35));
    assert_eq!(report.transactions[1].amount, dec!(0.00));
}
