use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest amount accepted for a transaction or a budget (one trillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Absolute value rounded to cents, half away from zero.
pub fn normalize_amount(amount: Decimal) -> Decimal {
    amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Sign convention used by bank statements: negative amounts are spending.
    pub fn from_signed(amount: Decimal) -> Self {
        if amount < Decimal::ZERO {
            Self::Expense
        } else {
            Self::Income
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single dated income or expense record.
///
/// `amount` is always stored as an absolute value in cents precision; the
/// direction lives in `kind`. `category` holds the category *name*, not its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub description: String,
}

impl Transaction {
    pub fn new(
        kind: TransactionType,
        category: String,
        amount: Decimal,
        date: DateTime<Utc>,
        description: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            category,
            amount: normalize_amount(amount),
            date,
            description,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the sign restored: negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// "YYYY-MM" of the transaction date.
    pub fn month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}
