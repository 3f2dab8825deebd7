mod budget;
mod category;
mod transaction;

pub use budget::Budgets;
pub use category::{default_categories, Category};
pub use transaction::{normalize_amount, Transaction, TransactionType, MAX_AMOUNT};

/// Category given to every row created by a CSV statement import.
pub const STATEMENT_IMPORT_CATEGORY: &str = "Statement Import";
