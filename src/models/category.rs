use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TransactionType;

/// Icon assigned to every user-created category.
pub const CUSTOM_CATEGORY_ICON: &str = "shapes";

/// Colors handed out to custom categories in rotation.
const CUSTOM_CATEGORY_COLORS: [&str; 5] = ["chart-1", "chart-2", "chart-3", "chart-4", "chart-5"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub is_custom: bool,
}

impl Category {
    /// A new user-defined category. `existing_custom` is how many custom
    /// categories already exist and picks the color slot.
    pub fn new_custom(name: &str, kind: TransactionType, existing_custom: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            kind,
            icon: CUSTOM_CATEGORY_ICON.to_string(),
            color: CUSTOM_CATEGORY_COLORS[existing_custom % CUSTOM_CATEGORY_COLORS.len()].to_string(),
            is_custom: true,
        }
    }

    /// Find a category by exact name, optionally restricted to one type.
    pub fn find_by_name<'a>(
        categories: &'a [Category],
        name: &str,
        kind: Option<TransactionType>,
    ) -> Option<&'a Category> {
        categories
            .iter()
            .find(|c| c.name == name && kind.map_or(true, |k| c.kind == k))
    }

    /// Find a category by name ignoring case, optionally restricted to one type.
    pub fn find_by_name_ignore_case<'a>(
        categories: &'a [Category],
        name: &str,
        kind: Option<TransactionType>,
    ) -> Option<&'a Category> {
        let lower = name.trim().to_lowercase();
        categories
            .iter()
            .find(|c| c.name.to_lowercase() == lower && kind.map_or(true, |k| c.kind == k))
    }

    pub fn find_by_id<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.id == id)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// (name, type, icon, color). Built-in ids are the names themselves.
const BUILT_INS: &[(&str, TransactionType, &str, &str)] = &[
    ("Groceries", TransactionType::Expense, "shopping-cart", "chart-1"),
    ("Transport", TransactionType::Expense, "car", "chart-2"),
    ("Housing", TransactionType::Expense, "home", "chart-3"),
    ("Entertainment", TransactionType::Expense, "film", "chart-4"),
    ("Food & Dining", TransactionType::Expense, "utensils", "chart-5"),
    ("Utilities", TransactionType::Expense, "zap", "chart-1"),
    ("Bills", TransactionType::Expense, "receipt-text", "chart-2"),
    ("Clothing", TransactionType::Expense, "shirt", "chart-3"),
    ("Health & Wellness", TransactionType::Expense, "heart-pulse", "chart-4"),
    ("Education", TransactionType::Expense, "graduation-cap", "chart-5"),
    ("Gifts & Donations", TransactionType::Expense, "gift", "chart-1"),
    ("Travel", TransactionType::Expense, "plane", "chart-2"),
    ("Insurance", TransactionType::Expense, "shield-check", "chart-3"),
    ("Maintenance", TransactionType::Expense, "wrench", "chart-4"),
    ("Savings Contribution", TransactionType::Expense, "piggy-bank", "chart-5"),
    ("Other Expense", TransactionType::Expense, "dollar-sign", "muted"),
    ("Salary", TransactionType::Income, "briefcase", "chart-1"),
    ("Freelance", TransactionType::Income, "dollar-sign", "chart-2"),
    ("Investment", TransactionType::Income, "trending-up", "chart-3"),
    ("Gift Received", TransactionType::Income, "gift", "chart-4"),
    ("Other Income", TransactionType::Income, "dollar-sign", "chart-5"),
];

/// The fixed list of built-in categories. Never persisted.
pub fn default_categories() -> Vec<Category> {
    BUILT_INS
        .iter()
        .map(|&(name, kind, icon, color)| Category {
            id: name.to_string(),
            name: name.to_string(),
            kind,
            icon: icon.to_string(),
            color: color.to_string(),
            is_custom: false,
        })
        .collect()
}
