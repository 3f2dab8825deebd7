use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::BudgetError;

/// Monthly spending limits keyed by category id.
///
/// Entries for deleted categories are left in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budgets {
    limits: BTreeMap<String, Decimal>,
}

impl Budgets {
    pub fn set(&mut self, category_id: &str, limit: Decimal) -> Result<(), BudgetError> {
        if limit < Decimal::ZERO {
            return Err(BudgetError::Negative(limit));
        }
        self.limits.insert(category_id.to_string(), limit);
        Ok(())
    }

    pub fn get(&self, category_id: &str) -> Option<Decimal> {
        self.limits.get(category_id).copied()
    }

    pub fn remove(&mut self, category_id: &str) -> Option<Decimal> {
        self.limits.remove(category_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.limits.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}
