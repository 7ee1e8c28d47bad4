//! Budget model
//!
//! A monthly spending limit for one category.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::currency::Currency;
use super::ids::BudgetId;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,

    /// Category the limit applies to; one budget per category
    pub category: String,

    /// Monthly limit
    pub amount: Money,

    /// Currency of the limit; budgets predating multi-currency are DOP
    #[serde(default)]
    pub currency: Currency,

    /// Fields this version does not model, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Budget {
    pub fn new(category: impl Into<String>, amount: Money, currency: Currency) -> Self {
        Self {
            id: BudgetId::new(),
            category: category.into(),
            amount,
            currency,
            extra: Map::new(),
        }
    }

    /// Whether `category` names this budget's category
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.trim().to_lowercase() == category.trim().to_lowercase()
    }
}
