use serde::{Deserialize, Serialize};

pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const DEFAULT_QUANTITY: f64 = 1.0;
/// Allowed gap between `amount_after_discount` and `amount - discount`.
pub const DISCOUNT_TOLERANCE: f64 = 0.01;

/// `amount` is the listed price; `amount_after_discount` is what was paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub amount: f64,
    pub quantity: f64,
    pub discount: f64,
    pub amount_after_discount: f64,
}

/// Aggregate amounts per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TotalAmount {
    pub incomes: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItems {
    pub incomes: Vec<LineItem>,
    pub expenses: Vec<LineItem>,
}

impl LineItems {
    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.incomes.len() + self.expenses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.incomes.iter().chain(self.expenses.iter())
    }
}
