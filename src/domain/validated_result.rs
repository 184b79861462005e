use super::{CurrencyCode, LineItems, TotalAmount};

/// Typed outcome of schema coercion, before it is bound to an owner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatedResult {
    pub total_amount: TotalAmount,
    pub line_items: LineItems,
    pub currency_code: CurrencyCode,
    pub tokens_used: u64,
}
