//! Rebalancing order models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderAction {
    Buy,
    Sell,
}

/// One suggested order. This is the record consumed by report exporters;
/// estimated_amount is the whole-share notional, not the exact variance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceOrder {
    pub action: OrderAction,
    pub symbol: String,
    pub security_name: String,
    pub shares: Decimal,
    pub price: Decimal,
    pub estimated_amount: Decimal,
}
