//! Holding domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::decimal_utils::round_money;
use crate::{errors::ValidationError, Error, Result};

/// A position in one security within one account. Shares are kept at full
/// precision; money figures derived from them are quantized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub account_id: String,
    pub security_id: String,
    pub shares: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub account_id: String,
    pub security_id: String,
    pub shares: Decimal,
}

impl NewHolding {
    pub fn validate(&self) -> Result<()> {
        if self.shares.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Shares cannot be negative, got {}",
                self.shares
            ))));
        }
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        Ok(())
    }
}

/// A holding joined with its security and asset class, priced. This is the
/// row the aggregation engine consumes; it is assembled fresh per request
/// and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedHolding {
    pub holding_id: String,
    pub account_id: String,
    pub symbol: String,
    pub security_name: String,
    pub asset_class_id: String,
    pub asset_class_name: String,
    pub category_code: String,
    pub shares: Decimal,
    /// `None` while no quote is available; such holdings are valid and
    /// contribute zero to every total.
    pub price: Option<Decimal>,
}

impl PricedHolding {
    /// Shares times price, quantized to the money scale. `0.00` without a
    /// price.
    pub fn market_value(&self) -> Decimal {
        match self.price {
            Some(price) => round_money(self.shares * price),
            None => Decimal::ZERO,
        }
    }
}
