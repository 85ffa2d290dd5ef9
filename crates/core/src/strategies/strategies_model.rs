//! Strategy domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// A named set of target allocations owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStrategy {
    pub id: String,
    pub user_id: String,
    /// Unique per user.
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One asset-class target within a strategy. Identity is
/// `(strategy_id, asset_class_id)`; the whole set is replaced on save,
/// never patched row by row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAllocation {
    pub strategy_id: String,
    pub asset_class_id: String,
    pub target_percent: Decimal,
}

/// A strategy with its full target set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyWithTargets {
    pub strategy: AllocationStrategy,
    pub targets: Vec<TargetAllocation>,
}

/// Binds an account type to a default strategy for one user - the middle
/// tier of the override hierarchy. Unique per `(user_id, account_type_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTypeStrategyAssignment {
    pub id: String,
    pub user_id: String,
    pub account_type_id: String,
    pub strategy_id: String,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAllocationStrategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
}

impl NewAllocationStrategy {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Strategy name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for assigning a default strategy to an account type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccountTypeStrategyAssignment {
    pub user_id: String,
    pub account_type_id: String,
    pub strategy_id: String,
}
