//! Account domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// A kind of account (taxable brokerage, IRA, 401k, ...). Reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountType {
    pub id: String,
    /// Short stable code used as a breakdown key (e.g. "taxable").
    pub code: String,
    pub label: String,
    pub sort_order: i32,
}

/// A financial institution holding accounts. Reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: String,
    pub name: String,
}

/// Top-level container owning a user's accounts. Carries the portfolio-wide
/// default allocation strategy, the lowest tier of the override hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub allocation_strategy_id: Option<String>,
}

/// Domain model representing an investment account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub portfolio_id: String,
    pub account_type_id: String,
    pub institution_id: String,
    /// Explicit strategy override; trumps the account-type and portfolio
    /// defaults when set.
    pub allocation_strategy_id: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub portfolio_id: String,
    pub account_type_id: String,
    pub institution_id: String,
    pub allocation_strategy_id: Option<String>,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        Ok(())
    }
}
