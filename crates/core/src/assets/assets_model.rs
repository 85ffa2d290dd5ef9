//! Reference data models.
//!
//! All of these are seeded once and rarely mutated; the engine only reads
//! them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::CASH_ASSET_CLASS;

/// A node in the asset-class category tree. Categories nest via
/// `parent_code` (e.g. "US Equities" and "International Equities" both roll
/// up under "Equities"); top-level nodes act as groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetClassCategory {
    /// Stable string code, primary key (e.g. "us_equities").
    pub code: String,
    pub label: String,
    /// Parent category code; `None` for top-level groups. The chain must
    /// terminate.
    pub parent_code: Option<String>,
    pub sort_order: i32,
}

/// An investable asset class (e.g. "US Large Cap"). Names are globally
/// unique; the class named `Cash` is the sentinel the remainder rule keys on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetClass {
    pub id: String,
    pub name: String,
    pub category_code: String,
    pub expected_return: Option<Decimal>,
}

impl AssetClass {
    pub fn is_cash(&self) -> bool {
        self.name == CASH_ASSET_CLASS
    }
}

/// A tradable security mapped to exactly one asset class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub id: String,
    /// Unique ticker symbol, the key used against the price source.
    pub ticker: String,
    pub name: String,
    pub asset_class_id: String,
}
