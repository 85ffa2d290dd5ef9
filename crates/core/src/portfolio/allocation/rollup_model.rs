//! Typed aggregate tree produced by the rollup engine.
//!
//! Every level carries named current/target/variance fields so the
//! conservation and rounding invariants stay visible in the types.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::decimal_utils::percentage_of;

/// Leaf node: one asset class with money and percent figures plus the
/// display breakdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetClassNode {
    pub asset_class_id: String,
    pub name: String,
    pub category_code: String,
    pub current_value: Decimal,
    pub target_value: Decimal,
    /// Positive means overweight.
    pub variance: Decimal,
    pub current_percent: Decimal,
    pub target_percent: Decimal,
    pub variance_percent: Decimal,
    /// Current dollars per account-type code.
    pub by_account_type: HashMap<String, Decimal>,
    /// Current dollars per account id.
    pub by_account: HashMap<String, Decimal>,
    pub is_cash: bool,
}

/// A category (e.g. "US Equities") and its asset classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub code: String,
    pub label: String,
    pub sort_order: i32,
    pub asset_classes: Vec<AssetClassNode>,
    pub current_value: Decimal,
    pub target_value: Decimal,
    pub variance: Decimal,
    pub current_percent: Decimal,
    pub target_percent: Decimal,
    pub variance_percent: Decimal,
}

impl CategoryNode {
    /// A category with a single asset class renders no subtotal row; it
    /// would repeat the asset-class line.
    pub fn has_subtotal(&self) -> bool {
        self.asset_classes.len() > 1
    }
}

/// A top-level group (e.g. "Equities") and its categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupNode {
    pub code: String,
    pub label: String,
    pub sort_order: i32,
    pub categories: Vec<CategoryNode>,
    pub current_value: Decimal,
    pub target_value: Decimal,
    pub variance: Decimal,
    pub current_percent: Decimal,
    pub target_percent: Decimal,
    pub variance_percent: Decimal,
}

impl GroupNode {
    /// A group with a single category renders no group-total row.
    pub fn has_group_total(&self) -> bool {
        self.categories.len() > 1
    }

    pub fn asset_class_count(&self) -> usize {
        self.categories.iter().map(|c| c.asset_classes.len()).sum()
    }
}

/// Grand-total figures. Current and target are identical by construction -
/// the portfolio is 100% of itself - so the variance is exactly zero. It is
/// asserted structurally rather than summed, keeping rounding artifacts out
/// of the top line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrandTotal {
    pub current_value: Decimal,
    pub target_value: Decimal,
    pub variance: Decimal,
    pub current_percent: Decimal,
    pub target_percent: Decimal,
    pub variance_percent: Decimal,
}

/// The full rollup tree for one user (or one account when scoped).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRollup {
    pub groups: Vec<GroupNode>,
    /// Cash cuts across every category by definition of the remainder rule,
    /// so it is kept out of the group tree and rendered as its own row.
    pub cash: Option<AssetClassNode>,
    pub account_totals: HashMap<String, Decimal>,
    pub account_type_totals: HashMap<String, Decimal>,
    pub total_value: Decimal,
}

impl PortfolioRollup {
    pub fn grand_total(&self) -> GrandTotal {
        let percent = percentage_of(self.total_value, self.total_value);
        GrandTotal {
            current_value: self.total_value,
            target_value: self.total_value,
            variance: Decimal::ZERO,
            current_percent: percent,
            target_percent: percent,
            variance_percent: Decimal::ZERO,
        }
    }
}
