//! Raw current-value aggregation over priced holdings.
//!
//! One pass over the holdings produces the totals every higher level of the
//! rollup is built from. Only additions of already-quantized market values
//! happen here; no division, so no rounding drift can enter at this stage.

use std::collections::HashMap;

use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::{Account, AccountType};
use crate::holdings::PricedHolding;

/// Current-dollar totals for one asset class, with the per-account-type and
/// per-account breakdowns the display layer needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetClassAggregate {
    pub asset_class_id: String,
    pub category_code: String,
    pub current_value: Decimal,
    pub by_account_type: HashMap<String, Decimal>,
    pub by_account: HashMap<String, Decimal>,
}

/// Raw current totals at every level of the hierarchy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsAggregation {
    /// Keyed by asset-class name.
    pub by_asset_class: HashMap<String, AssetClassAggregate>,
    pub account_totals: HashMap<String, Decimal>,
    /// Grand total per account-type code, computed once here and reused as
    /// the percent denominator wherever needed - never re-derived per asset
    /// class.
    pub account_type_totals: HashMap<String, Decimal>,
    pub total_value: Decimal,
}

impl HoldingsAggregation {
    /// Current total of one account; zero for accounts with no holdings.
    pub fn account_total(&self, account_id: &str) -> Decimal {
        self.account_totals
            .get(account_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Groups market values into per-asset-class, per-account, and
/// per-account-type totals. Holdings referencing an account outside the
/// given list are skipped with a warning.
pub fn aggregate_holdings(
    accounts: &[Account],
    account_types: &[AccountType],
    holdings: &[PricedHolding],
) -> HoldingsAggregation {
    let type_codes: HashMap<&str, &str> = account_types
        .iter()
        .map(|t| (t.id.as_str(), t.code.as_str()))
        .collect();
    let account_type_of: HashMap<&str, &str> = accounts
        .iter()
        .map(|a| {
            (
                a.id.as_str(),
                type_codes
                    .get(a.account_type_id.as_str())
                    .copied()
                    .unwrap_or(a.account_type_id.as_str()),
            )
        })
        .collect();

    let mut aggregation = HoldingsAggregation::default();
    for holding in holdings {
        let Some(type_code) = account_type_of.get(holding.account_id.as_str()) else {
            warn!(
                "Skipping holding {}: account {} not in scope",
                holding.holding_id, holding.account_id
            );
            continue;
        };
        let value = holding.market_value();

        let entry = aggregation
            .by_asset_class
            .entry(holding.asset_class_name.clone())
            .or_insert_with(|| AssetClassAggregate {
                asset_class_id: holding.asset_class_id.clone(),
                category_code: holding.category_code.clone(),
                ..Default::default()
            });
        entry.current_value += value;
        *entry
            .by_account_type
            .entry(type_code.to_string())
            .or_insert(Decimal::ZERO) += value;
        *entry
            .by_account
            .entry(holding.account_id.clone())
            .or_insert(Decimal::ZERO) += value;

        *aggregation
            .account_totals
            .entry(holding.account_id.clone())
            .or_insert(Decimal::ZERO) += value;
        *aggregation
            .account_type_totals
            .entry(type_code.to_string())
            .or_insert(Decimal::ZERO) += value;
        aggregation.total_value += value;
    }

    aggregation
}
