//! Allocation value objects and effective target sets.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::ONE_HUNDRED;
use crate::utils::decimal_utils::{ratio_of, round_money, round_percent};

/// A single asset-class target, decoupled from persistence. Derives target
/// dollars and variance against a given base total. Pure and side-effect
/// free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub asset_class_name: String,
    pub target_percent: Decimal,
}

impl Allocation {
    pub fn new(asset_class_name: impl Into<String>, target_percent: Decimal) -> Self {
        Self {
            asset_class_name: asset_class_name.into(),
            target_percent,
        }
    }

    /// `base_total × target% / 100`, quantized to the money scale.
    pub fn target_value_for(&self, base_total: Decimal) -> Decimal {
        round_money(base_total * self.target_percent / ONE_HUNDRED)
    }

    /// `current − target`. Positive means overweight.
    pub fn variance_for(&self, current_value: Decimal, base_total: Decimal) -> Decimal {
        round_money(current_value - self.target_value_for(base_total))
    }

    /// Variance as a percentage of the base; exactly zero on a zero base.
    pub fn variance_percent_for(&self, current_value: Decimal, base_total: Decimal) -> Decimal {
        let variance = self.variance_for(current_value, base_total);
        round_percent(ratio_of(variance, base_total) * ONE_HUNDRED)
    }
}

/// Which tier of the override hierarchy produced an account's targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetSource {
    AccountOverride,
    AccountTypeDefault,
    PortfolioDefault,
}

/// The effective target set of one account: the resolved strategy's
/// persisted percentages keyed by asset-class name, exactly as stored (cash
/// included only when the strategy stores it).
///
/// The cash remainder is a property of this set - it is always computed at
/// the scope the strategy was resolved at, never from a portfolio-wide
/// aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveTargets {
    pub strategy_id: Option<String>,
    pub source: Option<TargetSource>,
    pub targets: BTreeMap<String, Decimal>,
}

impl EffectiveTargets {
    /// An account with no resolvable strategy: contributes to current-dollar
    /// sums only.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Sum of every configured percentage except cash.
    pub fn non_cash_sum(&self, cash_name: &str) -> Decimal {
        self.targets
            .iter()
            .filter(|(name, _)| name.as_str() != cash_name)
            .map(|(_, percent)| *percent)
            .sum()
    }

    /// The explicitly configured cash percentage, if the strategy stored one.
    pub fn explicit_cash(&self, cash_name: &str) -> Option<Decimal> {
        self.targets.get(cash_name).copied()
    }

    /// Cash percentage after the remainder rule: the stored value when cash
    /// is explicit, otherwise `max(0, 100 − Σ non-cash)`. A set exceeding
    /// 100% yields zero; the read path clamps instead of raising.
    pub fn implied_cash_percent(&self, cash_name: &str) -> Decimal {
        if let Some(explicit) = self.explicit_cash(cash_name) {
            return explicit;
        }
        (ONE_HUNDRED - self.non_cash_sum(cash_name)).max(Decimal::ZERO)
    }

    /// Target percent for one asset class, cash resolved via the remainder
    /// rule.
    pub fn target_percent_for(&self, asset_class_name: &str, cash_name: &str) -> Decimal {
        if asset_class_name == cash_name {
            self.implied_cash_percent(cash_name)
        } else {
            self.targets
                .get(asset_class_name)
                .copied()
                .unwrap_or(Decimal::ZERO)
        }
    }
}
