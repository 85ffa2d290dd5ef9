//! Flattens the rollup tree into ordered display rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rollup_model::{AssetClassNode, PortfolioRollup};
use crate::constants::PORTFOLIO_TOTAL_ID;
use crate::utils::decimal_utils::{format_money, format_percent, format_signed_percent};

/// Money and percent row lists are built separately, never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    Money,
    Percent,
}

/// One display row. Raw decimals are carried alongside the formatted
/// strings so a presentation layer can re-format without re-deriving
/// anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRow {
    /// Stable identifier for client-side grouping and collapsing.
    pub id: String,
    pub label: String,
    pub current: Decimal,
    pub target: Decimal,
    pub variance: Decimal,
    pub formatted_current: String,
    pub formatted_target: String,
    pub formatted_variance: String,
    pub is_subtotal: bool,
    pub is_group_total: bool,
    pub is_grand_total: bool,
    pub is_cash: bool,
}

fn make_row(
    mode: DisplayMode,
    id: String,
    label: String,
    current: Decimal,
    target: Decimal,
    variance: Decimal,
) -> AllocationRow {
    let (formatted_current, formatted_target, formatted_variance) = match mode {
        DisplayMode::Money => (
            format_money(current),
            format_money(target),
            format_money(variance),
        ),
        DisplayMode::Percent => (
            format_percent(current),
            format_percent(target),
            format_signed_percent(variance),
        ),
    };
    AllocationRow {
        id,
        label,
        current,
        target,
        variance,
        formatted_current,
        formatted_target,
        formatted_variance,
        is_subtotal: false,
        is_group_total: false,
        is_grand_total: false,
        is_cash: false,
    }
}

fn asset_class_row(mode: DisplayMode, node: &AssetClassNode) -> AllocationRow {
    let (current, target, variance) = match mode {
        DisplayMode::Money => (node.current_value, node.target_value, node.variance),
        DisplayMode::Percent => (
            node.current_percent,
            node.target_percent,
            node.variance_percent,
        ),
    };
    let mut row = make_row(
        mode,
        format!("asset:{}", node.asset_class_id),
        node.name.clone(),
        current,
        target,
        variance,
    );
    row.is_cash = node.is_cash;
    row
}

/// Ordered rows for one display mode.
///
/// Per group: asset-class rows per category, then the category subtotal
/// unless the category has a single asset class, then the group total unless
/// the group has a single category. After all groups: exactly one cash row
/// (when cash is held or targeted), then exactly one grand-total row.
pub fn build_rows(rollup: &PortfolioRollup, mode: DisplayMode) -> Vec<AllocationRow> {
    let mut rows = Vec::new();

    for group in &rollup.groups {
        for category in &group.categories {
            for node in &category.asset_classes {
                rows.push(asset_class_row(mode, node));
            }
            if category.has_subtotal() {
                let (current, target, variance) = match mode {
                    DisplayMode::Money => {
                        (category.current_value, category.target_value, category.variance)
                    }
                    DisplayMode::Percent => (
                        category.current_percent,
                        category.target_percent,
                        category.variance_percent,
                    ),
                };
                let mut row = make_row(
                    mode,
                    format!("subtotal:{}", category.code),
                    format!("{} Subtotal", category.label),
                    current,
                    target,
                    variance,
                );
                row.is_subtotal = true;
                rows.push(row);
            }
        }
        if group.has_group_total() {
            let (current, target, variance) = match mode {
                DisplayMode::Money => (group.current_value, group.target_value, group.variance),
                DisplayMode::Percent => (
                    group.current_percent,
                    group.target_percent,
                    group.variance_percent,
                ),
            };
            let mut row = make_row(
                mode,
                format!("group:{}", group.code),
                format!("Total {}", group.label),
                current,
                target,
                variance,
            );
            row.is_group_total = true;
            rows.push(row);
        }
    }

    if let Some(cash) = &rollup.cash {
        let visible = !cash.current_value.is_zero()
            || !cash.target_value.is_zero()
            || !cash.by_account.is_empty();
        if visible {
            rows.push(asset_class_row(mode, cash));
        }
    }

    let grand = rollup.grand_total();
    let (current, target) = match mode {
        DisplayMode::Money => (grand.current_value, grand.target_value),
        DisplayMode::Percent => (grand.current_percent, grand.target_percent),
    };
    let mut row = make_row(
        mode,
        PORTFOLIO_TOTAL_ID.to_string(),
        "Grand Total".to_string(),
        current,
        target,
        Decimal::ZERO,
    );
    row.is_grand_total = true;
    rows.push(row);

    rows
}
