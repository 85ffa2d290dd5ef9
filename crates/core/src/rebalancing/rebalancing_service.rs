//! Derives whole-share BUY/SELL suggestions from a computed rollup.

use std::collections::HashMap;

use log::warn;
use rust_decimal::Decimal;

use super::rebalancing_model::{OrderAction, RebalanceOrder};
use crate::assets::Security;
use crate::market_data::Quote;
use crate::portfolio::allocation::PortfolioRollup;
use crate::utils::decimal_utils::round_money;

/// One order per out-of-balance asset class: underweight buys, overweight
/// sells, sized to whole shares of the class's representative security.
///
/// Classes without a priced representative are skipped with a warning, as
/// are gaps smaller than one share. Cash and the synthetic total rows never
/// trade.
pub fn suggest_orders(
    rollup: &PortfolioRollup,
    representatives: &HashMap<String, Security>,
    quotes: &HashMap<String, Quote>,
) -> Vec<RebalanceOrder> {
    let mut orders = Vec::new();

    for group in &rollup.groups {
        for category in &group.categories {
            for node in &category.asset_classes {
                if node.variance.is_zero() {
                    continue;
                }
                let Some(security) = representatives.get(&node.asset_class_id) else {
                    warn!(
                        "No representative security for asset class {}; skipping",
                        node.name
                    );
                    continue;
                };
                let Some(quote) = quotes.get(&security.ticker) else {
                    warn!("No quote for {}; skipping", security.ticker);
                    continue;
                };
                if quote.price <= Decimal::ZERO {
                    continue;
                }

                let shares = (node.variance.abs() / quote.price).trunc();
                if shares < Decimal::ONE {
                    continue;
                }

                let action = if node.variance > Decimal::ZERO {
                    OrderAction::Sell
                } else {
                    OrderAction::Buy
                };
                orders.push(RebalanceOrder {
                    action,
                    symbol: security.ticker.clone(),
                    security_name: security.name.clone(),
                    shares,
                    price: quote.price,
                    estimated_amount: round_money(shares * quote.price),
                });
            }
        }
    }

    orders
}
