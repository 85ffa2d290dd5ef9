//! Rebalancing module - order suggestions derived from allocation variances.

mod rebalancing_model;
mod rebalancing_service;

pub use rebalancing_model::{OrderAction, RebalanceOrder};
pub use rebalancing_service::suggest_orders;
