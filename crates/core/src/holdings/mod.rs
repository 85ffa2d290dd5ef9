//! Holdings module - positions per account and their priced view.

mod holdings_model;
mod holdings_service;
mod holdings_traits;

pub use holdings_model::{Holding, NewHolding, PricedHolding};
pub use holdings_service::HoldingsService;
pub use holdings_traits::{HoldingRepositoryTrait, HoldingsServiceTrait};
