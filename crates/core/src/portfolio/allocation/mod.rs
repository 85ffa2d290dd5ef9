//! Allocation engine - effective targets, aggregation, rollup, and rows.

mod aggregation_service;
mod allocation_model;
mod rollup_model;
mod rollup_service;
mod row_builder;
mod target_service;

pub use aggregation_service::{aggregate_holdings, AssetClassAggregate, HoldingsAggregation};
pub use allocation_model::{Allocation, EffectiveTargets, TargetSource};
pub use rollup_model::{AssetClassNode, CategoryNode, GrandTotal, GroupNode, PortfolioRollup};
pub use rollup_service::{
    compute_rollup, AllocationRollupService, AllocationRollupServiceTrait, RollupInputs,
    RollupScope,
};
pub use row_builder::{build_rows, AllocationRow, DisplayMode};
pub use target_service::{
    resolve_strategy_source, TargetResolutionService, TargetResolutionServiceTrait,
};


#[cfg(test)]
mod rollup_service_tests;
