//! Allocation strategies - target percentages per asset class and the
//! assignments that bind them to account types.

mod strategies_model;
mod strategies_service;
mod strategies_traits;

pub use strategies_model::{
    AccountTypeStrategyAssignment, AllocationStrategy, NewAccountTypeStrategyAssignment,
    NewAllocationStrategy, StrategyWithTargets, TargetAllocation,
};
pub use strategies_service::StrategyService;
pub use strategies_traits::{StrategyRepositoryTrait, StrategyServiceTrait};
