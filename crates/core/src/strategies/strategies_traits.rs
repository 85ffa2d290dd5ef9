//! Strategy repository and service traits.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::strategies_model::{
    AccountTypeStrategyAssignment, AllocationStrategy, NewAccountTypeStrategyAssignment,
    NewAllocationStrategy, StrategyWithTargets, TargetAllocation,
};
use crate::errors::Result;

/// Trait defining the contract for strategy persistence.
#[async_trait]
pub trait StrategyRepositoryTrait: Send + Sync {
    async fn create_strategy(&self, new_strategy: NewAllocationStrategy)
        -> Result<AllocationStrategy>;

    async fn delete_strategy(&self, strategy_id: &str) -> Result<usize>;

    fn get_strategy(&self, strategy_id: &str) -> Result<Option<AllocationStrategy>>;

    fn get_with_targets(&self, strategy_id: &str) -> Result<Option<StrategyWithTargets>>;

    fn list_for_user(&self, user_id: &str) -> Result<Vec<AllocationStrategy>>;

    fn list_targets(&self, strategy_id: &str) -> Result<Vec<TargetAllocation>>;

    /// Replaces the full target set of a strategy. Implementations must
    /// apply the delete-and-insert as a single atomic unit; a partial write
    /// must never be observable.
    async fn replace_allocations(
        &self,
        strategy_id: &str,
        targets: Vec<TargetAllocation>,
    ) -> Result<()>;

    fn list_assignments(&self, user_id: &str) -> Result<Vec<AccountTypeStrategyAssignment>>;

    async fn upsert_assignment(
        &self,
        assignment: NewAccountTypeStrategyAssignment,
    ) -> Result<AccountTypeStrategyAssignment>;

    async fn delete_assignment(&self, assignment_id: &str) -> Result<usize>;
}

/// Trait defining the contract for strategy service operations.
#[async_trait]
pub trait StrategyServiceTrait: Send + Sync {
    async fn create_strategy(&self, new_strategy: NewAllocationStrategy)
        -> Result<AllocationStrategy>;

    async fn delete_strategy(&self, strategy_id: &str) -> Result<()>;

    fn get_strategy_with_targets(&self, strategy_id: &str) -> Result<Option<StrategyWithTargets>>;

    fn list_strategies(&self, user_id: &str) -> Result<Vec<AllocationStrategy>>;

    /// Validates and persists a strategy's full target set; see the service
    /// implementation for the cash handling rules.
    async fn save_allocations(
        &self,
        strategy_id: &str,
        allocations: HashMap<String, Decimal>,
    ) -> Result<Vec<TargetAllocation>>;

    async fn assign_account_type_default(
        &self,
        assignment: NewAccountTypeStrategyAssignment,
    ) -> Result<AccountTypeStrategyAssignment>;

    async fn remove_account_type_default(&self, assignment_id: &str) -> Result<()>;
}
