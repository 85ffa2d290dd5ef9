//! Strategy service - the strict write path for target allocations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::strategies_model::{
    AccountTypeStrategyAssignment, AllocationStrategy, NewAccountTypeStrategyAssignment,
    NewAllocationStrategy, StrategyWithTargets, TargetAllocation,
};
use super::strategies_traits::{StrategyRepositoryTrait, StrategyServiceTrait};
use crate::assets::AssetReferenceServiceTrait;
use crate::constants::{ALLOCATION_SUM_TOLERANCE, ONE_HUNDRED};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::round_percent;

pub struct StrategyService {
    repository: Arc<dyn StrategyRepositoryTrait>,
    asset_service: Arc<dyn AssetReferenceServiceTrait>,
}

impl StrategyService {
    pub fn new(
        repository: Arc<dyn StrategyRepositoryTrait>,
        asset_service: Arc<dyn AssetReferenceServiceTrait>,
    ) -> Self {
        Self {
            repository,
            asset_service,
        }
    }

    fn validate_percent_range(allocations: &HashMap<String, Decimal>) -> Result<()> {
        for (asset_class_id, percent) in allocations {
            if *percent < Decimal::ZERO || *percent > ONE_HUNDRED {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Target percent for asset class {} must be between 0 and 100, got {}",
                    asset_class_id, percent
                ))));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StrategyServiceTrait for StrategyService {
    async fn create_strategy(
        &self,
        mut new_strategy: NewAllocationStrategy,
    ) -> Result<AllocationStrategy> {
        new_strategy.validate()?;
        let existing = self.repository.list_for_user(&new_strategy.user_id)?;
        if existing.iter().any(|s| s.name == new_strategy.name) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "A strategy named '{}' already exists",
                new_strategy.name
            ))));
        }
        new_strategy.id = Some(
            new_strategy
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        );
        self.repository.create_strategy(new_strategy).await
    }

    async fn delete_strategy(&self, strategy_id: &str) -> Result<()> {
        self.repository.delete_strategy(strategy_id).await?;
        Ok(())
    }

    fn get_strategy_with_targets(&self, strategy_id: &str) -> Result<Option<StrategyWithTargets>> {
        self.repository.get_with_targets(strategy_id)
    }

    fn list_strategies(&self, user_id: &str) -> Result<Vec<AllocationStrategy>> {
        self.repository.list_for_user(user_id)
    }

    /// Validates and persists a strategy's full target set.
    ///
    /// Cash handling:
    /// - if Cash is included, the whole map must sum to exactly 100 within
    ///   tolerance;
    /// - if Cash is omitted, the rest must sum to at most 100 and the Cash
    ///   remainder is injected automatically, persisted only when positive.
    ///
    /// Persisting is a full atomic replace of the prior target set; only
    /// nonzero percentages are stored. An empty map clears the strategy's
    /// targets without enforcing any sum.
    async fn save_allocations(
        &self,
        strategy_id: &str,
        allocations: HashMap<String, Decimal>,
    ) -> Result<Vec<TargetAllocation>> {
        let strategy = self
            .repository
            .get_strategy(strategy_id)?
            .ok_or_else(|| Error::NotFound(format!("Allocation strategy {}", strategy_id)))?;

        if allocations.is_empty() {
            self.repository
                .replace_allocations(strategy_id, Vec::new())
                .await?;
            return Ok(Vec::new());
        }

        Self::validate_percent_range(&allocations)?;

        let cash = self.asset_service.cash_asset_class()?;
        let explicit_cash = allocations.get(&cash.id).copied();
        let non_cash_sum: Decimal = allocations
            .iter()
            .filter(|(asset_class_id, _)| **asset_class_id != cash.id)
            .map(|(_, percent)| *percent)
            .sum();

        let mut final_map = allocations;
        match explicit_cash {
            Some(cash_percent) => {
                let total = non_cash_sum + cash_percent;
                if (total - ONE_HUNDRED).abs() > ALLOCATION_SUM_TOLERANCE {
                    return Err(Error::Validation(ValidationError::InvalidInput(format!(
                        "Allocation percentages must sum to 100 when cash is included; got {}",
                        total
                    ))));
                }
            }
            None => {
                if non_cash_sum > ONE_HUNDRED + ALLOCATION_SUM_TOLERANCE {
                    return Err(Error::Validation(ValidationError::InvalidInput(format!(
                        "Allocation percentages must sum to at most 100; got {}",
                        non_cash_sum
                    ))));
                }
                let remainder = (ONE_HUNDRED - non_cash_sum).max(Decimal::ZERO);
                if remainder > Decimal::ZERO {
                    final_map.insert(cash.id.clone(), remainder);
                }
            }
        }

        // Re-check the completed map before writing. A failure here is a bug
        // in the remainder arithmetic above, not bad user input.
        let final_sum: Decimal = final_map.values().copied().sum();
        if (final_sum - ONE_HUNDRED).abs() > ALLOCATION_SUM_TOLERANCE {
            return Err(Error::DataIntegrity(format!(
                "final allocation map for strategy {} sums to {} after cash injection",
                strategy_id, final_sum
            )));
        }

        let mut targets: Vec<TargetAllocation> = final_map
            .into_iter()
            .filter(|(_, percent)| !percent.is_zero())
            .map(|(asset_class_id, percent)| TargetAllocation {
                strategy_id: strategy.id.clone(),
                asset_class_id,
                target_percent: round_percent(percent),
            })
            .collect();
        targets.sort_by(|a, b| a.asset_class_id.cmp(&b.asset_class_id));

        self.repository
            .replace_allocations(strategy_id, targets.clone())
            .await?;
        debug!(
            "Saved {} target allocations for strategy {}",
            targets.len(),
            strategy_id
        );
        Ok(targets)
    }

    async fn assign_account_type_default(
        &self,
        assignment: NewAccountTypeStrategyAssignment,
    ) -> Result<AccountTypeStrategyAssignment> {
        if self.repository.get_strategy(&assignment.strategy_id)?.is_none() {
            return Err(Error::NotFound(format!(
                "Allocation strategy {}",
                assignment.strategy_id
            )));
        }
        self.repository.upsert_assignment(assignment).await
    }

    async fn remove_account_type_default(&self, assignment_id: &str) -> Result<()> {
        self.repository.delete_assignment(assignment_id).await?;
        Ok(())
    }
}
