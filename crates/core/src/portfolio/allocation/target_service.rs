//! Effective target resolution across the strategy override hierarchy.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::{debug, warn};

use super::allocation_model::{EffectiveTargets, TargetSource};
use crate::accounts::AccountRepositoryTrait;
use crate::assets::AssetReferenceServiceTrait;
use crate::errors::Result;
use crate::strategies::{StrategyRepositoryTrait, TargetAllocation};

/// Ordered resolution of the strategy an account follows: the account's own
/// override first, then the account-type default, then the portfolio
/// default. First non-null wins.
pub fn resolve_strategy_source(
    account_override: Option<&str>,
    account_type_default: Option<&str>,
    portfolio_default: Option<&str>,
) -> Option<(String, TargetSource)> {
    if let Some(strategy_id) = account_override {
        return Some((strategy_id.to_string(), TargetSource::AccountOverride));
    }
    if let Some(strategy_id) = account_type_default {
        return Some((strategy_id.to_string(), TargetSource::AccountTypeDefault));
    }
    portfolio_default.map(|strategy_id| (strategy_id.to_string(), TargetSource::PortfolioDefault))
}

/// Trait for resolving per-account target sets.
pub trait TargetResolutionServiceTrait: Send + Sync {
    /// Effective targets per account id. Accounts resolving no strategy map
    /// to an empty target set - not an error. Resolution runs on every call;
    /// assignments can change between requests, so nothing is cached across
    /// them.
    fn effective_targets_for_user(
        &self,
        user_id: &str,
    ) -> Result<HashMap<String, EffectiveTargets>>;

    /// Same resolution with account overrides ignored: the account-type /
    /// portfolio default ("policy") view used by comparison displays.
    fn policy_targets_for_user(&self, user_id: &str) -> Result<HashMap<String, EffectiveTargets>>;
}

pub struct TargetResolutionService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    strategy_repository: Arc<dyn StrategyRepositoryTrait>,
    asset_service: Arc<dyn AssetReferenceServiceTrait>,
}

impl TargetResolutionService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        strategy_repository: Arc<dyn StrategyRepositoryTrait>,
        asset_service: Arc<dyn AssetReferenceServiceTrait>,
    ) -> Self {
        Self {
            account_repository,
            strategy_repository,
            asset_service,
        }
    }

    fn resolve(
        &self,
        user_id: &str,
        include_account_overrides: bool,
    ) -> Result<HashMap<String, EffectiveTargets>> {
        let accounts = self.account_repository.list_for_user(user_id)?;
        let assignments = self.strategy_repository.list_assignments(user_id)?;
        let type_defaults: HashMap<&str, &str> = assignments
            .iter()
            .map(|a| (a.account_type_id.as_str(), a.strategy_id.as_str()))
            .collect();
        let class_names: HashMap<String, String> = self
            .asset_service
            .list_asset_classes()?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        // Memoized within this call only; nothing survives the request.
        let mut portfolio_defaults: HashMap<String, Option<String>> = HashMap::new();
        let mut strategy_targets: HashMap<String, Vec<TargetAllocation>> = HashMap::new();

        let mut result = HashMap::with_capacity(accounts.len());
        for account in &accounts {
            let portfolio_default = match portfolio_defaults.get(&account.portfolio_id) {
                Some(default) => default.clone(),
                None => {
                    let default = self
                        .account_repository
                        .get_portfolio(&account.portfolio_id)?
                        .allocation_strategy_id;
                    portfolio_defaults.insert(account.portfolio_id.clone(), default.clone());
                    default
                }
            };

            let account_override = if include_account_overrides {
                account.allocation_strategy_id.as_deref()
            } else {
                None
            };

            let resolved = resolve_strategy_source(
                account_override,
                type_defaults.get(account.account_type_id.as_str()).copied(),
                portfolio_default.as_deref(),
            );

            let effective = match resolved {
                None => EffectiveTargets::empty(),
                Some((strategy_id, source)) => {
                    let targets = match strategy_targets.get(&strategy_id) {
                        Some(targets) => targets.clone(),
                        None => {
                            let targets = self.strategy_repository.list_targets(&strategy_id)?;
                            strategy_targets.insert(strategy_id.clone(), targets.clone());
                            targets
                        }
                    };

                    let mut by_name = BTreeMap::new();
                    for target in &targets {
                        match class_names.get(&target.asset_class_id) {
                            Some(name) => {
                                by_name.insert(name.clone(), target.target_percent);
                            }
                            None => warn!(
                                "Ignoring target for unknown asset class {} in strategy {}",
                                target.asset_class_id, strategy_id
                            ),
                        }
                    }

                    EffectiveTargets {
                        strategy_id: Some(strategy_id),
                        source: Some(source),
                        targets: by_name,
                    }
                }
            };

            result.insert(account.id.clone(), effective);
        }

        Ok(result)
    }
}

impl TargetResolutionServiceTrait for TargetResolutionService {
    fn effective_targets_for_user(
        &self,
        user_id: &str,
    ) -> Result<HashMap<String, EffectiveTargets>> {
        debug!("Resolving effective targets for user {}", user_id);
        self.resolve(user_id, true)
    }

    fn policy_targets_for_user(&self, user_id: &str) -> Result<HashMap<String, EffectiveTargets>> {
        self.resolve(user_id, false)
    }
}
