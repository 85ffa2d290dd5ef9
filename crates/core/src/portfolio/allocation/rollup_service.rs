//! The allocation rollup engine.
//!
//! Combines aggregated holdings with resolved targets into the
//! group/category tree, attaching target dollars and variance at every
//! level. The core computation is a pure synchronous function over
//! fully-loaded inputs; the service wrapper only loads those inputs.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::aggregation_service::aggregate_holdings;
use super::allocation_model::{Allocation, EffectiveTargets};
use super::rollup_model::{AssetClassNode, CategoryNode, GroupNode, PortfolioRollup};
use super::target_service::TargetResolutionServiceTrait;
use crate::accounts::{Account, AccountRepositoryTrait, AccountType};
use crate::assets::{resolve_group, AssetClass, AssetClassCategory, AssetReferenceServiceTrait};
use crate::constants::ONE_HUNDRED;
use crate::errors::Result;
use crate::holdings::{HoldingsServiceTrait, PricedHolding};
use crate::utils::decimal_utils::{percentage_of, ratio_of, round_percent};

/// Fully-loaded inputs for one rollup computation. Loading is the caller's
/// concern; the engine itself performs no I/O.
pub struct RollupInputs {
    pub accounts: Vec<Account>,
    pub account_types: Vec<AccountType>,
    pub asset_classes: Vec<AssetClass>,
    pub categories: Vec<AssetClassCategory>,
    pub holdings: Vec<PricedHolding>,
    /// Effective targets per account id.
    pub targets: HashMap<String, EffectiveTargets>,
    /// The injected Cash sentinel.
    pub cash: AssetClass,
}

/// Which slice of the user's holdings the rollup covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollupScope {
    Portfolio,
    Account(String),
}

/// Builds the rollup tree from fully-loaded inputs.
///
/// Target dollars are computed per account from that account's own current
/// total - the override hierarchy resolves the percentage, never the dollar
/// base. Higher levels are plain sums of the quantized per-class figures,
/// which keeps variances additive: for any complete partition the variances
/// sum to `current − target` of the whole, to the cent.
pub fn compute_rollup(inputs: RollupInputs) -> Result<PortfolioRollup> {
    let aggregation = aggregate_holdings(&inputs.accounts, &inputs.account_types, &inputs.holdings);
    let cash_name = inputs.cash.name.clone();
    let total_value = aggregation.total_value;

    // Per-account target dollars, accumulated per asset-class name.
    let mut target_values: BTreeMap<String, Decimal> = BTreeMap::new();
    for account in &inputs.accounts {
        let Some(effective) = inputs.targets.get(&account.id) else {
            continue;
        };
        if effective.is_empty() {
            continue;
        }
        let account_total = aggregation.account_total(&account.id);

        for (name, percent) in &effective.targets {
            let allocation = Allocation::new(name.clone(), *percent);
            *target_values.entry(name.clone()).or_insert(Decimal::ZERO) +=
                allocation.target_value_for(account_total);
        }

        // Cash remainder for sets that do not store cash explicitly,
        // computed at the scope the strategy was resolved at.
        if effective.explicit_cash(&cash_name).is_none() {
            if effective.non_cash_sum(&cash_name) > ONE_HUNDRED {
                warn!(
                    "Account {} targets exceed 100%; implied cash clamped to 0",
                    account.id
                );
            }
            let implied = effective.implied_cash_percent(&cash_name);
            if implied > Decimal::ZERO {
                let allocation = Allocation::new(cash_name.clone(), implied);
                *target_values
                    .entry(cash_name.clone())
                    .or_insert(Decimal::ZERO) += allocation.target_value_for(account_total);
            }
        }
    }

    let classes_by_name: HashMap<&str, &AssetClass> = inputs
        .asset_classes
        .iter()
        .map(|c| (c.name.as_str(), c))
        .collect();
    let categories_by_code: HashMap<String, AssetClassCategory> = inputs
        .categories
        .iter()
        .map(|c| (c.code.clone(), c.clone()))
        .collect();

    // A node exists when the asset class is held or targeted.
    let mut node_names: BTreeSet<String> = aggregation.by_asset_class.keys().cloned().collect();
    node_names.extend(target_values.keys().cloned());

    let mut cash_node: Option<AssetClassNode> = None;
    let mut category_nodes: BTreeMap<String, Vec<AssetClassNode>> = BTreeMap::new();

    for name in node_names {
        let Some(asset_class) = classes_by_name.get(name.as_str()) else {
            warn!("Unknown asset class '{}' in rollup inputs; skipped", name);
            continue;
        };
        let aggregate = aggregation.by_asset_class.get(&name);
        let current_value = aggregate.map(|a| a.current_value).unwrap_or(Decimal::ZERO);
        let target_value = target_values.get(&name).copied().unwrap_or(Decimal::ZERO);
        // Both sides are already at the money scale, so the difference is
        // exact and sums of variances stay consistent with sums of totals.
        let variance = current_value - target_value;

        let node = AssetClassNode {
            asset_class_id: asset_class.id.clone(),
            name: name.clone(),
            category_code: asset_class.category_code.clone(),
            current_value,
            target_value,
            variance,
            current_percent: percentage_of(current_value, total_value),
            target_percent: percentage_of(target_value, total_value),
            variance_percent: round_percent(ratio_of(variance, total_value) * ONE_HUNDRED),
            by_account_type: aggregate
                .map(|a| a.by_account_type.clone())
                .unwrap_or_default(),
            by_account: aggregate.map(|a| a.by_account.clone()).unwrap_or_default(),
            is_cash: name == cash_name,
        };

        if node.is_cash {
            cash_node = Some(node);
        } else {
            category_nodes
                .entry(asset_class.category_code.clone())
                .or_default()
                .push(node);
        }
    }

    // Category and group levels: plain sums of the quantized class figures.
    let mut groups_map: BTreeMap<String, GroupNode> = BTreeMap::new();
    for (code, mut nodes) in category_nodes {
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        let current_value: Decimal = nodes.iter().map(|n| n.current_value).sum();
        let target_value: Decimal = nodes.iter().map(|n| n.target_value).sum();
        let variance = current_value - target_value;

        let (label, sort_order, group_key) = match categories_by_code.get(&code) {
            Some(category) => {
                let group = resolve_group(&categories_by_code, &code)?;
                (
                    category.label.clone(),
                    category.sort_order,
                    (group.code.clone(), group.label.clone(), group.sort_order),
                )
            }
            None => {
                warn!("Holdings reference unknown category '{}'", code);
                (
                    code.clone(),
                    i32::MAX,
                    (code.clone(), code.clone(), i32::MAX),
                )
            }
        };

        let category_node = CategoryNode {
            code,
            label,
            sort_order,
            asset_classes: nodes,
            current_value,
            target_value,
            variance,
            current_percent: percentage_of(current_value, total_value),
            target_percent: percentage_of(target_value, total_value),
            variance_percent: round_percent(ratio_of(variance, total_value) * ONE_HUNDRED),
        };

        let (group_code, group_label, group_sort) = group_key;
        let group = groups_map.entry(group_code.clone()).or_insert_with(|| GroupNode {
            code: group_code,
            label: group_label,
            sort_order: group_sort,
            categories: Vec::new(),
            current_value: Decimal::ZERO,
            target_value: Decimal::ZERO,
            variance: Decimal::ZERO,
            current_percent: Decimal::ZERO,
            target_percent: Decimal::ZERO,
            variance_percent: Decimal::ZERO,
        });
        group.current_value += category_node.current_value;
        group.target_value += category_node.target_value;
        group.variance += category_node.variance;
        group.categories.push(category_node);
    }

    let mut groups: Vec<GroupNode> = groups_map.into_values().collect();
    for group in &mut groups {
        group
            .categories
            .sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.label.cmp(&b.label)));
        group.current_percent = percentage_of(group.current_value, total_value);
        group.target_percent = percentage_of(group.target_value, total_value);
        group.variance_percent = round_percent(ratio_of(group.variance, total_value) * ONE_HUNDRED);
    }
    groups.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.label.cmp(&b.label)));

    Ok(PortfolioRollup {
        groups,
        cash: cash_node,
        account_totals: aggregation.account_totals,
        account_type_totals: aggregation.account_type_totals,
        total_value,
    })
}

/// Trait for the rollup service.
#[async_trait]
pub trait AllocationRollupServiceTrait: Send + Sync {
    /// Rollup against effective targets (account overrides honored).
    async fn build_rollup(&self, user_id: &str, scope: RollupScope) -> Result<PortfolioRollup>;

    /// Rollup against policy targets (account overrides ignored), for
    /// effective-vs-policy comparison displays.
    async fn build_policy_rollup(&self, user_id: &str) -> Result<PortfolioRollup>;
}

/// Loads a fresh snapshot per invocation and hands it to [`compute_rollup`].
/// No state is shared across invocations.
pub struct AllocationRollupService {
    holdings_service: Arc<dyn HoldingsServiceTrait>,
    target_service: Arc<dyn TargetResolutionServiceTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    asset_service: Arc<dyn AssetReferenceServiceTrait>,
}

impl AllocationRollupService {
    pub fn new(
        holdings_service: Arc<dyn HoldingsServiceTrait>,
        target_service: Arc<dyn TargetResolutionServiceTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        asset_service: Arc<dyn AssetReferenceServiceTrait>,
    ) -> Self {
        Self {
            holdings_service,
            target_service,
            account_repository,
            asset_service,
        }
    }

    async fn load_inputs(
        &self,
        user_id: &str,
        scope: &RollupScope,
        policy: bool,
    ) -> Result<RollupInputs> {
        let account_filter = match scope {
            RollupScope::Account(id) => Some(id.as_str()),
            RollupScope::Portfolio => None,
        };
        let holdings = self
            .holdings_service
            .get_priced_holdings(user_id, account_filter)
            .await?;
        let accounts = match scope {
            RollupScope::Account(id) => vec![self.account_repository.get_by_id(id)?],
            RollupScope::Portfolio => self.account_repository.list_for_user(user_id)?,
        };
        let targets = if policy {
            self.target_service.policy_targets_for_user(user_id)?
        } else {
            self.target_service.effective_targets_for_user(user_id)?
        };
        let cash = self.asset_service.cash_asset_class()?;

        Ok(RollupInputs {
            accounts,
            account_types: self.account_repository.list_account_types()?,
            asset_classes: self.asset_service.list_asset_classes()?,
            categories: self.asset_service.list_categories()?,
            holdings,
            targets,
            cash,
        })
    }
}

#[async_trait]
impl AllocationRollupServiceTrait for AllocationRollupService {
    async fn build_rollup(&self, user_id: &str, scope: RollupScope) -> Result<PortfolioRollup> {
        debug!("Building allocation rollup for user {}", user_id);
        let inputs = self.load_inputs(user_id, &scope, false).await?;
        compute_rollup(inputs)
    }

    async fn build_policy_rollup(&self, user_id: &str) -> Result<PortfolioRollup> {
        debug!("Building policy rollup for user {}", user_id);
        let inputs = self
            .load_inputs(user_id, &RollupScope::Portfolio, true)
            .await?;
        compute_rollup(inputs)
    }
}
