#[cfg(test)]
mod tests {
    use crate::accounts::{Account, AccountType};
    use crate::assets::{AssetClass, AssetClassCategory};
    use crate::holdings::PricedHolding;
    use crate::portfolio::allocation::{compute_rollup, EffectiveTargets, RollupInputs, TargetSource};
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::{BTreeMap, HashMap};

    // ==================== Fixture Builders ====================

    fn account(id: &str, account_type_id: &str) -> Account {
        Account {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            name: id.to_string(),
            portfolio_id: "portfolio-1".to_string(),
            account_type_id: account_type_id.to_string(),
            institution_id: "inst-1".to_string(),
            allocation_strategy_id: None,
            is_active: true,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn account_type(id: &str, code: &str) -> AccountType {
        AccountType {
            id: id.to_string(),
            code: code.to_string(),
            label: code.to_string(),
            sort_order: 0,
        }
    }

    fn asset_class(id: &str, name: &str, category_code: &str) -> AssetClass {
        AssetClass {
            id: id.to_string(),
            name: name.to_string(),
            category_code: category_code.to_string(),
            expected_return: None,
        }
    }

    fn category(code: &str, label: &str, parent: Option<&str>, sort_order: i32) -> AssetClassCategory {
        AssetClassCategory {
            code: code.to_string(),
            label: label.to_string(),
            parent_code: parent.map(|p| p.to_string()),
            sort_order,
        }
    }

    /// Priced at $1.00 per share so dollar amounts read directly.
    fn holding(id: &str, account_id: &str, class: &AssetClass, amount: Decimal) -> PricedHolding {
        PricedHolding {
            holding_id: id.to_string(),
            account_id: account_id.to_string(),
            symbol: format!("SYM-{}", id),
            security_name: format!("Security {}", id),
            asset_class_id: class.id.clone(),
            asset_class_name: class.name.clone(),
            category_code: class.category_code.clone(),
            shares: amount,
            price: Some(dec!(1.00)),
        }
    }

    fn effective(source: TargetSource, pairs: &[(&str, Decimal)]) -> EffectiveTargets {
        EffectiveTargets {
            strategy_id: Some("strategy-1".to_string()),
            source: Some(source),
            targets: pairs
                .iter()
                .map(|(name, percent)| (name.to_string(), *percent))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn reference_classes() -> Vec<AssetClass> {
        vec![
            asset_class("ac-us", "US Equities", "us_equities"),
            asset_class("ac-intl-dev", "Intl Developed", "intl_equities"),
            asset_class("ac-intl-em", "Intl Emerging", "intl_equities"),
            asset_class("ac-treas-short", "Treasuries-Short", "treasuries"),
            asset_class("ac-treas-int", "Treasuries-Intermediate", "treasuries"),
            asset_class("ac-reit", "REIT", "real_estate"),
            asset_class("ac-cash", "Cash", "cash"),
        ]
    }

    fn reference_categories() -> Vec<AssetClassCategory> {
        vec![
            category("equities", "Equities", None, 1),
            category("us_equities", "US Equities", Some("equities"), 1),
            category("intl_equities", "International Equities", Some("equities"), 2),
            category("fixed_income", "Fixed Income", None, 2),
            category("treasuries", "Treasuries", Some("fixed_income"), 1),
            category("real_estate", "Real Estate", None, 3),
            category("cash", "Cash", None, 99),
        ]
    }

    fn cash_class() -> AssetClass {
        asset_class("ac-cash", "Cash", "cash")
    }

    /// The taxable-strategy scenario: one account resolved through its
    /// account-type assignment, cash explicit at 20%.
    fn ml_brokerage_inputs() -> RollupInputs {
        let classes = reference_classes();
        let us = classes[0].clone();
        let intl_dev = classes[1].clone();
        let intl_em = classes[2].clone();
        let treas_short = classes[3].clone();
        let treas_int = classes[4].clone();
        let cash = classes[6].clone();

        let taxable_strategy = effective(
            TargetSource::AccountTypeDefault,
            &[
                ("US Equities", dec!(30)),
                ("Intl Developed", dec!(25)),
                ("Intl Emerging", dec!(10)),
                ("Treasuries-Short", dec!(10)),
                ("Treasuries-Intermediate", dec!(5)),
                ("Cash", dec!(20)),
            ],
        );

        RollupInputs {
            accounts: vec![account("ml", "type-taxable")],
            account_types: vec![account_type("type-taxable", "taxable")],
            asset_classes: classes.clone(),
            categories: reference_categories(),
            holdings: vec![
                holding("h1", "ml", &us, dec!(408038.56)),
                holding("h2", "ml", &intl_dev, dec!(350000.00)),
                holding("h3", "ml", &intl_em, dec!(150000.00)),
                holding("h4", "ml", &treas_short, dec!(140000.00)),
                holding("h5", "ml", &treas_int, dec!(75000.00)),
                holding("h6", "ml", &cash, dec!(302001.53)),
            ],
            targets: HashMap::from([("ml".to_string(), taxable_strategy)]),
            cash: cash_class(),
        }
    }

    fn find_node<'a>(
        rollup: &'a crate::portfolio::allocation::PortfolioRollup,
        name: &str,
    ) -> &'a crate::portfolio::allocation::AssetClassNode {
        rollup
            .groups
            .iter()
            .flat_map(|g| g.categories.iter())
            .flat_map(|c| c.asset_classes.iter())
            .find(|n| n.name == name)
            .unwrap_or_else(|| panic!("node '{}' not found", name))
    }

    // ==================== Taxable Strategy Scenario ====================

    #[test]
    fn test_ml_brokerage_account_total() {
        let rollup = compute_rollup(ml_brokerage_inputs()).unwrap();
        assert_eq!(rollup.account_totals.get("ml"), Some(&dec!(1425040.09)));
        assert_eq!(rollup.total_value, dec!(1425040.09));
        assert_eq!(
            rollup.account_type_totals.get("taxable"),
            Some(&dec!(1425040.09))
        );
    }

    #[test]
    fn test_ml_brokerage_us_equities_target_and_variance() {
        let rollup = compute_rollup(ml_brokerage_inputs()).unwrap();
        let us = find_node(&rollup, "US Equities");
        assert_eq!(us.current_value, dec!(408038.56));
        assert_eq!(us.target_value, dec!(427512.03));
        assert_eq!(us.variance, dec!(-19473.47));
    }

    #[test]
    fn test_ml_brokerage_explicit_cash_target() {
        let rollup = compute_rollup(ml_brokerage_inputs()).unwrap();
        let cash = rollup.cash.as_ref().expect("cash node");
        assert!(cash.is_cash);
        assert_eq!(cash.current_value, dec!(302001.53));
        // 1,425,040.09 × 0.20 = 285,008.018 -> 285,008.02
        assert_eq!(cash.target_value, dec!(285008.02));
        assert_eq!(cash.variance, dec!(16993.51));
    }

    #[test]
    fn test_ml_brokerage_variances_conserve_to_the_cent() {
        let rollup = compute_rollup(ml_brokerage_inputs()).unwrap();

        let mut current_sum = Decimal::ZERO;
        let mut target_sum = Decimal::ZERO;
        let mut variance_sum = Decimal::ZERO;
        for group in &rollup.groups {
            for category in &group.categories {
                for node in &category.asset_classes {
                    current_sum += node.current_value;
                    target_sum += node.target_value;
                    variance_sum += node.variance;
                }
            }
        }
        if let Some(cash) = &rollup.cash {
            current_sum += cash.current_value;
            target_sum += cash.target_value;
            variance_sum += cash.variance;
        }

        assert_eq!(current_sum, rollup.total_value);
        // Variances are additive over the complete partition.
        assert_eq!(variance_sum, current_sum - target_sum);
        // For this strategy the per-class rounding errors cancel exactly.
        assert_eq!(target_sum, dec!(1425040.09));
        assert_eq!(variance_sum, Decimal::ZERO);
    }

    #[test]
    fn test_ml_brokerage_tree_shape_and_suppression() {
        let rollup = compute_rollup(ml_brokerage_inputs()).unwrap();

        assert_eq!(rollup.groups.len(), 2);
        let equities = &rollup.groups[0];
        assert_eq!(equities.code, "equities");
        assert_eq!(equities.categories.len(), 2);
        assert!(equities.has_group_total());
        // Single asset class -> subtotal suppressed.
        assert!(!equities.categories[0].has_subtotal());
        assert!(equities.categories[1].has_subtotal());

        let fixed_income = &rollup.groups[1];
        assert_eq!(fixed_income.code, "fixed_income");
        assert!(!fixed_income.has_group_total());
        assert_eq!(fixed_income.asset_class_count(), 2);
    }

    #[test]
    fn test_ml_brokerage_category_rollup_sums() {
        let rollup = compute_rollup(ml_brokerage_inputs()).unwrap();
        let equities = &rollup.groups[0];
        let intl = &equities.categories[1];

        assert_eq!(intl.current_value, dec!(500000.00));
        // 356,260.02 + 142,504.01
        assert_eq!(intl.target_value, dec!(498764.03));
        assert_eq!(intl.variance, dec!(1235.97));
        assert_eq!(
            equities.current_value,
            intl.current_value + equities.categories[0].current_value
        );
    }

    // ==================== End-To-End 60/40 Scenario ====================

    fn sixty_forty_inputs() -> RollupInputs {
        let us = asset_class("ac-us", "US Equities", "us_equities");
        let bonds = asset_class("ac-bonds", "Bonds", "fixed_income");

        RollupInputs {
            accounts: vec![account("acct-1", "type-taxable")],
            account_types: vec![account_type("type-taxable", "taxable")],
            asset_classes: vec![us.clone(), bonds.clone(), cash_class()],
            categories: vec![
                category("us_equities", "US Equities", None, 1),
                category("fixed_income", "Fixed Income", None, 2),
                category("cash", "Cash", None, 99),
            ],
            holdings: vec![
                holding("h1", "acct-1", &us, dec!(50000)),
                holding("h2", "acct-1", &bonds, dec!(30000)),
            ],
            targets: HashMap::from([(
                "acct-1".to_string(),
                effective(
                    TargetSource::AccountOverride,
                    &[("US Equities", dec!(60)), ("Bonds", dec!(40))],
                ),
            )]),
            cash: cash_class(),
        }
    }

    #[test]
    fn test_sixty_forty_percentages() {
        let rollup = compute_rollup(sixty_forty_inputs()).unwrap();

        let us = find_node(&rollup, "US Equities");
        assert_eq!(us.current_percent, dec!(62.5));
        assert_eq!(us.target_percent, dec!(60));
        assert_eq!(us.variance_percent, dec!(2.5));

        let bonds = find_node(&rollup, "Bonds");
        assert_eq!(bonds.current_percent, dec!(37.5));
        assert_eq!(bonds.target_percent, dec!(40));
        assert_eq!(bonds.variance_percent, dec!(-2.5));
    }

    #[test]
    fn test_sixty_forty_grand_total_identity() {
        let rollup = compute_rollup(sixty_forty_inputs()).unwrap();
        let grand = rollup.grand_total();

        assert_eq!(grand.current_value, dec!(80000.00));
        assert_eq!(grand.target_value, dec!(80000.00));
        assert_eq!(grand.variance, Decimal::ZERO);
        assert_eq!(grand.current_percent, dec!(100));
        assert_eq!(grand.variance_percent, Decimal::ZERO);
    }

    #[test]
    fn test_sixty_forty_has_no_cash_node() {
        // Non-cash targets sum to 100, nothing held in cash: the implied
        // remainder is zero and no cash node appears.
        let rollup = compute_rollup(sixty_forty_inputs()).unwrap();
        assert!(rollup.cash.is_none());
    }

    // ==================== Per-Account Dollar Base ====================

    #[test]
    fn test_target_dollars_use_each_accounts_own_total() {
        let us = asset_class("ac-us", "US Equities", "us_equities");
        let shared = &[("US Equities", dec!(50))];

        let inputs = RollupInputs {
            accounts: vec![account("a", "type-taxable"), account("b", "type-taxable")],
            account_types: vec![account_type("type-taxable", "taxable")],
            asset_classes: vec![us.clone(), cash_class()],
            categories: vec![
                category("us_equities", "US Equities", None, 1),
                category("cash", "Cash", None, 99),
            ],
            holdings: vec![
                holding("h1", "a", &us, dec!(1000.01)),
                holding("h2", "b", &us, dec!(2000.03)),
            ],
            targets: HashMap::from([
                ("a".to_string(), effective(TargetSource::AccountTypeDefault, shared)),
                ("b".to_string(), effective(TargetSource::AccountTypeDefault, shared)),
            ]),
            cash: cash_class(),
        };

        let rollup = compute_rollup(inputs).unwrap();
        let us_node = find_node(&rollup, "US Equities");
        // 1000.01 × 0.5 = 500.005 -> 500.01 and 2000.03 × 0.5 = 1000.015 ->
        // 1000.02, summed per account. A portfolio-wide base would give
        // 3000.04 × 0.5 = 1500.02 instead.
        assert_eq!(us_node.target_value, dec!(1500.03));
    }

    // ==================== Degenerate Cases ====================

    #[test]
    fn test_targeted_but_unheld_class_is_visible() {
        let us = asset_class("ac-us", "US Equities", "us_equities");

        let inputs = RollupInputs {
            accounts: vec![account("acct-1", "type-taxable")],
            account_types: vec![account_type("type-taxable", "taxable")],
            asset_classes: vec![
                us.clone(),
                asset_class("ac-reit", "REIT", "real_estate"),
                cash_class(),
            ],
            categories: vec![
                category("us_equities", "US Equities", None, 1),
                category("real_estate", "Real Estate", None, 3),
                category("cash", "Cash", None, 99),
            ],
            holdings: vec![holding("h1", "acct-1", &us, dec!(10000))],
            targets: HashMap::from([(
                "acct-1".to_string(),
                effective(
                    TargetSource::AccountOverride,
                    &[("US Equities", dec!(90)), ("REIT", dec!(10))],
                ),
            )]),
            cash: cash_class(),
        };

        let rollup = compute_rollup(inputs).unwrap();
        let reit = find_node(&rollup, "REIT");
        assert_eq!(reit.current_value, Decimal::ZERO);
        assert_eq!(reit.target_value, dec!(1000.00));
        assert_eq!(reit.variance, dec!(-1000.00));
    }

    #[test]
    fn test_over_allocated_targets_clamp_implied_cash() {
        let us = asset_class("ac-us", "US Equities", "us_equities");
        let bonds = asset_class("ac-bonds", "Bonds", "fixed_income");

        let inputs = RollupInputs {
            accounts: vec![account("acct-1", "type-taxable")],
            account_types: vec![account_type("type-taxable", "taxable")],
            asset_classes: vec![us.clone(), bonds.clone(), cash_class()],
            categories: vec![
                category("us_equities", "US Equities", None, 1),
                category("fixed_income", "Fixed Income", None, 2),
                category("cash", "Cash", None, 99),
            ],
            holdings: vec![holding("h1", "acct-1", &us, dec!(1000))],
            targets: HashMap::from([(
                "acct-1".to_string(),
                effective(
                    TargetSource::AccountOverride,
                    &[("US Equities", dec!(70)), ("Bonds", dec!(50))],
                ),
            )]),
            cash: cash_class(),
        };

        // The read path is lenient: targets over 100% clamp the implied cash
        // to zero instead of raising.
        let rollup = compute_rollup(inputs).unwrap();
        assert!(rollup.cash.is_none());
        assert_eq!(find_node(&rollup, "US Equities").target_value, dec!(700.00));
        assert_eq!(find_node(&rollup, "Bonds").target_value, dec!(500.00));
    }

    #[test]
    fn test_account_without_strategy_contributes_current_only() {
        let us = asset_class("ac-us", "US Equities", "us_equities");

        let inputs = RollupInputs {
            accounts: vec![account("acct-1", "type-taxable")],
            account_types: vec![account_type("type-taxable", "taxable")],
            asset_classes: vec![us.clone(), cash_class()],
            categories: vec![
                category("us_equities", "US Equities", None, 1),
                category("cash", "Cash", None, 99),
            ],
            holdings: vec![holding("h1", "acct-1", &us, dec!(5000))],
            targets: HashMap::from([("acct-1".to_string(), EffectiveTargets::empty())]),
            cash: cash_class(),
        };

        let rollup = compute_rollup(inputs).unwrap();
        let us_node = find_node(&rollup, "US Equities");
        assert_eq!(us_node.current_value, dec!(5000.00));
        assert_eq!(us_node.target_value, Decimal::ZERO);
        assert_eq!(rollup.total_value, dec!(5000.00));
    }

    #[test]
    fn test_unpriced_holdings_contribute_zero() {
        let us = asset_class("ac-us", "US Equities", "us_equities");
        let mut unpriced = holding("h1", "acct-1", &us, dec!(123.456));
        unpriced.price = None;

        let inputs = RollupInputs {
            accounts: vec![account("acct-1", "type-taxable")],
            account_types: vec![account_type("type-taxable", "taxable")],
            asset_classes: vec![us, cash_class()],
            categories: vec![
                category("us_equities", "US Equities", None, 1),
                category("cash", "Cash", None, 99),
            ],
            holdings: vec![unpriced],
            targets: HashMap::new(),
            cash: cash_class(),
        };

        let rollup = compute_rollup(inputs).unwrap();
        assert_eq!(rollup.total_value, Decimal::ZERO);
        let us_node = find_node(&rollup, "US Equities");
        assert_eq!(us_node.current_value, Decimal::ZERO);
        // Zero total: percent math falls back to zero, never errors.
        assert_eq!(us_node.current_percent, Decimal::ZERO);
        assert_eq!(rollup.grand_total().current_percent, Decimal::ZERO);
    }

    #[test]
    fn test_empty_inputs_produce_empty_rollup() {
        let inputs = RollupInputs {
            accounts: Vec::new(),
            account_types: Vec::new(),
            asset_classes: vec![cash_class()],
            categories: vec![category("cash", "Cash", None, 99)],
            holdings: Vec::new(),
            targets: HashMap::new(),
            cash: cash_class(),
        };

        let rollup = compute_rollup(inputs).unwrap();
        assert!(rollup.groups.is_empty());
        assert!(rollup.cash.is_none());
        assert_eq!(rollup.total_value, Decimal::ZERO);
        assert_eq!(rollup.grand_total().variance, Decimal::ZERO);
    }

    // ==================== Service Wrapper ====================

    mod service {
        use super::*;
        use crate::accounts::{AccountRepositoryTrait, NewAccount, Portfolio};
        use crate::assets::{AssetReferenceServiceTrait, Security};
        use crate::errors::{Error, Result};
        use crate::holdings::HoldingsServiceTrait;
        use crate::holdings::{Holding, NewHolding};
        use crate::portfolio::allocation::{
            AllocationRollupService, AllocationRollupServiceTrait, RollupScope,
            TargetResolutionServiceTrait,
        };
        use async_trait::async_trait;
        use std::sync::Arc;

        struct MockAccountRepository {
            accounts: Vec<Account>,
            account_types: Vec<AccountType>,
        }

        #[async_trait]
        impl AccountRepositoryTrait for MockAccountRepository {
            async fn create(&self, _new_account: NewAccount) -> Result<Account> {
                unimplemented!("Not needed for tests")
            }

            async fn delete(&self, _account_id: &str) -> Result<usize> {
                Ok(0)
            }

            fn get_by_id(&self, account_id: &str) -> Result<Account> {
                self.accounts
                    .iter()
                    .find(|a| a.id == account_id)
                    .cloned()
                    .ok_or_else(|| Error::NotFound(format!("Account {}", account_id)))
            }

            fn list_for_user(&self, user_id: &str) -> Result<Vec<Account>> {
                Ok(self
                    .accounts
                    .iter()
                    .filter(|a| a.user_id == user_id)
                    .cloned()
                    .collect())
            }

            fn list_account_types(&self) -> Result<Vec<AccountType>> {
                Ok(self.account_types.clone())
            }

            fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
                Ok(Portfolio {
                    id: portfolio_id.to_string(),
                    user_id: "user-1".to_string(),
                    name: "Main".to_string(),
                    allocation_strategy_id: None,
                })
            }
        }

        struct MockHoldingsService {
            holdings: Vec<PricedHolding>,
        }

        #[async_trait]
        impl HoldingsServiceTrait for MockHoldingsService {
            async fn get_priced_holdings(
                &self,
                _user_id: &str,
                account_id: Option<&str>,
            ) -> Result<Vec<PricedHolding>> {
                Ok(self
                    .holdings
                    .iter()
                    .filter(|h| account_id.map_or(true, |id| h.account_id == id))
                    .cloned()
                    .collect())
            }

            async fn create_holding(&self, _new_holding: NewHolding) -> Result<Holding> {
                unimplemented!("Not needed for tests")
            }

            async fn update_holding_shares(
                &self,
                _holding_id: &str,
                _shares: Decimal,
            ) -> Result<Holding> {
                unimplemented!("Not needed for tests")
            }

            async fn delete_holding(&self, _holding_id: &str) -> Result<()> {
                Ok(())
            }
        }

        struct MockTargetService {
            targets: HashMap<String, EffectiveTargets>,
            policy: HashMap<String, EffectiveTargets>,
        }

        impl TargetResolutionServiceTrait for MockTargetService {
            fn effective_targets_for_user(
                &self,
                _user_id: &str,
            ) -> Result<HashMap<String, EffectiveTargets>> {
                Ok(self.targets.clone())
            }

            fn policy_targets_for_user(
                &self,
                _user_id: &str,
            ) -> Result<HashMap<String, EffectiveTargets>> {
                Ok(self.policy.clone())
            }
        }

        struct MockAssetService {
            asset_classes: Vec<AssetClass>,
            categories: Vec<AssetClassCategory>,
        }

        impl AssetReferenceServiceTrait for MockAssetService {
            fn cash_asset_class(&self) -> Result<AssetClass> {
                self.asset_classes
                    .iter()
                    .find(|c| c.is_cash())
                    .cloned()
                    .ok_or_else(|| Error::CashAssetClassNotFound("Cash".to_string()))
            }

            fn list_asset_classes(&self) -> Result<Vec<AssetClass>> {
                Ok(self.asset_classes.clone())
            }

            fn list_categories(&self) -> Result<Vec<AssetClassCategory>> {
                Ok(self.categories.clone())
            }

            fn list_securities(&self) -> Result<Vec<Security>> {
                Ok(Vec::new())
            }

            fn get_asset_class(&self, asset_class_id: &str) -> Result<Option<AssetClass>> {
                Ok(self
                    .asset_classes
                    .iter()
                    .find(|c| c.id == asset_class_id)
                    .cloned())
            }
        }

        fn build_service(with_cash_sentinel: bool) -> AllocationRollupService {
            let us = asset_class("ac-us", "US Equities", "us_equities");
            let mut classes = vec![us.clone()];
            if with_cash_sentinel {
                classes.push(cash_class());
            }

            let effective = effective(TargetSource::AccountOverride, &[("US Equities", dec!(100))]);
            let policy = effective_policy();

            AllocationRollupService::new(
                Arc::new(MockHoldingsService {
                    holdings: vec![
                        holding("h1", "a", &us, dec!(6000)),
                        holding("h2", "b", &us, dec!(4000)),
                    ],
                }),
                Arc::new(MockTargetService {
                    targets: HashMap::from([
                        ("a".to_string(), effective.clone()),
                        ("b".to_string(), effective),
                    ]),
                    policy: HashMap::from([("a".to_string(), policy.clone()), ("b".to_string(), policy)]),
                }),
                Arc::new(MockAccountRepository {
                    accounts: vec![account("a", "type-taxable"), account("b", "type-taxable")],
                    account_types: vec![account_type("type-taxable", "taxable")],
                }),
                Arc::new(MockAssetService {
                    asset_classes: classes,
                    categories: vec![
                        category("us_equities", "US Equities", None, 1),
                        category("cash", "Cash", None, 99),
                    ],
                }),
            )
        }

        fn effective_policy() -> EffectiveTargets {
            super::effective(TargetSource::AccountTypeDefault, &[("US Equities", dec!(50))])
        }

        #[tokio::test]
        async fn test_build_rollup_portfolio_scope() {
            let service = build_service(true);
            let rollup = service
                .build_rollup("user-1", RollupScope::Portfolio)
                .await
                .unwrap();

            assert_eq!(rollup.total_value, dec!(10000.00));
            let us = find_node(&rollup, "US Equities");
            assert_eq!(us.target_value, dec!(10000.00));
            assert_eq!(us.variance, Decimal::ZERO);
        }

        #[tokio::test]
        async fn test_build_rollup_account_scope() {
            let service = build_service(true);
            let rollup = service
                .build_rollup("user-1", RollupScope::Account("a".to_string()))
                .await
                .unwrap();

            assert_eq!(rollup.total_value, dec!(6000.00));
            assert_eq!(rollup.account_totals.len(), 1);
        }

        #[tokio::test]
        async fn test_build_policy_rollup_uses_policy_targets() {
            let service = build_service(true);
            let rollup = service.build_policy_rollup("user-1").await.unwrap();

            let us = find_node(&rollup, "US Equities");
            // Policy targets 50% instead of the 100% override.
            assert_eq!(us.target_value, dec!(5000.00));
            // The other 50% is implied cash.
            assert_eq!(rollup.cash.as_ref().unwrap().target_value, dec!(5000.00));
        }

        #[tokio::test]
        async fn test_missing_cash_sentinel_fails_rollup() {
            let service = build_service(false);
            let err = service
                .build_rollup("user-1", RollupScope::Portfolio)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::CashAssetClassNotFound(_)));
        }
    }

    #[test]
    fn test_by_account_type_breakdown() {
        let us = asset_class("ac-us", "US Equities", "us_equities");

        let inputs = RollupInputs {
            accounts: vec![account("a", "type-taxable"), account("b", "type-ira")],
            account_types: vec![
                account_type("type-taxable", "taxable"),
                account_type("type-ira", "ira"),
            ],
            asset_classes: vec![us.clone(), cash_class()],
            categories: vec![
                category("us_equities", "US Equities", None, 1),
                category("cash", "Cash", None, 99),
            ],
            holdings: vec![
                holding("h1", "a", &us, dec!(1000)),
                holding("h2", "b", &us, dec!(3000)),
            ],
            targets: HashMap::new(),
            cash: cash_class(),
        };

        let rollup = compute_rollup(inputs).unwrap();
        let us_node = find_node(&rollup, "US Equities");
        assert_eq!(us_node.by_account_type.get("taxable"), Some(&dec!(1000.00)));
        assert_eq!(us_node.by_account_type.get("ira"), Some(&dec!(3000.00)));
        assert_eq!(us_node.by_account.get("a"), Some(&dec!(1000.00)));
        assert_eq!(rollup.account_type_totals.get("ira"), Some(&dec!(3000.00)));
    }
}
