//! Holdings service - joins holdings with reference data and prices.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::holdings_model::{Holding, NewHolding, PricedHolding};
use super::holdings_traits::{HoldingRepositoryTrait, HoldingsServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::assets::{AssetClass, AssetReferenceServiceTrait, Security};
use crate::errors::{Error, Result, ValidationError};
use crate::market_data::PriceSourceTrait;

pub struct HoldingsService {
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    asset_service: Arc<dyn AssetReferenceServiceTrait>,
    price_source: Arc<dyn PriceSourceTrait>,
}

impl HoldingsService {
    pub fn new(
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        asset_service: Arc<dyn AssetReferenceServiceTrait>,
        price_source: Arc<dyn PriceSourceTrait>,
    ) -> Self {
        Self {
            holding_repository,
            account_repository,
            asset_service,
            price_source,
        }
    }
}

#[async_trait]
impl HoldingsServiceTrait for HoldingsService {
    async fn get_priced_holdings(
        &self,
        user_id: &str,
        account_id: Option<&str>,
    ) -> Result<Vec<PricedHolding>> {
        let accounts = match account_id {
            Some(id) => vec![self.account_repository.get_by_id(id)?],
            None => self.account_repository.list_for_user(user_id)?,
        };
        let account_ids: Vec<String> = accounts.iter().map(|a| a.id.clone()).collect();
        let holdings = self.holding_repository.list_for_accounts(&account_ids)?;
        debug!(
            "Pricing {} holdings across {} accounts for user {}",
            holdings.len(),
            account_ids.len(),
            user_id
        );

        let securities: HashMap<String, Security> = self
            .asset_service
            .list_securities()?
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();
        let asset_classes: HashMap<String, AssetClass> = self
            .asset_service
            .list_asset_classes()?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let mut symbols: Vec<String> = holdings
            .iter()
            .filter_map(|h| securities.get(&h.security_id).map(|s| s.ticker.clone()))
            .collect();
        symbols.sort();
        symbols.dedup();

        let quotes = if symbols.is_empty() {
            HashMap::new()
        } else {
            self.price_source.latest_quotes(&symbols).await?
        };

        let mut priced = Vec::with_capacity(holdings.len());
        for holding in holdings {
            let Some(security) = securities.get(&holding.security_id) else {
                warn!(
                    "Skipping holding {}: unknown security {}",
                    holding.id, holding.security_id
                );
                continue;
            };
            let Some(asset_class) = asset_classes.get(&security.asset_class_id) else {
                warn!(
                    "Skipping holding {}: security {} has unknown asset class {}",
                    holding.id, security.ticker, security.asset_class_id
                );
                continue;
            };

            let price = quotes.get(&security.ticker).map(|q| q.price);
            if price.is_none() {
                warn!(
                    "No quote for {}; holding {} valued at 0.00",
                    security.ticker, holding.id
                );
            }

            priced.push(PricedHolding {
                holding_id: holding.id,
                account_id: holding.account_id,
                symbol: security.ticker.clone(),
                security_name: security.name.clone(),
                asset_class_id: asset_class.id.clone(),
                asset_class_name: asset_class.name.clone(),
                category_code: asset_class.category_code.clone(),
                shares: holding.shares,
                price,
            });
        }

        Ok(priced)
    }

    async fn create_holding(&self, new_holding: NewHolding) -> Result<Holding> {
        new_holding.validate()?;
        self.holding_repository.create(new_holding).await
    }

    async fn update_holding_shares(&self, holding_id: &str, shares: Decimal) -> Result<Holding> {
        if shares.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Shares cannot be negative, got {}",
                shares
            ))));
        }
        self.holding_repository.update_shares(holding_id, shares).await
    }

    async fn delete_holding(&self, holding_id: &str) -> Result<()> {
        self.holding_repository.delete(holding_id).await?;
        Ok(())
    }
}
