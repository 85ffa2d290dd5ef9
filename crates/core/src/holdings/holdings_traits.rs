//! Holding repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::holdings_model::{Holding, NewHolding, PricedHolding};
use crate::errors::Result;

/// Trait defining the contract for Holding repository operations.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    async fn create(&self, new_holding: NewHolding) -> Result<Holding>;

    async fn update_shares(&self, holding_id: &str, shares: Decimal) -> Result<Holding>;

    /// Returns the number of deleted records.
    async fn delete(&self, holding_id: &str) -> Result<usize>;

    fn get_by_id(&self, holding_id: &str) -> Result<Holding>;

    fn list_for_accounts(&self, account_ids: &[String]) -> Result<Vec<Holding>>;
}

/// Trait defining the contract for Holdings service operations.
#[async_trait]
pub trait HoldingsServiceTrait: Send + Sync {
    /// Loads a user's holdings (optionally scoped to one account), joins
    /// securities and asset classes, and attaches the latest prices.
    ///
    /// Holdings whose security has no quote are returned with `price: None`
    /// and value at zero; holdings referencing unknown securities are
    /// skipped with a warning. The read path never fails on missing data.
    async fn get_priced_holdings(
        &self,
        user_id: &str,
        account_id: Option<&str>,
    ) -> Result<Vec<PricedHolding>>;

    async fn create_holding(&self, new_holding: NewHolding) -> Result<Holding>;

    async fn update_holding_shares(&self, holding_id: &str, shares: Decimal) -> Result<Holding>;

    async fn delete_holding(&self, holding_id: &str) -> Result<()>;
}
