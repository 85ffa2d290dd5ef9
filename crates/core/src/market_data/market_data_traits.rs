use std::collections::HashMap;

use async_trait::async_trait;

use super::market_data_model::Quote;
use crate::errors::Result;

/// Black-box source of current prices.
///
/// A symbol absent from the returned map simply has no price yet; callers
/// value such holdings at zero rather than failing.
#[async_trait]
pub trait PriceSourceTrait: Send + Sync {
    async fn latest_quotes(&self, symbols: &[String]) -> Result<HashMap<String, Quote>>;
}
