//! Market data boundary - the engine treats prices as a black box.

mod market_data_model;
mod market_data_traits;

pub use market_data_model::Quote;
pub use market_data_traits::PriceSourceTrait;
