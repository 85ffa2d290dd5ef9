use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Name of the asset class treated as the cash remainder
pub const CASH_ASSET_CLASS: &str = "Cash";

/// Stable row id of the synthetic grand-total row
pub const PORTFOLIO_TOTAL_ID: &str = "TOTAL";

/// Decimal places for money values at rest
pub const MONEY_SCALE: u32 = 2;

/// Decimal places for stored percentages
pub const PERCENT_SCALE: u32 = 2;

/// Decimal places for displayed percentages
pub const DISPLAY_PERCENT_SCALE: u32 = 1;

/// Tolerance when checking that strategy percentages sum to 100
pub const ALLOCATION_SUM_TOLERANCE: Decimal = dec!(0.001);

pub const ONE_HUNDRED: Decimal = dec!(100);
