//! Fixed-point helpers shared by the whole rollup path.
//!
//! Money is quantized to 2 decimal places, stored percentages to 2, displayed
//! percentages to 1. Rounding is half away from zero and happens only through
//! these helpers, so the choice is fixed in exactly one place. Floating point
//! appears only in [`approximate_f64`], at the display boundary.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DISPLAY_PERCENT_SCALE, MONEY_SCALE, ONE_HUNDRED, PERCENT_SCALE};

/// Quantizes a money value to the money scale.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Quantizes a percentage to the stored percent scale.
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Unrounded `value / total`; exactly zero when the denominator is zero or
/// negative. Ratio math never raises on a zero base.
pub fn ratio_of(value: Decimal, total: Decimal) -> Decimal {
    if total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    value / total
}

/// `value / total × 100` at the stored percent scale. Zero-safe.
pub fn percentage_of(value: Decimal, total: Decimal) -> Decimal {
    round_percent(ratio_of(value, total) * ONE_HUNDRED)
}

/// Formats a money value with thousands separators, e.g. `$1,425,040.09`
/// or `-$19,473.47`.
pub fn format_money(value: Decimal) -> String {
    let mut quantized = round_money(value);
    let negative = quantized.is_sign_negative() && !quantized.is_zero();
    quantized = quantized.abs();
    quantized.rescale(MONEY_SCALE);
    let text = quantized.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (text.as_str(), "00"),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-${}.{}", int_grouped, frac_part)
    } else {
        format!("${}.{}", int_grouped, frac_part)
    }
}

/// Formats a percentage at the display scale, e.g. `62.5%`.
pub fn format_percent(value: Decimal) -> String {
    let mut display = value
        .round_dp_with_strategy(DISPLAY_PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    display.rescale(DISPLAY_PERCENT_SCALE);
    format!("{}%", display)
}

/// Signed variant used for variance columns, e.g. `+2.5%`.
pub fn format_signed_percent(value: Decimal) -> String {
    if value > Decimal::ZERO {
        format!("+{}", format_percent(value))
    } else {
        format_percent(value)
    }
}

/// Lossy conversion for UI layers that cannot consume fixed-point values.
/// Never used inside rollup arithmetic.
pub fn approximate_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
