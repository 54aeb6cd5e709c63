use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::{GatewayError, Result};

/// Decimal places the gateway uses for every currency
pub const SCALE: u32 = 2;

/// Convert an amount to the gateway's integer minor units (cents)
///
/// Rounds half away from zero to two decimals first. Negative amounts and
/// amounts that do not fit an `i64` are rejected.
pub fn to_minor_units(amount: Decimal) -> Result<i64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(GatewayError::serialization(format!(
            "Amount cannot be negative: {}",
            amount
        )));
    }

    let out_of_range = || GatewayError::serialization(format!("Amount out of range: {}", amount));

    amount
        .round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(out_of_range)
}

/// Convert minor units (cents) back to a decimal amount
pub fn from_minor_units(cents: i64) -> Decimal {
    Decimal::new(cents, SCALE)
}

/// Render an amount with exactly two decimals, as the mdxi document expects
pub fn format_price(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
    )
}
