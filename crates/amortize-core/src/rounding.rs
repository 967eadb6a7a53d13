//! Currency and percentage rounding.
//!
//! Every monetary value in a schedule is rounded at the step where it is
//! produced, not only at output. Ties go to the even neighbour (banker's
//! rounding) for both money and percentages.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Currency precision (cents).
pub const MONEY_DP: u32 = 2;

/// Precision of the "loan paid" percentage.
pub const PCT_DP: u32 = 1;

const STRATEGY: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Round a monetary amount to cents.
pub fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(MONEY_DP, STRATEGY)
}

/// Round a percentage to one decimal place.
pub fn round_pct(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PCT_DP, STRATEGY)
}
