//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole currency units, halves away from zero.
///
/// # Example
///
/// ```
/// use delivery_quote::pricing::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(27075, 1)), Decimal::new(2708, 0));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
