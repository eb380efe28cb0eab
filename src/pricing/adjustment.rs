//! Global price adjustment.

use rust_decimal::Decimal;

use crate::config::Percent;

use super::round_currency;

/// Raises a net amount by the operator's global adjustment.
///
/// A zero adjustment returns the amount unchanged; otherwise the result is
/// `round(net × (1 + adjustment))`.
///
/// # Example
///
/// ```
/// use delivery_quote::config::Percent;
/// use delivery_quote::pricing::apply_global_adjustment;
/// use rust_decimal::Decimal;
///
/// let fifteen = Percent::from_operator_value("global_adjustment", Decimal::new(15, 0)).unwrap();
/// assert_eq!(apply_global_adjustment(Decimal::new(6000, 0), fifteen), Decimal::new(6900, 0));
/// ```
pub fn apply_global_adjustment(net_amount: Decimal, adjustment: Percent) -> Decimal {
    if adjustment.is_zero() {
        return net_amount;
    }
    round_currency(net_amount * (Decimal::ONE + adjustment.fraction()))
}
