//! Sales tax.

use rust_decimal::Decimal;

use super::round_currency;

/// Flat tax rate applied to the discounted net amount (19%).
pub const TAX_RATE: Decimal = Decimal::from_parts(19, 0, 0, false, 2);

/// Returns the rounded tax on `net_after_discount`.
pub fn calculate_tax(net_after_discount: Decimal) -> Decimal {
    round_currency(net_after_discount * TAX_RATE)
}
