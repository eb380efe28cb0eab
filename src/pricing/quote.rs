//! Quote computation.
//!
//! Combines the distance band, the global adjustment, the coupon and tax into
//! a single [`QuoteBreakdown`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TariffConfig;

use super::{apply_coupon, apply_global_adjustment, calculate_tax, round_currency, tier_net_amount};
use super::DistanceTier;

/// The amounts of a priced quote.
///
/// Invariants:
/// - `net_after_discount = net_amount - discount_amount`
/// - `tax_amount = round(net_after_discount × 0.19)`
/// - `total_amount = net_after_discount + tax_amount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// The band the distance fell into.
    pub tier: DistanceTier,
    /// Net amount after the global adjustment.
    pub net_amount: Decimal,
    /// Coupon discount.
    pub discount_amount: Decimal,
    /// Net amount minus discount.
    pub net_after_discount: Decimal,
    /// Tax on the discounted net.
    pub tax_amount: Decimal,
    /// Amount payable.
    pub total_amount: Decimal,
    /// Display text for the discount line.
    pub discount_label: String,
    /// The coupon applied, if any.
    pub coupon_code: Option<String>,
}

/// Prices a route of `distance_km` under `tariff`.
///
/// Steps:
/// 1. Band net amount, rounded to whole units.
/// 2. Global adjustment, when non-zero.
/// 3. Coupon discount on the adjusted net.
/// 4. 19% tax on the discounted net.
///
/// Never fails. Callers are expected to pass a finite, non-negative
/// distance; a negative one is priced as the flat band.
///
/// # Examples
///
/// ```
/// use delivery_quote::config::TariffConfig;
/// use delivery_quote::pricing::compute_quote;
/// use rust_decimal::Decimal;
///
/// let breakdown = compute_quote(Decimal::new(15, 0), None, &TariffConfig::default());
/// assert_eq!(breakdown.net_amount, Decimal::new(14250, 0));
/// assert_eq!(breakdown.tax_amount, Decimal::new(2708, 0));
/// assert_eq!(breakdown.total_amount, Decimal::new(16958, 0));
/// ```
pub fn compute_quote(
    distance_km: Decimal,
    coupon_code: Option<&str>,
    tariff: &TariffConfig,
) -> QuoteBreakdown {
    let tier = DistanceTier::for_distance(distance_km);
    let band_net = round_currency(tier_net_amount(distance_km, tariff));
    let net_amount = apply_global_adjustment(band_net, tariff.global_adjustment);

    let discount = apply_coupon(net_amount, coupon_code, tariff);
    let net_after_discount = net_amount - discount.amount;
    let tax_amount = calculate_tax(net_after_discount);

    QuoteBreakdown {
        tier,
        net_amount,
        discount_amount: discount.amount,
        net_after_discount,
        tax_amount,
        total_amount: net_after_discount + tax_amount,
        discount_label: discount.label,
        coupon_code: discount.code,
    }
}
