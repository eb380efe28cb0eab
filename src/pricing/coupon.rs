//! Coupon discounts.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{TariffConfig, normalize_coupon_code};

use super::round_currency;

/// Label used when no coupon applies.
pub const NO_DISCOUNT_LABEL: &str = "No discount";

/// The discount a coupon grants on a net amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponDiscount {
    /// Discount in whole currency units.
    pub amount: Decimal,
    /// Display text for the discount line.
    pub label: String,
    /// The normalized code, when the coupon was recognised.
    pub code: Option<String>,
}

impl CouponDiscount {
    fn none() -> Self {
        Self {
            amount: Decimal::ZERO,
            label: NO_DISCOUNT_LABEL.to_string(),
            code: None,
        }
    }
}

/// Looks up a coupon and computes its discount on `net_amount`.
///
/// Codes are matched case-insensitively. An absent, blank, or unknown code
/// gives a zero discount.
///
/// # Example
///
/// ```
/// use delivery_quote::config::{Percent, TariffConfig};
/// use delivery_quote::pricing::apply_coupon;
/// use rust_decimal::Decimal;
///
/// let mut tariff = TariffConfig::default();
/// tariff.coupons.insert(
///     "WELCOME".to_string(),
///     Percent::from_operator_value("WELCOME", Decimal::new(10, 0)).unwrap(),
/// );
///
/// let discount = apply_coupon(Decimal::new(8000, 0), Some("welcome"), &tariff);
/// assert_eq!(discount.amount, Decimal::new(800, 0));
/// assert_eq!(discount.label, "Coupon WELCOME (-10%)");
/// ```
pub fn apply_coupon(net_amount: Decimal, code: Option<&str>, tariff: &TariffConfig) -> CouponDiscount {
    let Some(code) = code.map(normalize_coupon_code).filter(|c| !c.is_empty()) else {
        return CouponDiscount::none();
    };

    match tariff.coupons.get(&code) {
        Some(percent) => CouponDiscount {
            amount: round_currency(net_amount * percent.fraction()),
            label: format!("Coupon {} (-{})", code, percent),
            code: Some(code),
        },
        None => {
            debug!(coupon = %code, "Unknown coupon code");
            CouponDiscount::none()
        }
    }
}
