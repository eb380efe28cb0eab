//! Pricing logic for delivery quotes.
//!
//! This module contains the distance bands, the global adjustment, coupon
//! discounts, tax, and the [`compute_quote`] function that chains them. All of
//! it is pure arithmetic over [`rust_decimal::Decimal`].

mod adjustment;
mod coupon;
mod quote;
mod rounding;
mod tax;
mod tier;

pub use adjustment::apply_global_adjustment;
pub use coupon::{CouponDiscount, NO_DISCOUNT_LABEL, apply_coupon};
pub use quote::{QuoteBreakdown, compute_quote};
pub use rounding::round_currency;
pub use tax::{TAX_RATE, calculate_tax};
pub use tier::{DistanceTier, FLAT_BAND_MAX_KM, MID_BAND_MAX_KM, tier_net_amount};
