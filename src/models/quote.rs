//! Quote model.
//!
//! A [`Quote`] is the priced answer to one request: the two addresses, the
//! distance between them, and the amounts from the pricing breakdown.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::QuoteBreakdown;

/// A priced delivery quote.
///
/// Amounts serialize as JSON numbers. All amounts are whole currency units.
///
/// # Example
///
/// ```
/// use delivery_quote::config::TariffConfig;
/// use delivery_quote::models::Quote;
/// use delivery_quote::pricing::compute_quote;
/// use rust_decimal::Decimal;
///
/// let breakdown = compute_quote(Decimal::new(5, 0), None, &TariffConfig::default());
/// let quote = Quote::new("Origin 1", "Destination 2", Decimal::new(5, 0), breakdown);
/// assert_eq!(quote.total_amount, Decimal::new(7140, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Identifier of this quote.
    pub quote_id: Uuid,
    /// When the quote was computed.
    pub created_at: DateTime<Utc>,
    /// Pickup address as entered.
    pub origin: String,
    /// Drop-off address as entered.
    pub destination: String,
    /// Route distance in kilometers.
    #[serde(with = "rust_decimal::serde::float")]
    pub distance_km: Decimal,
    /// Net amount after the global adjustment, before discount.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_amount: Decimal,
    /// Coupon discount.
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    /// Net amount minus discount.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_after_discount: Decimal,
    /// Tax on the discounted net.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    /// Amount payable.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    /// Display text for the discount line.
    pub discount_label: String,
    /// The coupon that was applied, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

impl Quote {
    /// Creates a quote from a pricing breakdown.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance_km: Decimal,
        breakdown: QuoteBreakdown,
    ) -> Self {
        Self {
            quote_id: Uuid::new_v4(),
            created_at: Utc::now(),
            origin: origin.into(),
            destination: destination.into(),
            distance_km,
            net_amount: breakdown.net_amount,
            discount_amount: breakdown.discount_amount,
            net_after_discount: breakdown.net_after_discount,
            tax_amount: breakdown.tax_amount,
            total_amount: breakdown.total_amount,
            discount_label: breakdown.discount_label,
            coupon_code: breakdown.coupon_code,
        }
    }
}
