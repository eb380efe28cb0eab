//! Tariff configuration types.
//!
//! This module contains the normalized tariff that the pricing code reads,
//! the [`Percent`] type that removes the whole-number/fraction ambiguity at
//! the config boundary, and the partial update accepted from operators.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// Default flat fare for the first band, in currency units.
pub const DEFAULT_BASE_FARE: Decimal = Decimal::from_parts(6000, 0, 0, false, 0);

/// Default per-kilometer rate between 6 and 10 km.
pub const DEFAULT_MID_TIER_RATE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Default per-kilometer rate beyond 10 km.
pub const DEFAULT_FAR_TIER_RATE: Decimal = Decimal::from_parts(850, 0, 0, false, 0);

/// Largest fare or per-kilometer rate an operator may set (10^12).
///
/// Keeps every quote for a validated route distance well inside
/// [`Decimal::MAX`].
pub const MAX_TARIFF_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Checks that a fare or rate lies in `[0, MAX_TARIFF_AMOUNT]`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRate`] otherwise.
pub fn check_tariff_amount(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value < Decimal::ZERO || value > MAX_TARIFF_AMOUNT {
        return Err(EngineError::InvalidRate {
            field: field.to_string(),
            value,
            max: MAX_TARIFF_AMOUNT,
        });
    }
    Ok(value)
}

/// A percentage held as a fraction in `[0, 1]`.
///
/// Operators may write either `15` or `0.15`; [`Percent::from_operator_value`]
/// is the only place that tells the two apart. Values strictly greater than 1
/// are whole percents, everything else is already a fraction.
///
/// # Example
///
/// ```
/// use delivery_quote::config::Percent;
/// use rust_decimal::Decimal;
///
/// let whole = Percent::from_operator_value("WELCOME", Decimal::new(15, 0)).unwrap();
/// let fraction = Percent::from_operator_value("WELCOME", Decimal::new(15, 2)).unwrap();
/// assert_eq!(whole, fraction);
/// assert_eq!(whole.to_string(), "15%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percent(Decimal);

impl Percent {
    /// No adjustment.
    pub const ZERO: Percent = Percent(Decimal::ZERO);

    /// Normalizes an operator-entered value into a fraction.
    ///
    /// `field` names the setting or coupon code for the error message.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPercent`] for negative values and values
    /// above 100.
    pub fn from_operator_value(field: &str, value: Decimal) -> EngineResult<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidPercent {
                field: field.to_string(),
                value,
            });
        }

        let fraction = if value > Decimal::ONE {
            value / Decimal::ONE_HUNDRED
        } else {
            value
        };

        Ok(Self(fraction.normalize()))
    }

    /// Returns the value as a fraction (0.15 for 15%).
    pub fn fraction(self) -> Decimal {
        self.0
    }

    /// Returns the value as a whole percent (15 for 15%).
    pub fn whole_percent(self) -> Decimal {
        (self.0 * Decimal::ONE_HUNDRED).normalize()
    }

    /// Returns true when the percentage is zero.
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.whole_percent())
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

/// The tunable tariff parameters.
///
/// Serializes to the same document that [`TariffStore`](super::TariffStore)
/// persists, with percentages written as fractions so a reload reads them
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TariffConfig {
    /// Flat fare for distances up to 6 km.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_fare: Decimal,
    /// Per-kilometer rate for the 6-10 km band.
    #[serde(with = "rust_decimal::serde::float")]
    pub mid_tier_rate: Decimal,
    /// Per-kilometer rate beyond 10 km.
    #[serde(with = "rust_decimal::serde::float")]
    pub far_tier_rate: Decimal,
    /// Adjustment applied to every net amount before discounts.
    pub global_adjustment: Percent,
    /// Coupon discounts keyed by uppercase code.
    pub coupons: BTreeMap<String, Percent>,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            base_fare: DEFAULT_BASE_FARE,
            mid_tier_rate: DEFAULT_MID_TIER_RATE,
            far_tier_rate: DEFAULT_FAR_TIER_RATE,
            global_adjustment: Percent::ZERO,
            coupons: BTreeMap::new(),
        }
    }
}

impl TariffConfig {
    /// Looks up a coupon, ignoring case and surrounding whitespace.
    pub fn coupon(&self, code: &str) -> Option<Percent> {
        self.coupons.get(&normalize_coupon_code(code)).copied()
    }

    /// Returns a copy of this tariff with `update` applied.
    ///
    /// Fields absent from the update keep their current value. A `coupons`
    /// entry replaces the whole table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRate`] if a fare or rate is out of range
    /// and [`EngineError::InvalidPercent`] if the adjustment or any coupon is.
    /// The tariff is left untouched in either case.
    pub fn with_update(&self, update: &TariffUpdate) -> EngineResult<Self> {
        let mut next = self.clone();

        if let Some(base_fare) = update.base_fare {
            next.base_fare = check_tariff_amount("base_fare", base_fare)?;
        }
        if let Some(mid_tier_rate) = update.mid_tier_rate {
            next.mid_tier_rate = check_tariff_amount("mid_tier_rate", mid_tier_rate)?;
        }
        if let Some(far_tier_rate) = update.far_tier_rate {
            next.far_tier_rate = check_tariff_amount("far_tier_rate", far_tier_rate)?;
        }
        if let Some(adjustment) = update.global_adjustment {
            next.global_adjustment = Percent::from_operator_value("global_adjustment", adjustment)?;
        }
        if let Some(coupons) = &update.coupons {
            next.coupons = coupons
                .iter()
                .filter(|(code, _)| !code.trim().is_empty())
                .map(|(code, value)| {
                    let code = normalize_coupon_code(code);
                    Percent::from_operator_value(&code, *value).map(|percent| (code, percent))
                })
                .collect::<EngineResult<_>>()?;
        }

        Ok(next)
    }
}

/// A partial tariff update submitted by an operator.
///
/// Percentages may be given as whole percents or fractions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffUpdate {
    /// New flat fare.
    #[serde(default)]
    pub base_fare: Option<Decimal>,
    /// New 6-10 km rate.
    #[serde(default)]
    pub mid_tier_rate: Option<Decimal>,
    /// New beyond-10 km rate.
    #[serde(default)]
    pub far_tier_rate: Option<Decimal>,
    /// New global adjustment.
    #[serde(default)]
    pub global_adjustment: Option<Decimal>,
    /// Replacement coupon table.
    #[serde(default)]
    pub coupons: Option<BTreeMap<String, Decimal>>,
}

/// Uppercases and trims a coupon code.
pub fn normalize_coupon_code(code: &str) -> String {
    code.trim().to_uppercase()
}
