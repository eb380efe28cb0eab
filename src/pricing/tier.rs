//! Distance bands and their pricing rules.
//!
//! Three bands, each priced additively from the floor of the band:
//! a flat fare up to 6 km, the mid rate per kilometer from 6 to 10 km, and
//! the far rate per kilometer beyond 10 km.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TariffConfig;

/// Upper bound (inclusive) of the flat-fare band, in kilometers.
pub const FLAT_BAND_MAX_KM: Decimal = Decimal::from_parts(6, 0, 0, false, 0);

/// Upper bound (inclusive) of the mid band, in kilometers.
pub const MID_BAND_MAX_KM: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// The distance band a route falls into.
///
/// # Example
///
/// ```
/// use delivery_quote::pricing::DistanceTier;
/// use rust_decimal::Decimal;
///
/// assert_eq!(DistanceTier::for_distance(Decimal::new(6, 0)), DistanceTier::Flat);
/// assert_eq!(DistanceTier::for_distance(Decimal::new(61, 1)), DistanceTier::Mid);
/// assert_eq!(DistanceTier::for_distance(Decimal::new(101, 1)), DistanceTier::Far);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceTier {
    /// Up to 6 km: base fare only.
    Flat,
    /// Over 6 and up to 10 km.
    Mid,
    /// Over 10 km.
    Far,
}

impl DistanceTier {
    /// Selects the band for a distance. Negative distances land in `Flat`.
    pub fn for_distance(distance_km: Decimal) -> Self {
        if distance_km <= FLAT_BAND_MAX_KM {
            DistanceTier::Flat
        } else if distance_km <= MID_BAND_MAX_KM {
            DistanceTier::Mid
        } else {
            DistanceTier::Far
        }
    }
}

impl std::fmt::Display for DistanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceTier::Flat => write!(f, "flat"),
            DistanceTier::Mid => write!(f, "mid"),
            DistanceTier::Far => write!(f, "far"),
        }
    }
}

/// Computes the unrounded net amount for a distance.
///
/// # Example
///
/// ```
/// use delivery_quote::config::TariffConfig;
/// use delivery_quote::pricing::tier_net_amount;
/// use rust_decimal::Decimal;
///
/// let tariff = TariffConfig::default();
/// // 6000 + 4 * 1000 + 5 * 850
/// assert_eq!(tier_net_amount(Decimal::new(15, 0), &tariff), Decimal::new(14250, 0));
/// ```
pub fn tier_net_amount(distance_km: Decimal, tariff: &TariffConfig) -> Decimal {
    match DistanceTier::for_distance(distance_km) {
        DistanceTier::Flat => tariff.base_fare,
        DistanceTier::Mid => tariff.base_fare + (distance_km - FLAT_BAND_MAX_KM) * tariff.mid_tier_rate,
        DistanceTier::Far => {
            tariff.base_fare
                + (MID_BAND_MAX_KM - FLAT_BAND_MAX_KM) * tariff.mid_tier_rate
                + (distance_km - MID_BAND_MAX_KM) * tariff.far_tier_rate
        }
    }
}
