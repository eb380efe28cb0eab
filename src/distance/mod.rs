//! Route distance between two free-text addresses.
//!
//! The pricing code only needs a kilometer figure; [`DistanceProvider`] is the
//! seam that supplies it. [`GoogleDistanceMatrix`] is the production
//! implementation.

mod google;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

pub use google::GoogleDistanceMatrix;

/// Resolves the driving distance between two addresses.
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Returns the distance in kilometers.
    async fn distance_km(&self, origin: &str, destination: &str) -> EngineResult<Decimal>;
}

/// Longest route accepted for pricing, in kilometers.
pub const MAX_ROUTE_KM: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Checks that a distance can be priced.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDistance`] for negative distances and
/// distances above [`MAX_ROUTE_KM`].
pub fn validate_distance(distance_km: Decimal) -> EngineResult<Decimal> {
    if distance_km < Decimal::ZERO {
        return Err(EngineError::InvalidDistance {
            message: format!("distance must not be negative, got {} km", distance_km),
        });
    }
    if distance_km > MAX_ROUTE_KM {
        return Err(EngineError::InvalidDistance {
            message: format!("distance {} km exceeds {} km", distance_km, MAX_ROUTE_KM),
        });
    }
    Ok(distance_km)
}
