//! Error types for the delivery quote service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the service can report. The pricing and advisory code
//! never fails; errors come from configuration and the external collaborators.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the delivery quote service.
///
/// # Example
///
/// ```
/// use delivery_quote::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tariff.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tariff.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration file could not be written back.
    #[error("Failed to write configuration file '{path}': {message}")]
    ConfigWriteError {
        /// The path that could not be written.
        path: String,
        /// A description of the write error.
        message: String,
    },

    /// An environment setting held a value that could not be used.
    #[error("Invalid setting {name}: {message}")]
    InvalidSetting {
        /// The environment variable name.
        name: String,
        /// A description of the problem.
        message: String,
    },

    /// A percentage was outside the accepted range.
    #[error("Invalid percentage for '{field}': {value} (expected 0-1 or 0-100)")]
    InvalidPercent {
        /// The field or coupon code the value belongs to.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// A fare or per-kilometer rate was negative or too large to price with.
    #[error("Invalid amount for '{field}': {value} (expected 0 to {max})")]
    InvalidRate {
        /// The tariff field the value belongs to.
        field: String,
        /// The rejected value.
        value: Decimal,
        /// The largest accepted value.
        max: Decimal,
    },

    /// The distance returned for a route cannot be priced.
    #[error("Invalid distance: {message}")]
    InvalidDistance {
        /// A description of what made the distance invalid.
        message: String,
    },

    /// No API key is configured for the distance provider.
    #[error("Distance provider API key not configured")]
    MissingApiKey,

    /// The distance provider could not compute a route between the addresses.
    #[error("Could not compute distance: {message}")]
    DistanceUnavailable {
        /// The provider status or reason.
        message: String,
    },

    /// The distance provider failed or returned an unreadable response.
    #[error("Distance provider error: {message}")]
    DistanceProvider {
        /// A description of the failure.
        message: String,
    },

    /// A quote notification could not be delivered.
    #[error("Notification failed: {message}")]
    Notification {
        /// A description of the failure.
        message: String,
    },

    /// The caller did not present valid administrative credentials.
    #[error("Unauthorized")]
    Unauthorized,
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
