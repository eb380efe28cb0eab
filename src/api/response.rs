//! Response types for the delivery quote API.
//!
//! This module defines the success bodies, the error body, and the mapping
//! from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::advisory::BusinessHoursAdvisory;
use crate::config::TariffConfig;
use crate::error::EngineError;
use crate::models::Quote;

/// Outcome of the optional email notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    /// The request carried no customer email.
    NotRequested,
    /// The notice was handed to the email provider.
    Sent,
    /// Sending failed; the quote is still valid.
    Failed,
}

/// Body of a successful `POST /quote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// The priced quote.
    pub quote: Quote,
    /// When the request will be answered.
    pub advisory: String,
    /// The advisory in structured form.
    pub advisory_detail: BusinessHoursAdvisory,
    /// Outcome of the email notification.
    pub notification: NotificationStatus,
}

/// The tariff as shown to operators.
///
/// Percentages are whole percents, so the body can be edited and sent back
/// as a `PUT /admin/tariff` update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffView {
    /// Flat fare up to 6 km.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_fare: Decimal,
    /// Per-kilometer rate for 6-10 km.
    #[serde(with = "rust_decimal::serde::float")]
    pub mid_tier_rate: Decimal,
    /// Per-kilometer rate beyond 10 km.
    #[serde(with = "rust_decimal::serde::float")]
    pub far_tier_rate: Decimal,
    /// Global adjustment in whole percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub global_adjustment: Decimal,
    /// Coupon discounts in whole percent.
    #[serde(serialize_with = "serialize_percent_table")]
    pub coupons: BTreeMap<String, Decimal>,
}

struct FloatAmount(Decimal);

impl Serialize for FloatAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

fn serialize_percent_table<S: Serializer>(
    table: &BTreeMap<String, Decimal>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(table.len()))?;
    for (code, value) in table {
        map.serialize_entry(code, &FloatAmount(*value))?;
    }
    map.end()
}

impl From<&TariffConfig> for TariffView {
    fn from(tariff: &TariffConfig) -> Self {
        Self {
            base_fare: tariff.base_fare,
            mid_tier_rate: tariff.mid_tier_rate,
            far_tier_rate: tariff.far_tier_rate,
            global_adjustment: tariff.global_adjustment.whole_percent(),
            coupons: tariff
                .coupons
                .iter()
                .map(|(code, percent)| (code.clone(), percent.whole_percent()))
                .collect(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::ConfigWriteError { .. }
            | EngineError::InvalidSetting { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidPercent { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PERCENT", message),
            ),
            EngineError::InvalidRate { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_RATE", message),
            ),
            EngineError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("API_KEY_MISSING", message),
            ),
            EngineError::DistanceUnavailable { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "DISTANCE_UNAVAILABLE",
                    message,
                    "Check that both addresses exist and are reachable by road",
                ),
            ),
            EngineError::InvalidDistance { .. } | EngineError::DistanceProvider { .. } => (
                StatusCode::BAD_GATEWAY,
                ApiError::with_details(
                    "DISTANCE_PROVIDER_ERROR",
                    "Distance provider error",
                    message,
                ),
            ),
            EngineError::Notification { .. } => (
                StatusCode::BAD_GATEWAY,
                ApiError::new("NOTIFICATION_FAILED", message),
            ),
            EngineError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("UNAUTHORIZED", "A valid admin token is required"),
            ),
        };

        ApiErrorResponse { status, error }
    }
}
