//! HTTP request handlers for the delivery quote API.
//!
//! This module contains the handler functions for all API endpoints and the
//! router that wires them together.

use std::path::Path;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, header},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::advisory::compute_advisory;
use crate::config::TariffUpdate;
use crate::distance::validate_distance;
use crate::error::EngineError;
use crate::models::Quote;
use crate::pricing::compute_quote;

use super::request::QuoteRequest;
use super::response::{ApiError, ApiErrorResponse, NotificationStatus, QuoteResponse, TariffView};
use super::state::AppState;

fn routes() -> Router<AppState> {
    Router::new()
        .route("/quote", post(quote_handler))
        .route("/admin/tariff", get(get_tariff_handler).put(update_tariff_handler))
        .route("/health", get(health_handler))
}

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    routes()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Creates the API router with static files from `static_dir` served for
/// every other path.
pub fn create_app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    routes()
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Handler for POST /quote.
///
/// Looks up the route distance, prices it against the current tariff, and
/// emails the customer when one is given. A failed email is reported in the
/// body; the quote is returned either way.
async fn quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>, ApiErrorResponse> {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    let Json(request) = payload.map_err(|rejection| rejection_error(rejection, correlation_id))?;

    if let Err(message) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %message, "Invalid quote request");
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(message)));
    }

    let start_time = Instant::now();
    let distance_km = state
        .distance()
        .distance_km(&request.origin, &request.destination)
        .await
        .and_then(validate_distance)
        .map_err(|err| {
            warn!(correlation_id = %correlation_id, error = %err, "Distance lookup failed");
            ApiErrorResponse::from(err)
        })?;

    let tariff = state.tariff().snapshot().await;
    let breakdown = compute_quote(distance_km, request.coupon_code.as_deref(), &tariff);
    let quote = Quote::new(request.origin, request.destination, distance_km, breakdown);
    let advisory = compute_advisory(state.clock().now());

    let notification = match &request.customer {
        None => NotificationStatus::NotRequested,
        Some(customer) => match state.notifier().send_quote(customer, &quote, &advisory).await {
            Ok(()) => NotificationStatus::Sent,
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    quote_id = %quote.quote_id,
                    error = %err,
                    "Quote notification failed"
                );
                NotificationStatus::Failed
            }
        },
    };

    info!(
        correlation_id = %correlation_id,
        quote_id = %quote.quote_id,
        distance_km = %quote.distance_km,
        total_amount = %quote.total_amount,
        coupon = quote.coupon_code.as_deref().unwrap_or("-"),
        duration_us = start_time.elapsed().as_micros(),
        "Quote computed"
    );

    Ok(Json(QuoteResponse {
        quote,
        advisory: advisory.to_string(),
        advisory_detail: advisory,
        notification,
    }))
}

/// Handler for GET /admin/tariff.
async fn get_tariff_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TariffView>, ApiErrorResponse> {
    authorize(&state, &headers)?;
    let tariff = state.tariff().snapshot().await;
    Ok(Json(TariffView::from(&tariff)))
}

/// Handler for PUT /admin/tariff.
///
/// Applies a partial update, persists it, and returns the new tariff.
async fn update_tariff_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TariffUpdate>, JsonRejection>,
) -> Result<Json<TariffView>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    authorize(&state, &headers).inspect_err(|_| {
        warn!(correlation_id = %correlation_id, "Rejected tariff update without valid token");
    })?;

    let Json(update) = payload.map_err(|rejection| rejection_error(rejection, correlation_id))?;

    let tariff = state.tariff().update(&update).await.map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Tariff update failed");
        ApiErrorResponse::from(err)
    })?;

    info!(correlation_id = %correlation_id, "Tariff updated");
    Ok(Json(TariffView::from(&tariff)))
}

/// Handler for GET /health.
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Checks the bearer token when the service has one configured.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiErrorResponse> {
    let Some(expected) = state.admin_token() else {
        return Ok(());
    };

    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    match presented {
        Some(token) if tokens_match(token.as_bytes(), expected.as_bytes()) => Ok(()),
        _ => Err(EngineError::Unauthorized.into()),
    }
}

/// Compares two tokens without stopping at the first differing byte.
///
/// Only the length can leak through timing.
fn tokens_match(presented: &[u8], expected: &[u8]) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// Maps a JSON extractor rejection to a 400 response.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse::bad_request(error)
}
