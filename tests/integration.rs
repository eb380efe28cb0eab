//! Integration tests for the delivery quote service.
//!
//! This test suite drives the HTTP router end to end:
//! - Distance bands and tax
//! - Coupons and the global adjustment
//! - Business-hours advisories
//! - Customer notification outcomes
//! - Tariff administration and persistence
//! - Static files next to the API routes
//! - Error cases

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tempfile::TempDir;
use tower::ServiceExt;

use delivery_quote::advisory::{BusinessHoursAdvisory, FixedClock};
use delivery_quote::api::{AppState, create_app, create_router};
use delivery_quote::config::{TariffConfig, TariffStore};
use delivery_quote::distance::{DistanceProvider, GoogleDistanceMatrix};
use delivery_quote::error::{EngineError, EngineResult};
use delivery_quote::models::{Customer, Quote};
use delivery_quote::notify::{LogNotifier, QuoteNotifier};

// =============================================================================
// Test Helpers
// =============================================================================

/// Returns the same distance for every pair of addresses.
struct FixedDistance(Decimal);

#[async_trait]
impl DistanceProvider for FixedDistance {
    async fn distance_km(&self, _origin: &str, _destination: &str) -> EngineResult<Decimal> {
        Ok(self.0)
    }
}

/// Fails every lookup with the given error.
struct FailingDistance(fn() -> EngineError);

#[async_trait]
impl DistanceProvider for FailingDistance {
    async fn distance_km(&self, _origin: &str, _destination: &str) -> EngineResult<Decimal> {
        Err((self.0)())
    }
}

/// Records every recipient it is asked to notify.
#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl QuoteNotifier for RecordingNotifier {
    async fn send_quote(
        &self,
        customer: &Customer,
        _quote: &Quote,
        _advisory: &BusinessHoursAdvisory,
    ) -> EngineResult<()> {
        self.sent.lock().unwrap().push(customer.email.clone());
        Ok(())
    }
}

struct FailingNotifier;

#[async_trait]
impl QuoteNotifier for FailingNotifier {
    async fn send_quote(
        &self,
        _customer: &Customer,
        _quote: &Quote,
        _advisory: &BusinessHoursAdvisory,
    ) -> EngineResult<()> {
        Err(EngineError::Notification {
            message: "email API returned HTTP 503".to_string(),
        })
    }
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn local(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").unwrap()
}

/// Tuesday 2026-01-13 at 10:00.
fn business_hours() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2026, 1, 13)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
    )
}

fn tariff_with_welcome() -> TariffConfig {
    let mut tariff = TariffConfig::default();
    tariff.coupons.insert(
        "WELCOME".to_string(),
        delivery_quote::config::Percent::from_operator_value("WELCOME", decimal("10")).unwrap(),
    );
    tariff
}

fn router_for(distance_km: &str) -> Router {
    let state = AppState::new(
        TariffStore::new("unused-tariff.yaml", tariff_with_welcome()),
        FixedDistance(decimal(distance_km)),
        LogNotifier,
        business_hours(),
    );
    create_router(state)
}

fn router_at(distance_km: &str, now: NaiveDateTime) -> Router {
    let state = AppState::new(
        TariffStore::new("unused-tariff.yaml", TariffConfig::default()),
        FixedDistance(decimal(distance_km)),
        LogNotifier,
        FixedClock(now),
    );
    create_router(state)
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_quote(router: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/quote")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

fn quote_request() -> Value {
    json!({
        "origin": "Av. Apoquindo 3000, Las Condes",
        "destination": "Av. Providencia 1200, Providencia"
    })
}

fn admin_request(method: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri("/admin/tariff");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

// =============================================================================
// Distance Bands
// =============================================================================

#[tokio::test]
async fn test_flat_band_5km() {
    let (status, body) = post_quote(router_for("5"), quote_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["net_amount"], 6000.0);
    assert_eq!(body["quote"]["tax_amount"], 1140.0);
    assert_eq!(body["quote"]["total_amount"], 7140.0);
    assert_eq!(body["quote"]["discount_label"], "No discount");
}

#[tokio::test]
async fn test_mid_band_8km() {
    let (status, body) = post_quote(router_for("8"), quote_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["net_amount"], 8000.0);
    assert_eq!(body["quote"]["tax_amount"], 1520.0);
    assert_eq!(body["quote"]["total_amount"], 9520.0);
}

#[tokio::test]
async fn test_far_band_15km_rounds_tax_half_up() {
    let (status, body) = post_quote(router_for("15"), quote_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["net_amount"], 14250.0);
    // 2707.5 rounds away from zero
    assert_eq!(body["quote"]["tax_amount"], 2708.0);
    assert_eq!(body["quote"]["total_amount"], 16958.0);
}

#[tokio::test]
async fn test_band_boundaries() {
    let (_, at_six) = post_quote(router_for("6"), quote_request()).await;
    assert_eq!(at_six["quote"]["net_amount"], 6000.0);

    let (_, at_ten) = post_quote(router_for("10"), quote_request()).await;
    assert_eq!(at_ten["quote"]["net_amount"], 10000.0);
}

#[tokio::test]
async fn test_quote_echoes_addresses_and_distance() {
    let (_, body) = post_quote(router_for("8.312"), quote_request()).await;

    assert_eq!(body["quote"]["origin"], "Av. Apoquindo 3000, Las Condes");
    assert_eq!(body["quote"]["destination"], "Av. Providencia 1200, Providencia");
    assert_eq!(body["quote"]["distance_km"], 8.312);
    assert!(body["quote"]["quote_id"].is_string());
}

// =============================================================================
// Coupons and Adjustment
// =============================================================================

#[tokio::test]
async fn test_coupon_is_case_insensitive() {
    let mut request = quote_request();
    request["coupon_code"] = json!(" welcome ");
    let (status, body) = post_quote(router_for("8"), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["discount_amount"], 800.0);
    assert_eq!(body["quote"]["net_after_discount"], 7200.0);
    assert_eq!(body["quote"]["tax_amount"], 1368.0);
    assert_eq!(body["quote"]["total_amount"], 8568.0);
    assert_eq!(body["quote"]["coupon_code"], "WELCOME");
    assert_eq!(body["quote"]["discount_label"], "Coupon WELCOME (-10%)");
}

#[tokio::test]
async fn test_unknown_coupon_is_ignored() {
    let mut request = quote_request();
    request["coupon_code"] = json!("NOPE");
    let (status, body) = post_quote(router_for("8"), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["discount_amount"], 0.0);
    assert_eq!(body["quote"]["total_amount"], 9520.0);
    assert!(body["quote"].get("coupon_code").is_none());
}

// =============================================================================
// Business Hours Advisory
// =============================================================================

#[tokio::test]
async fn test_advisory_within_hours() {
    // 2026-01-12 is a Monday
    let router = router_at("5", local("2026-01-12", "10:00"));
    let (_, body) = post_quote(router, quote_request()).await;

    assert_eq!(body["advisory"], "Estimated response time: 11:20.");
    assert_eq!(body["advisory_detail"]["kind"], "within_hours");
}

#[tokio::test]
async fn test_advisory_friday_evening_defers_to_monday() {
    let router = router_at("5", local("2026-01-16", "16:00"));
    let (_, body) = post_quote(router, quote_request()).await;

    let advisory = body["advisory"].as_str().unwrap();
    assert!(advisory.contains("Monday morning"), "got: {}", advisory);
    assert!(!advisory.contains("tomorrow"));
}

#[tokio::test]
async fn test_advisory_weekend() {
    for date in ["2026-01-17", "2026-01-18"] {
        let router = router_at("5", local(date, "12:00"));
        let (_, body) = post_quote(router, quote_request()).await;
        assert!(body["advisory"].as_str().unwrap().contains("Monday morning"));
    }
}

#[tokio::test]
async fn test_advisory_after_hours_names_next_day() {
    // Wednesday 16:00
    let router = router_at("5", local("2026-01-14", "16:00"));
    let (_, body) = post_quote(router, quote_request()).await;

    assert_eq!(
        body["advisory"],
        "We are closed for today. Your request will be answered tomorrow, Thursday, from 09:00."
    );
}

// =============================================================================
// Notifications
// =============================================================================

#[tokio::test]
async fn test_customer_is_notified() {
    let notifier = RecordingNotifier::default();
    let state = AppState::new(
        TariffStore::new("unused-tariff.yaml", TariffConfig::default()),
        FixedDistance(decimal("5")),
        notifier.clone(),
        business_hours(),
    );

    let mut request = quote_request();
    request["customer"] = json!({ "name": "Ana", "email": "ana@example.cl" });
    let (status, body) = post_quote(create_router(state), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notification"], "sent");
    assert_eq!(*notifier.sent.lock().unwrap(), vec!["ana@example.cl".to_string()]);
}

#[tokio::test]
async fn test_notification_failure_still_returns_quote() {
    let state = AppState::new(
        TariffStore::new("unused-tariff.yaml", TariffConfig::default()),
        FixedDistance(decimal("5")),
        FailingNotifier,
        business_hours(),
    );

    let mut request = quote_request();
    request["customer"] = json!({ "email": "ana@example.cl" });
    let (status, body) = post_quote(create_router(state), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notification"], "failed");
    assert_eq!(body["quote"]["total_amount"], 7140.0);
}

#[tokio::test]
async fn test_no_customer_means_no_notification() {
    let (_, body) = post_quote(router_for("5"), quote_request()).await;
    assert_eq!(body["notification"], "not_requested");
}

// =============================================================================
// Tariff Administration
// =============================================================================

#[tokio::test]
async fn test_tariff_update_persists_and_prices() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tariff.yaml");
    let state = AppState::new(
        TariffStore::load(&path),
        FixedDistance(decimal("8")),
        LogNotifier,
        business_hours(),
    );
    let router = create_router(state);

    let update = json!({
        "base_fare": 7000,
        "global_adjustment": 10,
        "coupons": { "vip": 0.2 }
    });
    let (status, body) = send(router.clone(), admin_request("PUT", None, Some(update))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base_fare"], 7000.0);
    assert_eq!(body["global_adjustment"], 10.0);
    assert_eq!(body["coupons"]["VIP"], 20.0);

    // 7000 + 2 * 1000 = 9000, +10% = 9900, -20% = 7920, tax 1504.8
    let mut request = quote_request();
    request["coupon_code"] = json!("vip");
    let (_, quote) = post_quote(router, request).await;
    assert_eq!(quote["quote"]["net_amount"], 9900.0);
    assert_eq!(quote["quote"]["discount_amount"], 1980.0);
    assert_eq!(quote["quote"]["tax_amount"], 1505.0);
    assert_eq!(quote["quote"]["total_amount"], 9425.0);

    let reloaded = TariffStore::load(&path).snapshot().await;
    assert_eq!(reloaded.base_fare, decimal("7000"));
    assert_eq!(reloaded.global_adjustment.fraction(), decimal("0.1"));
    assert_eq!(reloaded.coupon("VIP").unwrap().fraction(), decimal("0.2"));
}

#[tokio::test]
async fn test_invalid_percent_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tariff.yaml");
    let state = AppState::new(
        TariffStore::load(&path),
        FixedDistance(decimal("8")),
        LogNotifier,
        business_hours(),
    );

    let update = json!({ "coupons": { "BAD": 150 } });
    let (status, body) = send(create_router(state), admin_request("PUT", None, Some(update))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PERCENT");
    assert!(!path.exists());
}

#[tokio::test]
async fn test_admin_token_is_enforced() {
    let state = AppState::new(
        TariffStore::new("unused-tariff.yaml", TariffConfig::default()),
        FixedDistance(decimal("8")),
        LogNotifier,
        business_hours(),
    )
    .with_admin_token(Some("s3cret".to_string()));
    let router = create_router(state);

    let update = json!({ "base_fare": 1 });
    let (status, body) = send(router.clone(), admin_request("PUT", None, Some(update.clone()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = send(router.clone(), admin_request("PUT", Some("wrong"), Some(update))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(router, admin_request("GET", Some("s3cret"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base_fare"], 6000.0);
}

#[tokio::test]
async fn test_out_of_range_rate_is_rejected_and_quotes_still_price() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tariff.yaml");
    let state = AppState::new(
        TariffStore::load(&path),
        FixedDistance(decimal("8")),
        LogNotifier,
        business_hours(),
    );
    let router = create_router(state);

    let update = json!({ "mid_tier_rate": 5000000000000u64 });
    let (status, body) = send(router.clone(), admin_request("PUT", None, Some(update))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_RATE");
    assert!(!path.exists());

    let update = json!({ "base_fare": -1 });
    let (status, _) = send(router.clone(), admin_request("PUT", None, Some(update))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, quote) = post_quote(router, quote_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["quote"]["total_amount"], 9520.0);
}

#[tokio::test]
async fn test_malformed_tariff_file_serves_default_prices() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tariff.yaml");
    std::fs::write(&path, "base_fare: [6000\n").unwrap();

    let state = AppState::new(
        TariffStore::load(&path),
        FixedDistance(decimal("15")),
        LogNotifier,
        business_hours(),
    );
    let (status, body) = post_quote(create_router(state), quote_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["total_amount"], 16958.0);
}

// =============================================================================
// Static Files
// =============================================================================

fn app_with_static_dir(dir: &TempDir) -> Router {
    let state = AppState::new(
        TariffStore::new("unused-tariff.yaml", TariffConfig::default()),
        FixedDistance(decimal("5")),
        LogNotifier,
        business_hours(),
    );
    create_app(state, dir.path())
}

#[tokio::test]
async fn test_static_file_is_served() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Delivery quote</h1>").unwrap();

    let response = app_with_static_dir(&dir)
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"<h1>Delivery quote</h1>");
}

#[tokio::test]
async fn test_unknown_static_path_is_404() {
    let dir = TempDir::new().unwrap();

    let response = app_with_static_dir(&dir)
        .oneshot(Request::builder().uri("/missing.png").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_routes_take_precedence_over_static_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("health"), "static").unwrap();
    let app = app_with_static_dir(&dir);

    let health = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app.clone(), health).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = post_quote(app, quote_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["total_amount"], 7140.0);
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_missing_api_key_returns_500() {
    let state = AppState::new(
        TariffStore::new("unused-tariff.yaml", TariffConfig::default()),
        GoogleDistanceMatrix::new(None, "maps.googleapis.com"),
        LogNotifier,
        business_hours(),
    );

    let (status, body) = post_quote(create_router(state), quote_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "API_KEY_MISSING");
}

#[tokio::test]
async fn test_unroutable_addresses_return_400() {
    let state = AppState::new(
        TariffStore::new("unused-tariff.yaml", TariffConfig::default()),
        FailingDistance(|| EngineError::DistanceUnavailable {
            message: "ZERO_RESULTS".to_string(),
        }),
        LogNotifier,
        business_hours(),
    );

    let (status, body) = post_quote(create_router(state), quote_request()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DISTANCE_UNAVAILABLE");
}

#[tokio::test]
async fn test_provider_outage_returns_502() {
    let state = AppState::new(
        TariffStore::new("unused-tariff.yaml", TariffConfig::default()),
        FailingDistance(|| EngineError::DistanceProvider {
            message: "OVER_QUERY_LIMIT".to_string(),
        }),
        LogNotifier,
        business_hours(),
    );

    let (status, body) = post_quote(create_router(state), quote_request()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "DISTANCE_PROVIDER_ERROR");
}

#[tokio::test]
async fn test_invalid_customer_email_returns_400() {
    let mut request = quote_request();
    request["customer"] = json!({ "email": "nobody" });
    let (status, body) = post_quote(router_for("5"), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/quote")
        .body(Body::from(quote_request().to_string()))
        .unwrap();
    let (status, body) = send(router_for("5"), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_CONTENT_TYPE");
}
