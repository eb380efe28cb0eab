//! Delivery quote service binary.

use std::error::Error;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use delivery_quote::advisory::SystemClock;
use delivery_quote::api::{AppState, create_app};
use delivery_quote::config::{ServiceSettings, TariffStore};
use delivery_quote::distance::GoogleDistanceMatrix;
use delivery_quote::notify::{HttpEmailNotifier, LogNotifier, QuoteNotifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = ServiceSettings::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting delivery quote service");

    let tariff = TariffStore::load(&settings.tariff_file);
    let distance = GoogleDistanceMatrix::new(
        settings.maps_api_key.clone(),
        settings.maps_api_base.clone(),
    );
    if settings.maps_api_key.is_none() {
        warn!("GOOGLE_MAPS_API_KEY not set, quote requests will fail");
    }

    let notifier: Box<dyn QuoteNotifier> = match settings.email.clone() {
        Some(email) => {
            info!(api_url = %email.api_url, "Quote emails enabled");
            Box::new(HttpEmailNotifier::new(email))
        }
        None => Box::new(LogNotifier),
    };

    let state = AppState::new(tariff, distance, notifier, SystemClock::new(settings.timezone))
        .with_admin_token(settings.admin_token.clone());
    let app = create_app(state, &settings.static_dir);

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for shutdown signal");
        }
        info!("Received shutdown signal");
    };

    let addr = settings.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        address = %addr,
        timezone = %settings.timezone,
        static_dir = %settings.static_dir.display(),
        "Delivery quote service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
