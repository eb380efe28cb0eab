//! Application state for the delivery quote API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::advisory::Clock;
use crate::config::TariffStore;
use crate::distance::DistanceProvider;
use crate::notify::QuoteNotifier;

/// Shared application state.
///
/// Holds the tariff store and the collaborators each request needs. Cloning
/// is cheap; everything sits behind an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    tariff: Arc<TariffStore>,
    distance: Arc<dyn DistanceProvider>,
    notifier: Arc<dyn QuoteNotifier>,
    clock: Arc<dyn Clock>,
    admin_token: Option<Arc<str>>,
}

impl AppState {
    /// Creates application state with admin routes left open.
    pub fn new(
        tariff: TariffStore,
        distance: impl DistanceProvider + 'static,
        notifier: impl QuoteNotifier + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            tariff: Arc::new(tariff),
            distance: Arc::new(distance),
            notifier: Arc::new(notifier),
            clock: Arc::new(clock),
            admin_token: None,
        }
    }

    /// Requires `token` as a bearer token on admin routes.
    pub fn with_admin_token(mut self, token: Option<String>) -> Self {
        self.admin_token = token.map(Arc::from);
        self
    }

    /// Returns the tariff store.
    pub fn tariff(&self) -> &TariffStore {
        &self.tariff
    }

    /// Returns the distance provider.
    pub fn distance(&self) -> &dyn DistanceProvider {
        self.distance.as_ref()
    }

    /// Returns the quote notifier.
    pub fn notifier(&self) -> &dyn QuoteNotifier {
        self.notifier.as_ref()
    }

    /// Returns the clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Returns the admin token, if one is required.
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }
}
