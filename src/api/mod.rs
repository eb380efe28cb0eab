//! HTTP API module for the delivery quote service.
//!
//! This module provides the quoting endpoint, the tariff administration
//! endpoints, and a health check.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{create_app, create_router};
pub use request::QuoteRequest;
pub use response::{ApiError, NotificationStatus, QuoteResponse, TariffView};
pub use state::AppState;
