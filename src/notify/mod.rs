//! Quote notifications.
//!
//! After a quote is priced the customer may ask for a copy by email. Sending
//! is downstream of pricing: a failure here is reported in the response but
//! never changes the quote.

mod email;
mod render;

use async_trait::async_trait;
use tracing::info;

use crate::advisory::BusinessHoursAdvisory;
use crate::error::EngineResult;
use crate::models::{Customer, Quote};

pub use email::HttpEmailNotifier;
pub use render::{QuoteEmail, format_amount, render_quote_email};

/// Delivers a priced quote to a customer.
#[async_trait]
pub trait QuoteNotifier: Send + Sync {
    /// Sends `quote` with its advisory to `customer`.
    async fn send_quote(
        &self,
        customer: &Customer,
        quote: &Quote,
        advisory: &BusinessHoursAdvisory,
    ) -> EngineResult<()>;
}

#[async_trait]
impl<T: QuoteNotifier + ?Sized> QuoteNotifier for Box<T> {
    async fn send_quote(
        &self,
        customer: &Customer,
        quote: &Quote,
        advisory: &BusinessHoursAdvisory,
    ) -> EngineResult<()> {
        (**self).send_quote(customer, quote, advisory).await
    }
}

/// Writes notices to the log instead of sending them.
///
/// Used when no email API is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl QuoteNotifier for LogNotifier {
    async fn send_quote(
        &self,
        customer: &Customer,
        quote: &Quote,
        advisory: &BusinessHoursAdvisory,
    ) -> EngineResult<()> {
        let email = render_quote_email(customer, quote, advisory);
        info!(
            quote_id = %quote.quote_id,
            to = %customer.email,
            subject = %email.subject,
            "Email delivery not configured, quote notice logged only"
        );
        Ok(())
    }
}
