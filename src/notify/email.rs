//! Transactional email over HTTP.

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::advisory::BusinessHoursAdvisory;
use crate::config::EmailSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{Customer, Quote};

use super::{QuoteNotifier, render_quote_email};

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
}

/// Sends quotes through an HTTP email API.
///
/// Posts `{from, to, subject, text}` as JSON with a bearer key, the request
/// shape shared by the common transactional email services.
#[derive(Clone, Debug)]
pub struct HttpEmailNotifier {
    client: reqwest::Client,
    settings: EmailSettings,
}

impl HttpEmailNotifier {
    /// Creates a notifier for the given endpoint and sender.
    pub fn new(settings: EmailSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl QuoteNotifier for HttpEmailNotifier {
    async fn send_quote(
        &self,
        customer: &Customer,
        quote: &Quote,
        advisory: &BusinessHoursAdvisory,
    ) -> EngineResult<()> {
        let email = render_quote_email(customer, quote, advisory);
        let body = SendEmailRequest {
            from: &self.settings.from,
            to: vec![customer.email.trim()],
            subject: &email.subject,
            text: &email.text,
        };

        let res = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::Notification {
                message: e.without_url().to_string(),
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(EngineError::Notification {
                message: format!("email API returned HTTP {}", status.as_u16()),
            });
        }

        info!(quote_id = %quote.quote_id, "Quote emailed");
        Ok(())
    }
}
