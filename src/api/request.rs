//! Request types for the delivery quote API.

use serde::{Deserialize, Serialize};

use crate::models::Customer;

/// Request body for the `/quote` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Pickup address.
    pub origin: String,
    /// Drop-off address.
    pub destination: String,
    /// Optional coupon code, matched case-insensitively.
    #[serde(default)]
    pub coupon_code: Option<String>,
    /// Who to email the quote to, if anyone.
    #[serde(default)]
    pub customer: Option<Customer>,
}

impl QuoteRequest {
    /// Checks the fields serde cannot, returning a message for the first
    /// problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.origin.trim().is_empty() {
            return Err("origin must not be empty".to_string());
        }
        if self.destination.trim().is_empty() {
            return Err("destination must not be empty".to_string());
        }
        if let Some(customer) = &self.customer {
            if !customer.has_plausible_email() {
                return Err(format!("customer.email '{}' is not a valid address", customer.email));
            }
        }
        Ok(())
    }
}
