//! Customer contact details.

use serde::{Deserialize, Serialize};

/// Who a quote is sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Name used in the greeting.
    #[serde(default)]
    pub name: Option<String>,
    /// Address the quote is emailed to.
    pub email: String,
}

impl Customer {
    /// Returns the name to greet, falling back to a generic salutation.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("customer")
    }

    /// Returns true when the email has the shape `local@domain`.
    ///
    /// This only screens out obvious typos; the email provider does the real
    /// validation.
    pub fn has_plausible_email(&self) -> bool {
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.contains(char::is_whitespace)
            }
            None => false,
        }
    }
}
