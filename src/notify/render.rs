//! Plain-text rendering of quote notices.

use rust_decimal::Decimal;

use crate::advisory::BusinessHoursAdvisory;
use crate::models::{Customer, Quote};

/// A rendered notice ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteEmail {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
}

/// Renders the customer-facing notice for a quote.
///
/// # Example
///
/// ```
/// use delivery_quote::advisory::BusinessHoursAdvisory;
/// use delivery_quote::config::TariffConfig;
/// use delivery_quote::models::{Customer, Quote};
/// use delivery_quote::notify::render_quote_email;
/// use delivery_quote::pricing::compute_quote;
/// use rust_decimal::Decimal;
///
/// let quote = Quote::new(
///     "Av. Apoquindo 3000",
///     "Av. Providencia 1200",
///     Decimal::new(5, 0),
///     compute_quote(Decimal::new(5, 0), None, &TariffConfig::default()),
/// );
/// let customer = Customer { name: Some("Ana".to_string()), email: "ana@example.cl".to_string() };
///
/// let email = render_quote_email(&customer, &quote, &BusinessHoursAdvisory::Weekend);
/// assert!(email.subject.contains("$7.140"));
/// assert!(email.text.starts_with("Hello Ana,"));
/// ```
pub fn render_quote_email(
    customer: &Customer,
    quote: &Quote,
    advisory: &BusinessHoursAdvisory,
) -> QuoteEmail {
    let subject = format!("Your delivery quote: {}", format_amount(quote.total_amount));

    let mut lines = vec![
        format!("Hello {},", customer.display_name()),
        String::new(),
        "Here is your delivery quote.".to_string(),
        String::new(),
        format!("From:      {}", quote.origin),
        format!("To:        {}", quote.destination),
        format!("Distance:  {} km", quote.distance_km.round_dp(2).normalize()),
        String::new(),
        format!("Net:       {}", format_amount(quote.net_amount)),
    ];
    if !quote.discount_amount.is_zero() {
        lines.push(format!(
            "Discount:  -{} ({})",
            format_amount(quote.discount_amount),
            quote.discount_label
        ));
    }
    lines.push(format!("Tax (19%): {}", format_amount(quote.tax_amount)));
    lines.push(format!("Total:     {}", format_amount(quote.total_amount)));
    lines.push(String::new());
    lines.push(advisory.to_string());
    lines.push(String::new());
    lines.push(format!("Quote reference: {}", quote.quote_id));

    QuoteEmail {
        subject,
        text: lines.join("\n"),
    }
}

/// Formats whole currency units with `.` thousands separators, e.g. `$16.958`.
pub fn format_amount(amount: Decimal) -> String {
    let whole = amount.trunc().abs().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount.is_sign_negative() && !amount.trunc().is_zero() {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
