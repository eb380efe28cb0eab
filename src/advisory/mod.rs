//! Business-hours advisory for quote responses.
//!
//! [`compute_advisory`] maps a local date and time to a
//! [`BusinessHoursAdvisory`]; a [`Clock`] supplies that time in the service's
//! business time zone.

mod business_hours;
mod clock;

pub use business_hours::{
    BusinessHoursAdvisory, LAST_SAME_DAY_MINUTE, OPENING_MINUTE, RESPONSE_LEAD_MINUTES,
    compute_advisory, weekday_name,
};
pub use clock::{Clock, FixedClock, SystemClock};
