//! Business-hours advisory.
//!
//! Tells the customer when a quote request will be answered, based on the
//! local day of week and time of day. Requests are answered Monday to Friday
//! from 09:00; the last request answered the same day is the one received at
//! 15:40, with an 80 minute turnaround.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Opening time, in minutes after midnight (09:00).
pub const OPENING_MINUTE: u32 = 9 * 60;

/// Last minute answered the same day, inclusive (15:40).
pub const LAST_SAME_DAY_MINUTE: u32 = 15 * 60 + 40;

/// Turnaround for requests received during business hours, in minutes.
pub const RESPONSE_LEAD_MINUTES: u32 = 80;

/// When a request received at a given moment will be answered.
///
/// The [`Display`](fmt::Display) implementation renders the customer-facing
/// message.
///
/// # Example
///
/// ```
/// use delivery_quote::advisory::{BusinessHoursAdvisory, compute_advisory};
/// use chrono::{NaiveDate, NaiveTime};
///
/// // 2026-01-12 is a Monday
/// let now = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// let advisory = compute_advisory(now);
/// assert_eq!(
///     advisory,
///     BusinessHoursAdvisory::WithinHours { eta: NaiveTime::from_hms_opt(11, 20, 0).unwrap() }
/// );
/// assert_eq!(advisory.to_string(), "Estimated response time: 11:20.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BusinessHoursAdvisory {
    /// Any time on Sunday.
    ClosedSunday,
    /// Monday to Thursday before opening; answered the same morning.
    BeforeOpening {
        /// Today.
        weekday: Weekday,
    },
    /// Monday to Friday between 09:00 and 15:40 inclusive.
    WithinHours {
        /// Expected response time.
        eta: NaiveTime,
    },
    /// Monday to Thursday after 15:40; answered the next day.
    AfterHours {
        /// Tomorrow.
        next_day: Weekday,
    },
    /// Friday outside business hours, or Saturday; answered Monday.
    Weekend,
}

impl fmt::Display for BusinessHoursAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusinessHoursAdvisory::ClosedSunday => write!(
                f,
                "We are closed on Sundays. Your request will be answered on Monday morning."
            ),
            BusinessHoursAdvisory::BeforeOpening { weekday } => write!(
                f,
                "We open at 09:00. Your request will be answered this {} morning.",
                weekday_name(*weekday)
            ),
            BusinessHoursAdvisory::WithinHours { eta } => {
                write!(f, "Estimated response time: {}.", eta.format("%H:%M"))
            }
            BusinessHoursAdvisory::AfterHours { next_day } => write!(
                f,
                "We are closed for today. Your request will be answered tomorrow, {}, from 09:00.",
                weekday_name(*next_day)
            ),
            BusinessHoursAdvisory::Weekend => write!(
                f,
                "We are outside business hours. Your request will be answered on Monday morning."
            ),
        }
    }
}

/// Computes the advisory for a local date and time.
///
/// Cases are checked in order: Sunday, Monday-Thursday before opening,
/// Monday-Friday within hours, Monday-Thursday after hours, then everything
/// else. Friday never reaches the before/after cases, so a Friday evening
/// request is deferred to Monday rather than Saturday. Seconds are ignored.
pub fn compute_advisory(now: NaiveDateTime) -> BusinessHoursAdvisory {
    let weekday = now.weekday();
    let minute = now.hour() * 60 + now.minute();
    let monday_to_thursday = matches!(
        weekday,
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu
    );

    if weekday == Weekday::Sun {
        BusinessHoursAdvisory::ClosedSunday
    } else if monday_to_thursday && minute < OPENING_MINUTE {
        BusinessHoursAdvisory::BeforeOpening { weekday }
    } else if (monday_to_thursday || weekday == Weekday::Fri)
        && (OPENING_MINUTE..=LAST_SAME_DAY_MINUTE).contains(&minute)
    {
        BusinessHoursAdvisory::WithinHours {
            eta: minute_to_time(minute + RESPONSE_LEAD_MINUTES),
        }
    } else if monday_to_thursday && minute > LAST_SAME_DAY_MINUTE {
        BusinessHoursAdvisory::AfterHours {
            next_day: weekday.succ(),
        }
    } else {
        BusinessHoursAdvisory::Weekend
    }
}

fn minute_to_time(minute: u32) -> NaiveTime {
    let minute = minute % (24 * 60);
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or(NaiveTime::MIN)
}

/// Full English name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
