//! Calendar helpers: business-day offsets and date input normalisation.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, Weekday};

use crate::domain::error::BandsightError;

pub const DEFAULT_LOOKBACK_BUSINESS_DAYS: u32 = 60;

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The date `n` business days (Mon-Fri) before `date`.
///
/// A weekend `date` counts the preceding Friday as the first step, so
/// `business_days_before(saturday, 1)` is that Friday. Holidays are not known
/// here and count as business days.
pub fn business_days_before(date: NaiveDate, n: u32) -> NaiveDate {
    let mut current = date;
    let mut remaining = n;
    while remaining > 0 {
        current = match current.checked_sub_days(Days::new(1)) {
            Some(d) => d,
            None => return current,
        };
        if !is_weekend(current) {
            remaining -= 1;
        }
    }
    current
}

/// Normalise a date input to a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and
/// RFC 3339 timestamps. Timestamps are truncated to the calendar date they
/// carry (in their own offset, not converted to UTC).
pub fn parse_date(input: &str) -> Result<NaiveDate, BandsightError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }

    Err(BandsightError::InvalidDate {
        input: input.to_string(),
    })
}
