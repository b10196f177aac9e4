//! Timestamp utilities

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Extract the calendar date from a service timestamp
///
/// Accepts `YYYY-MM-DDTHH:MM:SS` followed by `Z`, a `±HH:MM` offset, or
/// nothing. The date is taken as written; no timezone conversion happens and
/// the time of day is discarded.
pub fn calendar_date(timestamp: &str) -> Result<NaiveDate> {
    let trimmed = timestamp.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("missing timestamp".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local().date());
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .map_err(|e| Error::InvalidInput(format!("unparseable timestamp {:?}: {}", timestamp, e)))
}
