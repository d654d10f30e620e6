//! Time utility functions

use chrono::{DateTime, NaiveDate, Utc};

/// Convert milliseconds since Unix epoch to DateTime<Utc>, clamping
/// unrepresentable values to the epoch
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}

/// UTC calendar date of a millisecond timestamp
pub fn millis_to_date(millis: i64) -> NaiveDate {
    millis_to_datetime(millis).date_naive()
}

/// Current time as milliseconds since Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
