use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone};
use serde_json::json;

use crate::error::{AppError, AppResult};

pub fn parse_datetime(value: &str) -> AppResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).map_err(|err| {
        AppError::validation_with_details(
            "invalid datetime format",
            json!({"value": value, "error": err.to_string()}),
        )
    })
}

pub fn parse_optional_datetime(
    value: Option<&String>,
) -> AppResult<Option<DateTime<FixedOffset>>> {
    match value {
        Some(raw) => Ok(Some(parse_datetime(raw)?)),
        Option::None => Ok(Option::None),
    }
}

/// Lenient variant for caller-supplied event lists; never logs.
pub fn try_parse_datetime(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).ok()
}

pub fn format_datetime(dt: DateTime<FixedOffset>) -> String {
    dt.to_rfc3339()
}

pub fn add_minutes(dt: DateTime<FixedOffset>, minutes: i64) -> AppResult<DateTime<FixedOffset>> {
    checked_add_minutes(dt, minutes).ok_or_else(|| AppError::validation("datetime out of range"))
}

pub fn checked_add_minutes(
    dt: DateTime<FixedOffset>,
    minutes: i64,
) -> Option<DateTime<FixedOffset>> {
    dt.checked_add_signed(Duration::try_minutes(minutes)?)
}

/// Half-open intersection: touching endpoints do not overlap.
pub fn overlaps_half_open(
    a_start: DateTime<FixedOffset>,
    a_end: DateTime<FixedOffset>,
    b_start: DateTime<FixedOffset>,
    b_end: DateTime<FixedOffset>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Moves `dt` to `time` on the same local date, keeping its offset.
pub fn with_time_of_day(dt: DateTime<FixedOffset>, time: NaiveTime) -> DateTime<FixedOffset> {
    let naive = dt.date_naive().and_time(time);
    dt.offset()
        .from_local_datetime(&naive)
        .single()
        .unwrap_or(dt)
}

pub fn start_of_day(dt: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    with_time_of_day(dt, NaiveTime::MIN)
}

pub fn same_day(a: DateTime<FixedOffset>, b: DateTime<FixedOffset>) -> bool {
    a.date_naive() == b.date_naive()
}
