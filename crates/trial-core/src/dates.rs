//! Date parsing for trial submissions.
//!
//! Submissions carry dates in one of three forms:
//! - `2024-01-25` (a calendar date, read as midnight UTC)
//! - `2024-01-25T09:30:00+02:00` (RFC 3339, offset kept until normalization)
//! - `2024-01-25T09:30:00` (no offset, read as UTC)
//!
//! The schema's `trial-date` format and record deserialization both go through
//! [`parse_trial_date`], so a document that passes the schema always parses.
//!
//! Only years 0000 through 9999, both as written and once shifted to UTC, are
//! accepted. Stored timestamps are RFC 3339, which has no room for more.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::errors::CoreError;

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Years representable in a four-digit RFC 3339 timestamp.
pub const YEAR_RANGE: RangeInclusive<i32> = 0..=9999;

/// Parse a submission date into an offset-aware timestamp.
///
/// # Errors
///
/// Returns `CoreError::InvalidDate` if the string matches none of the
/// accepted forms or falls outside [`YEAR_RANGE`].
pub fn parse_trial_date(s: &str) -> Result<DateTime<FixedOffset>, CoreError> {
    let s = s.trim();
    parse_any_form(s)
        .filter(|dt| in_storable_range(*dt))
        .ok_or_else(|| CoreError::InvalidDate(s.to_string()))
}

/// Whether `dt` keeps a four-digit year both as written and in UTC.
#[must_use]
pub fn in_storable_range(dt: DateTime<FixedOffset>) -> bool {
    YEAR_RANGE.contains(&dt.year()) && YEAR_RANGE.contains(&dt.naive_utc().year())
}

fn parse_any_form(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Whether `s` is an accepted submission date.
#[must_use]
pub fn is_trial_date(s: &str) -> bool {
    parse_trial_date(s).is_ok()
}

/// Serde adapter for a required submission date.
///
/// # Errors
///
/// Fails with a custom deserializer error when the string is not a date.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_trial_date(&raw).map_err(serde::de::Error::custom)
}

/// Serde adapter for an optional submission date. `null` maps to `None`.
///
/// # Errors
///
/// Fails with a custom deserializer error when a present string is not a date.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_trial_date(&raw).map_err(serde::de::Error::custom))
        .transpose()
}
