//! Row-to-entity parsing helpers.
//!
//! Dates are stored as RFC 3339 text. `SQLite`'s own `datetime('now')` format
//! (`"2026-02-09 14:30:00"`) is accepted too, for rows written by hand.

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<FixedOffset>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed.
pub fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed.
pub fn parse_utc(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    parse_datetime(s).map(|dt| dt.with_timezone(&Utc))
}

/// Parse an optional TEXT column as `Option<DateTime<FixedOffset>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(
    s: Option<&str>,
) -> Result<Option<DateTime<FixedOffset>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}
