//! Business rules applied to a validated submission before it is stored.
//!
//! 1. Start date is rewritten to UTC.
//! 2. With an end date: end date is rewritten to UTC and the duration is the
//!    number of whole days between the two, rounded down.
//! 3. Without an end date, an `Ongoing` trial ends one calendar month after it
//!    starts (day clamped to the month's last day, so Jan 31 -> Feb 29 in a
//!    leap year) and the duration is derived from that.
//!    A default that would land past year 9999 is not set.
//! 4. Otherwise end date and duration stay unset.
//!
//! An end date before the start date yields a negative duration. It is kept
//! as computed.

use chrono::{DateTime, FixedOffset, Months, Utc};
use trial_core::dates;
use trial_core::entities::TrialRecord;
use trial_core::enums::TrialStatus;

const SECONDS_PER_DAY: i64 = 86_400;

/// Apply the business rules. Pure; never fails.
#[must_use]
pub fn normalize(mut trial: TrialRecord) -> TrialRecord {
    let start = to_utc(trial.start_date);
    trial.start_date = start;

    match trial.end_date {
        Some(end) => {
            let end = to_utc(end);
            trial.end_date = Some(end);
            trial.duration_in_days = Some(whole_days(start, end));
        }
        None if trial.status == TrialStatus::Ongoing => {
            let end = default_end_date(start);
            trial.end_date = end;
            trial.duration_in_days = end.map(|end| whole_days(start, end));
            trial.status = TrialStatus::Ongoing;
        }
        None => trial.duration_in_days = None,
    }

    trial
}

/// Same instant, expressed with a `+00:00` offset.
#[must_use]
pub fn to_utc(dt: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    dt.with_timezone(&Utc).fixed_offset()
}

/// One calendar month after `start`. `None` when that cannot be stored.
#[must_use]
pub fn default_end_date(start: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    start
        .checked_add_months(Months::new(1))
        .filter(|end| dates::in_storable_range(*end))
}

/// Whole days from `start` to `end`, rounded toward negative infinity.
#[must_use]
pub fn whole_days(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> i64 {
    (end - start).num_seconds().div_euclid(SECONDS_PER_DAY)
}
