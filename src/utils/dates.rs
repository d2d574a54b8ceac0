use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::error::{Result, TrackerError};
use crate::utils::constants::HISTORY_DATE_FORMAT;

/// Resolve an iceberg's "last observed" day-of-year against the page's
/// revision timestamp, returning a `MM/DD/YY` date string.
///
/// The listing reports each observation as an ordinal day with no year. An
/// observation can never postdate the revision, so a day-of-year strictly
/// greater than the revision's own ordinal day must belong to the previous
/// year; a value equal to it stays in the revision year.
///
/// Out-of-range values (0, negative, > 366) are deliberately not rejected:
/// the same calendar arithmetic applies, so day 0 lands on Dec 31 of the year
/// before the candidate year. The only error is arithmetic leaving chrono's
/// representable date range.
pub fn resolve_observation_date(day_of_year: i32, revised: &NaiveDateTime) -> Result<String> {
    let mut year = revised.year();
    if day_of_year > revised.ordinal() as i32 {
        year -= 1;
    }

    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or(TrackerError::DateOutOfRange { day: day_of_year, year })?;
    let resolved = jan_first
        .checked_add_signed(Duration::days(i64::from(day_of_year) - 1))
        .ok_or(TrackerError::DateOutOfRange { day: day_of_year, year })?;

    Ok(resolved.format(HISTORY_DATE_FORMAT).to_string())
}
