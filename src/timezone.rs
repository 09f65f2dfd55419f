//! Resolving the configured timezone to today's date.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current time in `canonical_timezone`.
///
/// # Errors
///
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a
/// known IANA timezone name.
pub fn local_now(canonical_timezone: &str) -> Result<OffsetDateTime, Error> {
    let offset = get_local_offset(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))?;

    Ok(OffsetDateTime::now_utc().to_offset(offset))
}

/// Today's date in `canonical_timezone`.
///
/// # Errors
///
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a
/// known IANA timezone name.
pub fn local_today(canonical_timezone: &str) -> Result<Date, Error> {
    local_now(canonical_timezone).map(|now| now.date())
}
