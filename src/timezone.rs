//! Resolves the reference time zone used for stamping and comparing dates.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The canonical name of the default reference time zone (UTC-3).
///
/// Every purchase timestamp is stamped in this zone and every period filter
/// compares calendar dates in it, so "today" means the same thing on every
/// code path.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Look up the current UTC offset of a canonical timezone name, e.g.
/// "America/Sao_Paulo".
pub fn get_reference_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current date-time in the reference time zone.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if `canonical_timezone` is not a valid
/// canonical timezone name.
pub fn now_in_timezone(canonical_timezone: &str) -> Result<OffsetDateTime, Error> {
    get_reference_offset(canonical_timezone)
        .map(|offset| OffsetDateTime::now_utc().to_offset(offset))
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{DEFAULT_TIMEZONE, get_reference_offset, now_in_timezone};

    #[test]
    fn default_timezone_resolves() {
        let offset = get_reference_offset(DEFAULT_TIMEZONE);

        assert!(offset.is_some());
    }

    #[test]
    fn now_carries_the_reference_offset() {
        let now = now_in_timezone(DEFAULT_TIMEZONE).unwrap();

        assert_eq!(Some(now.offset()), get_reference_offset(DEFAULT_TIMEZONE));
    }

    #[test]
    fn bogus_timezone_is_rejected() {
        let result = now_in_timezone("Atlantis/Lost_City");

        assert_eq!(
            result,
            Err(Error::InvalidTimezone("Atlantis/Lost_City".to_owned()))
        );
    }
}
