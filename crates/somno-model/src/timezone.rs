//! Target timezone handling.
//!
//! The pipeline stores every instant in UTC; a [`TimezoneSpec`] only
//! controls how instants are rendered. It is threaded explicitly through
//! every entry point — there is no process-wide default zone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use chrono_tz::Tz;

use crate::error::SleepError;

/// A named IANA zone or a fixed UTC offset.
///
/// Converting a table between zones is a label change only; instants are
/// unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimezoneSpec {
    Named(Tz),
    Fixed(FixedOffset),
}

impl TimezoneSpec {
    /// The UTC zone.
    pub const UTC: TimezoneSpec = TimezoneSpec::Named(Tz::UTC);

    /// Parse an IANA name (`Europe/Berlin`) or a fixed offset (`+01:00`).
    ///
    /// # Errors
    ///
    /// Returns [`SleepError::UnknownTimezone`] when the name matches
    /// neither form.
    pub fn parse(name: &str) -> Result<Self, SleepError> {
        if let Ok(tz) = name.parse::<Tz>() {
            return Ok(TimezoneSpec::Named(tz));
        }
        if let Ok(offset) = name.parse::<FixedOffset>() {
            return Ok(TimezoneSpec::Fixed(offset));
        }
        Err(SleepError::UnknownTimezone {
            name: name.to_string(),
        })
    }

    /// Render a UTC instant in this zone, RFC 3339 with the minimal
    /// number of sub-second digits.
    pub fn format_rfc3339(&self, time: DateTime<Utc>) -> String {
        match self {
            TimezoneSpec::Named(tz) => time
                .with_timezone(tz)
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            TimezoneSpec::Fixed(offset) => time
                .with_timezone(offset)
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

impl fmt::Display for TimezoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimezoneSpec::Named(tz) => write!(f, "{}", tz.name()),
            TimezoneSpec::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for TimezoneSpec {
    type Err = SleepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
