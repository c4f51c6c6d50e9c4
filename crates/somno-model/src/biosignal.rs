//! Type-safe enumeration of the recorded biosignal channels.
//!
//! The vendor export identifies channels twice: by a filename suffix
//! (`raw_sleep-monitor_<suffix>.csv`) and by a canonical column name in
//! merged tables. Both mappings live here so the supported set stays a
//! closed, compile-time-checkable enum rather than open string dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SleepError;

/// One of the four channels recorded by the sleep monitor.
///
/// Values are kept in native units: heart rate in bpm, respiration rate
/// in breaths/min, sleep state coded as {0 = awake, 1 = light, 2 = deep,
/// 3 = rem}, snoring coded as {0 = none, 100 = snoring}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Biosignal {
    HeartRate,
    RespirationRate,
    SleepState,
    Snoring,
}

impl Biosignal {
    /// All channels in canonical column order.
    pub const ALL: [Biosignal; 4] = [
        Biosignal::HeartRate,
        Biosignal::RespirationRate,
        Biosignal::SleepState,
        Biosignal::Snoring,
    ];

    /// Canonical column name used in merged tables and saved files.
    pub fn column_name(self) -> &'static str {
        match self {
            Biosignal::HeartRate => "heart_rate",
            Biosignal::RespirationRate => "respiration_rate",
            Biosignal::SleepState => "sleep_state",
            Biosignal::Snoring => "snoring",
        }
    }

    /// Filename suffix used by the vendor export for this channel.
    pub fn file_suffix(self) -> &'static str {
        match self {
            Biosignal::HeartRate => "hr",
            Biosignal::RespirationRate => "respiratory-rate",
            Biosignal::SleepState => "sleep-state",
            Biosignal::Snoring => "snoring",
        }
    }

    /// Measurement unit, for display purposes only.
    pub fn unit(self) -> &'static str {
        match self {
            Biosignal::HeartRate => "bpm",
            Biosignal::RespirationRate => "breaths/min",
            Biosignal::SleepState | Biosignal::Snoring => "code",
        }
    }

    /// Resolve a canonical column name.
    ///
    /// # Errors
    ///
    /// Returns [`SleepError::UnsupportedStream`] for any name outside
    /// the canonical set.
    pub fn from_name(name: &str) -> Result<Self, SleepError> {
        Self::ALL
            .into_iter()
            .find(|signal| signal.column_name() == name)
            .ok_or_else(|| SleepError::UnsupportedStream {
                name: name.to_string(),
            })
    }

    /// Resolve a vendor filename suffix. `None` means the file carries a
    /// channel this toolkit does not ingest and should be skipped.
    pub fn from_file_suffix(suffix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|signal| signal.file_suffix() == suffix)
    }
}

impl fmt::Display for Biosignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl FromStr for Biosignal {
    type Err = SleepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
