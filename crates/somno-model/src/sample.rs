//! Raw export rows and reconstructed samples.

use chrono::{DateTime, Utc};

use crate::biosignal::Biosignal;
use crate::timezone::TimezoneSpec;

/// One row of the vendor export: a contiguous recording burst with
/// run-length encoded samples.
///
/// `durations` holds per-segment lengths in seconds; `values` holds the
/// sample recorded over each segment. The two must be equally long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecording {
    pub start: DateTime<Utc>,
    pub durations: Vec<i64>,
    pub values: Vec<i64>,
}

/// One reconstructed sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub time: DateTime<Utc>,
    pub value: i64,
}

/// One fully loaded biosignal stream.
///
/// Samples are sorted ascending by time with duplicate timestamps
/// removed (first occurrence kept).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiosignalSeries {
    pub biosignal: Biosignal,
    pub timezone: TimezoneSpec,
    pub samples: Vec<Sample>,
}
