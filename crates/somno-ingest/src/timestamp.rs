//! Timestamp reconstruction from run-length encoded recordings.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use somno_model::{RawRecording, Result, Sample, SleepError};

/// Expand one recording burst into per-sample timestamps.
///
/// The i-th sample lands at `start` plus the sum of all preceding
/// durations, so the first sample is at `start` exactly and sub-second
/// start precision carries through. Zero durations collapse consecutive
/// samples onto the same instant; ties are resolved later by the
/// keep-first dedup.
///
/// # Errors
///
/// Returns [`SleepError::LengthMismatch`] when the duration and value
/// arrays differ in length.
pub fn reconstruct(recording: &RawRecording) -> Result<Vec<Sample>> {
    if recording.durations.len() != recording.values.len() {
        return Err(SleepError::LengthMismatch {
            durations: recording.durations.len(),
            values: recording.values.len(),
        });
    }
    let mut samples = Vec::with_capacity(recording.values.len());
    let mut offset: i64 = 0;
    for (i, &value) in recording.values.iter().enumerate() {
        if i > 0 {
            offset += recording.durations[i - 1];
        }
        samples.push(Sample {
            time: recording.start + Duration::seconds(offset),
            value,
        });
    }
    Ok(samples)
}

/// Parse an ISO-8601-ish start timestamp.
///
/// Offset-carrying strings are converted to their UTC instant; naive
/// strings are interpreted as UTC. Errors are plain messages; callers
/// attach file and row context.
pub fn parse_start_timestamp(text: &str) -> std::result::Result<DateTime<Utc>, String> {
    let trimmed = text.trim();
    if let Ok(aware) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(aware.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!("unrecognized timestamp '{trimmed}'"))
}
