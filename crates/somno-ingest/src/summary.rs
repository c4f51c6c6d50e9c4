//! Loading the vendor sleep-summary export.
//!
//! The summary file carries one row per night with mixed German/English
//! column labels. Loading renames everything to canonical names and
//! derives the endpoint fields the vendor leaves implicit.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use somno_model::{Result, SleepError};

use crate::timestamp::parse_start_timestamp;

/// One night of the vendor summary export with derived endpoints.
///
/// `total_duration` is the full in-bed interval in seconds; stage totals
/// and latencies are whole minutes, matching the downstream scoring
/// conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleepSummaryNight {
    /// Bedtime (start of the recording interval).
    pub time: DateTime<Utc>,
    pub sleep_onset: DateTime<Utc>,
    pub wake_onset: DateTime<Utc>,
    /// Seconds spent in bed.
    pub total_duration: i64,
    pub total_time_light_sleep: i64,
    pub total_time_deep_sleep: i64,
    pub total_time_rem_sleep: i64,
    pub total_time_awake: i64,
    pub num_wake_bouts: i64,
    pub sleep_onset_latency: i64,
    pub getup_latency: i64,
    pub count_snoring_episodes: i64,
    pub total_time_snoring: i64,
    pub heart_rate_avg: i64,
    pub heart_rate_min: i64,
    pub heart_rate_max: i64,
    /// Time awake between sleep onset and wake onset, minutes.
    pub wake_after_sleep_onset: i64,
    /// In-bed time minus both latencies, minutes.
    pub total_sleep_duration: i64,
}

/// Vendor column labels, in export order.
const COL_BED_START: &str = "von";
const COL_BED_END: &str = "bis";
const COL_LIGHT: &str = "leicht (s)";
const COL_DEEP: &str = "tief (s)";
const COL_REM: &str = "rem (s)";
const COL_AWAKE: &str = "wach (s)";
const COL_WAKE_BOUTS: &str = "Aufwachen";
const COL_SLEEP_LATENCY: &str = "Duration to sleep (s)";
const COL_GETUP_LATENCY: &str = "Duration to wake up (s)";
const COL_SNORING_EPISODES: &str = "Snoring episodes";
const COL_SNORING: &str = "Snoring (s)";
const COL_HR_AVG: &str = "Average heart rate";
const COL_HR_MIN: &str = "Heart rate (min)";
const COL_HR_MAX: &str = "Heart rate (max)";

/// Load the vendor summary file, one entry per night.
pub fn load_sleep_summary(path: &Path) -> Result<Vec<SleepSummaryNight>> {
    if !path.is_file() {
        return Err(SleepError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|error| parse_error(path, error.to_string()))?;
    let headers = reader
        .headers()
        .map_err(|error| parse_error(path, error.to_string()))?
        .clone();

    let mut nights = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|error| parse_error(path, error.to_string()))?;
        let night = parse_night(&headers, &record)
            .map_err(|message| parse_error(path, format!("row {}: {message}", row + 1)))?;
        nights.push(night);
    }
    debug!(path = %path.display(), nights = nights.len(), "loaded sleep summary");
    Ok(nights)
}

fn parse_night(
    headers: &StringRecord,
    record: &StringRecord,
) -> std::result::Result<SleepSummaryNight, String> {
    let bed_start = parse_start_timestamp(field(headers, record, COL_BED_START)?)?;
    let bed_end = parse_start_timestamp(field(headers, record, COL_BED_END)?)?;

    let light_s = int_field(headers, record, COL_LIGHT)?;
    let deep_s = int_field(headers, record, COL_DEEP)?;
    let rem_s = int_field(headers, record, COL_REM)?;
    let awake_s = int_field(headers, record, COL_AWAKE)?;
    let num_wake_bouts = int_field(headers, record, COL_WAKE_BOUTS)?;
    let sleep_latency_s = int_field(headers, record, COL_SLEEP_LATENCY)?;
    let getup_latency_s = int_field(headers, record, COL_GETUP_LATENCY)?;
    let count_snoring_episodes = int_field(headers, record, COL_SNORING_EPISODES)?;
    let snoring_s = int_field(headers, record, COL_SNORING)?;
    let heart_rate_avg = int_field(headers, record, COL_HR_AVG)?;
    let heart_rate_min = int_field(headers, record, COL_HR_MIN)?;
    let heart_rate_max = int_field(headers, record, COL_HR_MAX)?;

    let total_duration = (bed_end - bed_start).num_seconds();
    let waso_s = awake_s - sleep_latency_s - getup_latency_s;
    let total_sleep_s = total_duration - sleep_latency_s - getup_latency_s;

    Ok(SleepSummaryNight {
        time: bed_start,
        sleep_onset: bed_start + Duration::seconds(sleep_latency_s),
        wake_onset: bed_end - Duration::seconds(getup_latency_s),
        total_duration,
        total_time_light_sleep: light_s / 60,
        total_time_deep_sleep: deep_s / 60,
        total_time_rem_sleep: rem_s / 60,
        total_time_awake: awake_s / 60,
        num_wake_bouts,
        sleep_onset_latency: sleep_latency_s / 60,
        getup_latency: getup_latency_s / 60,
        count_snoring_episodes,
        total_time_snoring: snoring_s / 60,
        heart_rate_avg,
        heart_rate_min,
        heart_rate_max,
        wake_after_sleep_onset: waso_s / 60,
        total_sleep_duration: total_sleep_s / 60,
    })
}

fn field<'r>(
    headers: &StringRecord,
    record: &'r StringRecord,
    name: &str,
) -> std::result::Result<&'r str, String> {
    let idx = headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| format!("missing '{name}' column"))?;
    Ok(record.get(idx).unwrap_or("").trim())
}

fn int_field(
    headers: &StringRecord,
    record: &StringRecord,
    name: &str,
) -> std::result::Result<i64, String> {
    let text = field(headers, record, name)?;
    if let Ok(value) = text.parse::<i64>() {
        return Ok(value);
    }
    // Some exports render counts as floats; accept only integral ones.
    if let Ok(value) = text.parse::<f64>() {
        if value.fract() == 0.0 {
            return Ok(value as i64);
        }
        return Err(format!("non-integral value '{text}' in '{name}'"));
    }
    Err(format!("invalid integer '{text}' in '{name}'"))
}

fn parse_error(path: &Path, message: String) -> SleepError {
    SleepError::Parse {
        path: path.to_path_buf(),
        message,
    }
}
