//! Sleep-endpoints export.

use std::path::Path;

use chrono::SecondsFormat;
use csv::WriterBuilder;
use tracing::debug;

use somno_ingest::SleepSummaryNight;
use somno_model::{Result, SleepError};

/// Derived sleep endpoints in one of the two shapes downstream tools
/// produce.
#[derive(Debug, Clone)]
pub enum SleepEndpoints {
    /// Flat per-night rows, straight from the summary loader.
    Summary(Vec<SleepSummaryNight>),
    /// Nested per-night structure from endpoint-derivation tools.
    Structured(serde_json::Value),
}

/// Write derived sleep endpoints as CSV with `time` as row key.
///
/// # Errors
///
/// The nested structured form has no writer yet and fails with
/// [`SleepError::Unimplemented`] instead of being silently dropped.
pub fn save_sleep_endpoints(path: &Path, endpoints: &SleepEndpoints) -> Result<()> {
    match endpoints {
        SleepEndpoints::Summary(nights) => write_summary_csv(path, nights),
        SleepEndpoints::Structured(_) => Err(SleepError::Unimplemented {
            feature: "exporting structured sleep endpoints".to_string(),
        }),
    }
}

const SUMMARY_HEADER: [&str; 18] = [
    "time",
    "sleep_onset",
    "wake_onset",
    "total_duration",
    "total_time_light_sleep",
    "total_time_deep_sleep",
    "total_time_rem_sleep",
    "total_time_awake",
    "num_wake_bouts",
    "sleep_onset_latency",
    "getup_latency",
    "count_snoring_episodes",
    "total_time_snoring",
    "heart_rate_avg",
    "heart_rate_min",
    "heart_rate_max",
    "wake_after_sleep_onset",
    "total_sleep_duration",
];

fn write_summary_csv(path: &Path, nights: &[SleepSummaryNight]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .map_err(|error| SleepError::Table {
            message: error.to_string(),
        })?;
    writer
        .write_record(SUMMARY_HEADER)
        .map_err(|error| SleepError::Table {
            message: error.to_string(),
        })?;
    for night in nights {
        let record = [
            night.time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            night.sleep_onset.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            night.wake_onset.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            night.total_duration.to_string(),
            night.total_time_light_sleep.to_string(),
            night.total_time_deep_sleep.to_string(),
            night.total_time_rem_sleep.to_string(),
            night.total_time_awake.to_string(),
            night.num_wake_bouts.to_string(),
            night.sleep_onset_latency.to_string(),
            night.getup_latency.to_string(),
            night.count_snoring_episodes.to_string(),
            night.total_time_snoring.to_string(),
            night.heart_rate_avg.to_string(),
            night.heart_rate_min.to_string(),
            night.heart_rate_max.to_string(),
            night.wake_after_sleep_onset.to_string(),
            night.total_sleep_duration.to_string(),
        ];
        writer
            .write_record(&record)
            .map_err(|error| SleepError::Table {
                message: error.to_string(),
            })?;
    }
    writer.flush().map_err(|source| SleepError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), nights = nights.len(), "saved sleep endpoints");
    Ok(())
}
