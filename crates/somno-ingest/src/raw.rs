//! Loading one raw sleep-monitor CSV into a single biosignal series.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use somno_model::{
    Biosignal, BiosignalSeries, RawRecording, Result, Sample, SleepError, TimezoneSpec,
};

use crate::literal::parse_int_array;
use crate::timestamp::{parse_start_timestamp, reconstruct};

/// Load one raw export file as the given biosignal.
///
/// Rows are sorted stably by start time, each row is expanded into
/// per-sample timestamps, and the flattened stream is sorted and
/// de-duplicated keep-first. Reconstructed naive timestamps are UTC
/// instants; `timezone` only controls how they are rendered downstream.
pub fn load_raw_file(
    path: &Path,
    biosignal: Biosignal,
    timezone: TimezoneSpec,
) -> Result<BiosignalSeries> {
    let mut recordings = read_recordings(path)?;
    recordings.sort_by_key(|recording| recording.start);

    let mut samples: Vec<Sample> = Vec::new();
    for recording in &recordings {
        samples.extend(reconstruct(recording)?);
    }
    // Stable sort: rows that collide on an instant keep file order, so
    // the first-sorted row's sample survives the dedup below.
    samples.sort_by_key(|sample| sample.time);
    dedup_keep_first(&mut samples);

    debug!(
        path = %path.display(),
        biosignal = %biosignal,
        rows = recordings.len(),
        samples = samples.len(),
        "loaded raw stream"
    );
    Ok(BiosignalSeries {
        biosignal,
        timezone,
        samples,
    })
}

/// As [`load_raw_file`], resolving the biosignal by canonical name.
///
/// # Errors
///
/// Returns [`SleepError::UnsupportedStream`] for a name outside the
/// canonical set, before the file is touched.
pub fn load_raw_file_named(
    path: &Path,
    name: &str,
    timezone: TimezoneSpec,
) -> Result<BiosignalSeries> {
    let biosignal = Biosignal::from_name(name)?;
    load_raw_file(path, biosignal, timezone)
}

fn read_recordings(path: &Path) -> Result<Vec<RawRecording>> {
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
    let start_idx = find_column(&headers, "start", path)?;
    let duration_idx = find_column(&headers, "duration", path)?;
    let value_idx = find_column(&headers, "value", path)?;

    let mut recordings = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|error| parse_error(path, error.to_string()))?;
        let row_error = |message: String| parse_error(path, format!("row {}: {message}", row + 1));

        let start = parse_start_timestamp(cell(&record, start_idx)).map_err(&row_error)?;
        let durations = parse_int_array(cell(&record, duration_idx)).map_err(&row_error)?;
        let values = parse_int_array(cell(&record, value_idx)).map_err(&row_error)?;
        if durations.len() != values.len() {
            return Err(SleepError::LengthMismatch {
                durations: durations.len(),
                values: values.len(),
            });
        }
        recordings.push(RawRecording {
            start,
            durations,
            values,
        });
    }
    Ok(recordings)
}

fn cell<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("")
}

fn find_column(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| parse_error(path, format!("missing '{name}' column")))
}

fn parse_error(path: &Path, message: String) -> SleepError {
    SleepError::Parse {
        path: path.to_path_buf(),
        message,
    }
}

fn dedup_keep_first(samples: &mut Vec<Sample>) {
    samples.dedup_by_key(|sample| sample.time);
}
