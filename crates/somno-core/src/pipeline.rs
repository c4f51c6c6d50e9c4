//! Folder-level pipeline stages: discover, load, merge, split, resample.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, info_span};

use somno_ingest::{discover_streams, load_raw_file};
use somno_model::{Result, SleepTable, TimezoneSpec};
use somno_transform::{NightSplitter, merge_series, resample_1min};

/// Load every raw stream in `dir` and outer-join them on their time
/// index. The result is unresampled; instants are rendered in
/// `timezone`.
pub fn load_sleep_monitor_folder(dir: &Path, timezone: TimezoneSpec) -> Result<SleepTable> {
    let span = info_span!("load_folder", folder = %dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let streams = discover_streams(dir)?;
    let mut series = Vec::with_capacity(streams.len());
    for stream in &streams {
        debug!(
            file = %stream.path.display(),
            biosignal = %stream.biosignal,
            "loading raw stream"
        );
        series.push(load_raw_file(&stream.path, stream.biosignal, timezone)?);
    }
    let table = merge_series(&series)?;

    info!(
        folder = %dir.display(),
        streams = streams.len(),
        rows = table.height(),
        duration_ms = start.elapsed().as_millis(),
        "folder merge complete"
    );
    Ok(table)
}

/// As [`load_sleep_monitor_folder`], then partition the recording into
/// nights via `splitter` and resample each segment onto the 1-minute
/// grid.
pub fn load_sleep_monitor_folder_split(
    dir: &Path,
    timezone: TimezoneSpec,
    splitter: &dyn NightSplitter,
) -> Result<Vec<SleepTable>> {
    let merged = load_sleep_monitor_folder(dir, timezone)?;

    let span = info_span!("split_nights", folder = %dir.display());
    let _guard = span.enter();
    let nights = splitter.split(&merged)?;
    let mut resampled = Vec::with_capacity(nights.len());
    for night in &nights {
        resampled.push(resample_1min(night)?);
    }

    info!(nights = resampled.len(), "split and resampled recording");
    Ok(resampled)
}
