//! Resampling per-night segments onto a uniform 1-minute grid.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use somno_model::{Biosignal, Result, SignalValues, SleepError, SleepTable};

const STEP_SECONDS: i64 = 60;

/// Resample one segment onto a 1-minute grid spanning its own range.
///
/// Grid instants are whole minutes starting at the first sample's minute
/// and ending at or before the last sample. Each column is interpolated
/// linearly in time between its nearest known samples; leading and
/// trailing gaps stay empty (interpolation never extrapolates), and a
/// column with no data at all stays entirely empty.
pub fn resample_1min(table: &SleepTable) -> Result<SleepTable> {
    let times = table.times();
    if times.is_empty() {
        return Ok(SleepTable::new(table.timezone()));
    }

    let grid = minute_grid(times[0], times[times.len() - 1])?;
    let mut columns: BTreeMap<Biosignal, SignalValues> = BTreeMap::new();
    for (signal, values) in table.columns() {
        let known: Vec<(DateTime<Utc>, f64)> = times
            .iter()
            .enumerate()
            .filter_map(|(idx, time)| values.get_f64(idx).map(|value| (*time, value)))
            .collect();
        let cells = grid
            .iter()
            .map(|instant| interpolate_at(&known, *instant))
            .collect();
        columns.insert(signal, SignalValues::Float(cells));
    }

    debug!(
        rows_in = times.len(),
        rows_out = grid.len(),
        "resampled segment to 1-minute grid"
    );
    SleepTable::from_columns(table.timezone(), grid, columns)
}

/// Whole-minute instants from `first` (floored) through `last`.
fn minute_grid(first: DateTime<Utc>, last: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>> {
    let first_sec = first.timestamp();
    let mut cursor = first_sec - first_sec.rem_euclid(STEP_SECONDS);
    let mut grid = Vec::new();
    loop {
        let instant = DateTime::from_timestamp(cursor, 0).ok_or_else(|| SleepError::Table {
            message: format!("grid instant out of range at {cursor} s"),
        })?;
        if instant > last {
            break;
        }
        grid.push(instant);
        cursor += STEP_SECONDS;
    }
    Ok(grid)
}

/// Linear interpolation over the known `(time, value)` samples, sorted
/// ascending. `None` outside the known range.
fn interpolate_at(known: &[(DateTime<Utc>, f64)], instant: DateTime<Utc>) -> Option<f64> {
    match known.binary_search_by(|(time, _)| time.cmp(&instant)) {
        Ok(idx) => Some(known[idx].1),
        Err(0) => None,
        Err(idx) if idx == known.len() => None,
        Err(idx) => {
            let (before_time, before_value) = known[idx - 1];
            let (after_time, after_value) = known[idx];
            let span = (after_time - before_time).num_milliseconds() as f64;
            let elapsed = (instant - before_time).num_milliseconds() as f64;
            Some(before_value + (after_value - before_value) * (elapsed / span))
        }
    }
}
