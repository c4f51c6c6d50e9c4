//! Outer-join merging of biosignal streams onto one time index.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use tracing::debug;

use somno_model::{Biosignal, BiosignalSeries, Result, SignalValues, SleepError, SleepTable};

/// Merge loaded streams into a single wide table.
///
/// The index is the union of all stream timestamps, ascending. Where a
/// stream has no sample at an instant its cell stays empty. Should two
/// series carry the same biosignal, earlier series win cell-by-cell.
pub fn merge_series(series: &[BiosignalSeries]) -> Result<SleepTable> {
    let Some(first) = series.first() else {
        return Err(SleepError::Table {
            message: "no streams to merge".to_string(),
        });
    };
    let timezone = first.timezone;
    if let Some(other) = series.iter().find(|s| s.timezone != timezone) {
        return Err(SleepError::Table {
            message: format!(
                "mixed target timezones: {timezone} vs {} ({})",
                other.timezone, other.biosignal
            ),
        });
    }

    let mut index: BTreeSet<DateTime<Utc>> = BTreeSet::new();
    for stream in series {
        for sample in &stream.samples {
            index.insert(sample.time);
        }
    }
    let times: Vec<DateTime<Utc>> = index.into_iter().collect();
    let positions: BTreeMap<DateTime<Utc>, usize> = times
        .iter()
        .enumerate()
        .map(|(idx, time)| (*time, idx))
        .collect();

    let mut cells: BTreeMap<Biosignal, Vec<Option<i64>>> = BTreeMap::new();
    for stream in series {
        let column = cells
            .entry(stream.biosignal)
            .or_insert_with(|| vec![None; times.len()]);
        for sample in &stream.samples {
            let idx = positions[&sample.time];
            if column[idx].is_none() {
                column[idx] = Some(sample.value);
            }
        }
    }

    debug!(
        streams = series.len(),
        rows = times.len(),
        "merged biosignal streams"
    );
    let columns = cells
        .into_iter()
        .map(|(signal, values)| (signal, SignalValues::Int(values)))
        .collect();
    SleepTable::from_columns(timezone, times, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use somno_model::{Sample, TimezoneSpec};

    fn t(sec: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(sec, 0).unwrap()
    }

    fn series(biosignal: Biosignal, samples: &[(i64, i64)]) -> BiosignalSeries {
        BiosignalSeries {
            biosignal,
            timezone: TimezoneSpec::UTC,
            samples: samples
                .iter()
                .map(|&(sec, value)| Sample {
                    time: t(sec),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_index_is_union_of_timestamps_sorted() {
        // hr at 22:00:00 and 22:01:00, snoring at 22:00:30.
        let base = 1_609_538_400; // 2021-01-01T22:00:00Z
        let merged = merge_series(&[
            series(Biosignal::HeartRate, &[(base, 55), (base + 60, 58)]),
            series(Biosignal::Snoring, &[(base + 30, 100)]),
        ])
        .unwrap();

        assert_eq!(merged.times(), &[t(base), t(base + 30), t(base + 60)]);
        assert_eq!(
            merged.column(Biosignal::HeartRate),
            Some(&SignalValues::Int(vec![Some(55), None, Some(58)]))
        );
        assert_eq!(
            merged.column(Biosignal::Snoring),
            Some(&SignalValues::Int(vec![None, Some(100), None]))
        );
    }

    #[test]
    fn test_same_signal_twice_keeps_first_cell() {
        let merged = merge_series(&[
            series(Biosignal::HeartRate, &[(0, 55)]),
            series(Biosignal::HeartRate, &[(0, 99), (60, 60)]),
        ])
        .unwrap();

        assert_eq!(
            merged.column(Biosignal::HeartRate),
            Some(&SignalValues::Int(vec![Some(55), Some(60)]))
        );
    }

    #[test]
    fn test_no_streams_is_an_error() {
        assert!(matches!(merge_series(&[]), Err(SleepError::Table { .. })));
    }

    #[test]
    fn test_mixed_timezones_are_rejected() {
        let mut other = series(Biosignal::Snoring, &[(0, 100)]);
        other.timezone = TimezoneSpec::parse("Europe/Berlin").unwrap();
        let err =
            merge_series(&[series(Biosignal::HeartRate, &[(0, 55)]), other]).unwrap_err();
        assert!(matches!(err, SleepError::Table { .. }));
    }
}
