//! The time-indexed wide table produced by merging biosignal streams.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::biosignal::Biosignal;
use crate::error::{Result, SleepError};
use crate::timezone::TimezoneSpec;

/// Column storage for one biosignal.
///
/// Merged tables hold integer samples in native units; resampled tables
/// hold interpolated floats. Missing instants are `None` in both forms.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalValues {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
}

impl SignalValues {
    pub fn len(&self) -> usize {
        match self {
            SignalValues::Int(cells) => cells.len(),
            SignalValues::Float(cells) => cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `idx` as f64 regardless of storage, `None` when missing.
    pub fn get_f64(&self, idx: usize) -> Option<f64> {
        match self {
            SignalValues::Int(cells) => cells.get(idx).copied().flatten().map(|v| v as f64),
            SignalValues::Float(cells) => cells.get(idx).copied().flatten(),
        }
    }

    fn slice(&self, start: usize, len: usize) -> SignalValues {
        match self {
            SignalValues::Int(cells) => SignalValues::Int(cells[start..start + len].to_vec()),
            SignalValues::Float(cells) => SignalValues::Float(cells[start..start + len].to_vec()),
        }
    }
}

/// Time-indexed table with one column per biosignal.
///
/// The index is a strictly ascending, de-duplicated list of UTC
/// instants; the timezone controls how those instants are rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepTable {
    timezone: TimezoneSpec,
    times: Vec<DateTime<Utc>>,
    columns: BTreeMap<Biosignal, SignalValues>,
}

impl SleepTable {
    /// An empty table in the given zone.
    pub fn new(timezone: TimezoneSpec) -> Self {
        Self {
            timezone,
            times: Vec::new(),
            columns: BTreeMap::new(),
        }
    }

    /// Build a table from an index and aligned columns.
    ///
    /// # Errors
    ///
    /// Returns [`SleepError::Table`] when the index is not strictly
    /// ascending or a column's length differs from the index length.
    pub fn from_columns(
        timezone: TimezoneSpec,
        times: Vec<DateTime<Utc>>,
        columns: BTreeMap<Biosignal, SignalValues>,
    ) -> Result<Self> {
        if let Some(window) = times.windows(2).find(|w| w[0] >= w[1]) {
            return Err(SleepError::Table {
                message: format!(
                    "time index must be strictly ascending, found {} before {}",
                    window[0], window[1]
                ),
            });
        }
        for (signal, values) in &columns {
            if values.len() != times.len() {
                return Err(SleepError::Table {
                    message: format!(
                        "column '{signal}' has {} values for {} index entries",
                        values.len(),
                        times.len()
                    ),
                });
            }
        }
        Ok(Self {
            timezone,
            times,
            columns,
        })
    }

    pub fn timezone(&self) -> TimezoneSpec {
        self.timezone
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.times.len()
    }

    /// Number of biosignal columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn first_time(&self) -> Option<DateTime<Utc>> {
        self.times.first().copied()
    }

    pub fn last_time(&self) -> Option<DateTime<Utc>> {
        self.times.last().copied()
    }

    /// Biosignals present, in canonical column order.
    pub fn biosignals(&self) -> Vec<Biosignal> {
        self.columns.keys().copied().collect()
    }

    pub fn column(&self, signal: Biosignal) -> Option<&SignalValues> {
        self.columns.get(&signal)
    }

    /// Columns in canonical order.
    pub fn columns(&self) -> impl Iterator<Item = (Biosignal, &SignalValues)> {
        self.columns.iter().map(|(signal, values)| (*signal, values))
    }

    /// Contiguous row range as a new table with the same columns and
    /// timezone. Used by night splitters.
    ///
    /// # Panics
    ///
    /// Panics if `start + len` exceeds the table height.
    pub fn slice(&self, start: usize, len: usize) -> SleepTable {
        let times = self.times[start..start + len].to_vec();
        let columns = self
            .columns
            .iter()
            .map(|(signal, values)| (*signal, values.slice(start, len)))
            .collect();
        SleepTable {
            timezone: self.timezone,
            times,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(sec: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(sec, 0).unwrap()
    }

    fn two_column_table() -> SleepTable {
        let mut columns = BTreeMap::new();
        columns.insert(
            Biosignal::HeartRate,
            SignalValues::Int(vec![Some(55), None, Some(58)]),
        );
        columns.insert(
            Biosignal::Snoring,
            SignalValues::Int(vec![None, Some(100), None]),
        );
        SleepTable::from_columns(TimezoneSpec::UTC, vec![t(0), t(30), t(60)], columns).unwrap()
    }

    #[test]
    fn test_from_columns_rejects_unsorted_index() {
        let err =
            SleepTable::from_columns(TimezoneSpec::UTC, vec![t(60), t(0)], BTreeMap::new())
                .unwrap_err();
        assert!(matches!(err, SleepError::Table { .. }));
    }

    #[test]
    fn test_from_columns_rejects_duplicate_index() {
        let err =
            SleepTable::from_columns(TimezoneSpec::UTC, vec![t(0), t(0)], BTreeMap::new())
                .unwrap_err();
        assert!(matches!(err, SleepError::Table { .. }));
    }

    #[test]
    fn test_from_columns_rejects_misaligned_column() {
        let mut columns = BTreeMap::new();
        columns.insert(Biosignal::HeartRate, SignalValues::Int(vec![Some(55)]));
        let err = SleepTable::from_columns(TimezoneSpec::UTC, vec![t(0), t(60)], columns)
            .unwrap_err();
        assert!(matches!(err, SleepError::Table { .. }));
    }

    #[test]
    fn test_slice_keeps_columns_aligned() {
        let table = two_column_table();
        let tail = table.slice(1, 2);
        assert_eq!(tail.times(), &[t(30), t(60)]);
        assert_eq!(
            tail.column(Biosignal::HeartRate),
            Some(&SignalValues::Int(vec![None, Some(58)]))
        );
        assert_eq!(
            tail.column(Biosignal::Snoring),
            Some(&SignalValues::Int(vec![Some(100), None]))
        );
    }

    #[test]
    fn test_get_f64_bridges_storage() {
        let ints = SignalValues::Int(vec![Some(55), None]);
        assert_eq!(ints.get_f64(0), Some(55.0));
        assert_eq!(ints.get_f64(1), None);
        let floats = SignalValues::Float(vec![Some(56.5)]);
        assert_eq!(floats.get_f64(0), Some(56.5));
    }
}
