//! Persistence round-trip tests.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use somno_model::{Biosignal, SignalValues, SleepError, SleepTable, TimezoneSpec};
use somno_output::{SleepEndpoints, load_sleep_data, save_sleep_data, save_sleep_endpoints};

fn t(sec: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(sec, 0).unwrap()
}

fn sample_table(timezone: TimezoneSpec) -> SleepTable {
    let base = 1_609_538_400; // 2021-01-01T22:00:00Z
    let times = vec![t(base), t(base + 30), t(base + 60)];
    let mut columns = BTreeMap::new();
    columns.insert(
        Biosignal::HeartRate,
        SignalValues::Int(vec![Some(55), None, Some(58)]),
    );
    columns.insert(
        Biosignal::Snoring,
        SignalValues::Int(vec![None, Some(100), None]),
    );
    SleepTable::from_columns(timezone, times, columns).unwrap()
}

#[test]
fn test_save_load_save_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("sleep_data.csv");
    let second = dir.path().join("sleep_data_again.csv");

    let table = sample_table(TimezoneSpec::UTC);
    save_sleep_data(&first, &table).unwrap();
    let loaded = load_sleep_data(&first, TimezoneSpec::UTC).unwrap();
    save_sleep_data(&second, &loaded).unwrap();

    let bytes_first = std::fs::read(&first).unwrap();
    let bytes_second = std::fs::read(&second).unwrap();
    assert_eq!(bytes_first, bytes_second);
}

#[test]
fn test_round_trip_preserves_values_and_instants() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sleep_data.csv");

    let table = sample_table(TimezoneSpec::UTC);
    save_sleep_data(&path, &table).unwrap();
    let loaded = load_sleep_data(&path, TimezoneSpec::UTC).unwrap();

    assert_eq!(loaded, table);
}

#[test]
fn test_round_trip_in_named_timezone() {
    // Offsets in the time column change the label, not the instant.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sleep_data.csv");
    let berlin = TimezoneSpec::parse("Europe/Berlin").unwrap();

    let table = sample_table(berlin);
    save_sleep_data(&path, &table).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("2021-01-01T23:00:00+01:00"));

    let loaded = load_sleep_data(&path, berlin).unwrap();
    assert_eq!(loaded.times(), table.times());
}

#[test]
fn test_float_columns_survive_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("night_0.csv");

    let times = vec![t(0), t(60), t(120)];
    let mut columns = BTreeMap::new();
    columns.insert(
        Biosignal::HeartRate,
        SignalValues::Float(vec![Some(50.0), Some(52.5), None]),
    );
    let table = SleepTable::from_columns(TimezoneSpec::UTC, times, columns).unwrap();

    save_sleep_data(&path, &table).unwrap();
    let loaded = load_sleep_data(&path, TimezoneSpec::UTC).unwrap();
    assert_eq!(loaded, table);
}

#[test]
fn test_header_and_row_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sleep_data.csv");
    save_sleep_data(&path, &sample_table(TimezoneSpec::UTC)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("time,heart_rate,snoring"));
    assert_eq!(lines.next(), Some("2021-01-01T22:00:00Z,55,"));
    assert_eq!(lines.next(), Some("2021-01-01T22:00:30Z,,100"));
    assert_eq!(lines.next(), Some("2021-01-01T22:01:00Z,58,"));
}

#[test]
fn test_unknown_column_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sleep_data.csv");
    std::fs::write(&path, "time,caffeine\n2021-01-01T22:00:00Z,3\n").unwrap();

    let err = load_sleep_data(&path, TimezoneSpec::UTC).unwrap_err();
    assert!(matches!(err, SleepError::Parse { .. }));
}

#[test]
fn test_structured_endpoints_export_is_reported_unimplemented() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("endpoints.csv");

    let endpoints = SleepEndpoints::Structured(serde_json::json!({
        "night_0": { "sleep_onset": "2021-01-01T22:10:00Z" }
    }));
    let err = save_sleep_endpoints(&path, &endpoints).unwrap_err();
    assert!(matches!(err, SleepError::Unimplemented { .. }));
    // No partial output either.
    assert!(!path.exists());
}

#[test]
fn test_summary_endpoints_write_flat_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("endpoints.csv");

    let endpoints = SleepEndpoints::Summary(vec![]);
    save_sleep_endpoints(&path, &endpoints).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("time,sleep_onset,wake_onset,total_duration"));
}
