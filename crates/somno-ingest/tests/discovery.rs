//! Folder discovery tests.

use tempfile::TempDir;

use somno_ingest::discover_streams;
use somno_model::{Biosignal, SleepError};

fn create_export_dir(names: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in names {
        std::fs::write(dir.path().join(name), "start,duration,value\n").unwrap();
    }
    dir
}

#[test]
fn test_discovers_known_streams_sorted_by_filename() {
    let dir = create_export_dir(&[
        "raw_sleep-monitor_snoring.csv",
        "raw_sleep-monitor_hr.csv",
        "raw_sleep-monitor_sleep-state.csv",
        "raw_sleep-monitor_respiratory-rate.csv",
    ]);
    let streams = discover_streams(dir.path()).unwrap();

    let signals: Vec<Biosignal> = streams.iter().map(|s| s.biosignal).collect();
    // Lexicographic filename order: hr, respiratory-rate, sleep-state, snoring.
    assert_eq!(
        signals,
        vec![
            Biosignal::HeartRate,
            Biosignal::RespirationRate,
            Biosignal::SleepState,
            Biosignal::Snoring,
        ]
    );
}

#[test]
fn test_unrecognized_suffixes_are_skipped_silently() {
    let dir = create_export_dir(&[
        "raw_sleep-monitor_hr.csv",
        "raw_sleep-monitor_altitude.csv",
    ]);
    let streams = discover_streams(dir.path()).unwrap();

    assert_eq!(streams.len(), 1);
    assert_eq!(streams[0].biosignal, Biosignal::HeartRate);
}

#[test]
fn test_non_matching_files_are_ignored() {
    let dir = create_export_dir(&[
        "raw_sleep-monitor_hr.csv",
        "sleep.csv",
        "raw_tracker_hr.csv",
        "notes.txt",
    ]);
    let streams = discover_streams(dir.path()).unwrap();
    assert_eq!(streams.len(), 1);
}

#[test]
fn test_empty_folder_is_an_error() {
    let dir = create_export_dir(&[]);
    let err = discover_streams(dir.path()).unwrap_err();
    assert!(matches!(err, SleepError::EmptyFolder { .. }));
}

#[test]
fn test_folder_with_only_unknown_suffixes_is_an_error() {
    let dir = create_export_dir(&["raw_sleep-monitor_altitude.csv"]);
    let err = discover_streams(dir.path()).unwrap_err();
    assert!(matches!(err, SleepError::EmptyFolder { .. }));
}

#[test]
fn test_missing_directory_is_an_error() {
    let err = discover_streams(std::path::Path::new("/nonexistent/export")).unwrap_err();
    assert!(matches!(err, SleepError::DirectoryNotFound { .. }));
}
