//! Error taxonomy for the sleep-data pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, merging, or persisting
/// sleep-monitor data.
///
/// Parse failures propagate immediately to the caller; no operation
/// produces partial output or retries.
#[derive(Debug, Error)]
pub enum SleepError {
    // === File System Errors ===
    /// Export folder not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Raw file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parse Errors ===
    /// Malformed input: bad timestamp, bad array literal, non-integral
    /// value, missing or unknown column.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Parallel duration/value arrays of different lengths.
    #[error("duration/value length mismatch: {durations} durations vs {values} values")]
    LengthMismatch { durations: usize, values: usize },

    // === Domain Errors ===
    /// Biosignal name outside the canonical set.
    #[error(
        "unsupported biosignal '{name}': must be one of heart_rate, respiration_rate, sleep_state, snoring"
    )]
    UnsupportedStream { name: String },

    /// No raw sleep-monitor files in the folder.
    #[error("no raw_sleep-monitor_*.csv files found in {path}")]
    EmptyFolder { path: PathBuf },

    /// Timezone name that is neither an IANA zone nor a fixed offset.
    #[error("unrecognized timezone '{name}'")]
    UnknownTimezone { name: String },

    /// Table-level invariant violation or writer failure.
    #[error("table operation failed: {message}")]
    Table { message: String },

    /// Export path that is intentionally not implemented.
    #[error("{feature} is not implemented")]
    Unimplemented { feature: String },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, SleepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SleepError::EmptyFolder {
            path: PathBuf::from("/data/export"),
        };
        assert_eq!(
            err.to_string(),
            "no raw_sleep-monitor_*.csv files found in /data/export"
        );
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = SleepError::LengthMismatch {
            durations: 3,
            values: 2,
        };
        assert_eq!(
            err.to_string(),
            "duration/value length mismatch: 3 durations vs 2 values"
        );
    }
}
