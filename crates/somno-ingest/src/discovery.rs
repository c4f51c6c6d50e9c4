//! Discovery of raw sleep-monitor files in an export folder.

use std::path::{Path, PathBuf};

use tracing::debug;

use somno_model::{Biosignal, Result, SleepError};

const RAW_FILE_PREFIX: &str = "raw_sleep-monitor_";
const RAW_FILE_EXTENSION: &str = ".csv";

/// A raw export file matched to its biosignal.
#[derive(Debug, Clone)]
pub struct DiscoveredStream {
    pub path: PathBuf,
    pub biosignal: Biosignal,
}

/// Find all loadable raw streams in `dir`, sorted by filename.
///
/// Only files named `raw_sleep-monitor_<suffix>.csv` are considered;
/// files whose suffix is not a known biosignal are skipped silently
/// (debug-logged).
///
/// # Errors
///
/// Returns [`SleepError::EmptyFolder`] when no loadable stream is found,
/// so callers never receive a degenerate empty table without a signal.
pub fn discover_streams(dir: &Path) -> Result<Vec<DiscoveredStream>> {
    if !dir.is_dir() {
        return Err(SleepError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| SleepError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut candidates: Vec<(String, PathBuf)> = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|source| SleepError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with(RAW_FILE_PREFIX) && name.ends_with(RAW_FILE_EXTENSION) {
            candidates.push((name.to_string(), path));
        }
    }
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut streams = Vec::new();
    for (name, path) in candidates {
        let suffix = &name[RAW_FILE_PREFIX.len()..name.len() - RAW_FILE_EXTENSION.len()];
        match Biosignal::from_file_suffix(suffix) {
            Some(biosignal) => streams.push(DiscoveredStream { path, biosignal }),
            None => debug!(file = %name, suffix, "skipping unrecognized raw stream"),
        }
    }

    if streams.is_empty() {
        return Err(SleepError::EmptyFolder {
            path: dir.to_path_buf(),
        });
    }
    Ok(streams)
}
