//! Night-splitting contract and a gap-based reference implementation.

use chrono::Duration;
use tracing::debug;

use somno_model::{Result, SleepTable};

/// Partitions a merged multi-night table into per-night segments.
///
/// Implementations must return non-overlapping segments in ascending
/// order, each keeping the parent's column set and timezone. The policy
/// itself (gap detection, clock boundaries, annotation files) is up to
/// the implementation.
pub trait NightSplitter {
    fn split(&self, table: &SleepTable) -> Result<Vec<SleepTable>>;
}

/// Splits whenever consecutive samples are separated by more than
/// `min_gap`.
///
/// Sleep-monitor exports carry no daytime samples, so any sufficiently
/// large gap marks the boundary between two nights.
#[derive(Debug, Clone)]
pub struct GapNightSplitter {
    min_gap: Duration,
}

impl GapNightSplitter {
    pub fn new(min_gap: Duration) -> Self {
        Self { min_gap }
    }
}

impl Default for GapNightSplitter {
    fn default() -> Self {
        Self::new(Duration::hours(8))
    }
}

impl NightSplitter for GapNightSplitter {
    fn split(&self, table: &SleepTable) -> Result<Vec<SleepTable>> {
        let times = table.times();
        if times.is_empty() {
            return Ok(Vec::new());
        }
        let mut segments = Vec::new();
        let mut start = 0usize;
        for idx in 1..times.len() {
            if times[idx] - times[idx - 1] > self.min_gap {
                segments.push(table.slice(start, idx - start));
                start = idx;
            }
        }
        segments.push(table.slice(start, times.len() - start));
        debug!(nights = segments.len(), "split recording into nights");
        Ok(segments)
    }
}
