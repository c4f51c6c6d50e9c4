//! Pipeline orchestration for sleep-monitor exports.
//!
//! Composes the ingest and transform crates into the two folder-level
//! entry points: a plain merged table, or per-night resampled segments.

pub mod pipeline;

pub use pipeline::{load_sleep_monitor_folder, load_sleep_monitor_folder_split};
