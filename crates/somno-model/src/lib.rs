//! Core data model for the somno toolkit.
//!
//! Defines the closed biosignal set, the raw and reconstructed sample
//! types, the time-indexed [`SleepTable`], explicit timezone handling,
//! and the error taxonomy shared by every other crate in the workspace.

pub mod biosignal;
pub mod error;
pub mod sample;
pub mod table;
pub mod timezone;

pub use biosignal::Biosignal;
pub use error::{Result, SleepError};
pub use sample::{BiosignalSeries, RawRecording, Sample};
pub use table::{SignalValues, SleepTable};
pub use timezone::TimezoneSpec;
