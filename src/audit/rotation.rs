//! Audit file naming
//!
//! Maps a rotation mode and the current wall-clock time to the file that
//! should receive the next row. The path is recomputed on every write, so a
//! long-running process rolls over to a new file at day/hour boundaries.

use chrono::NaiveDateTime;

use crate::config::{RotationMode, SinkConfig};

/// Compute the audit file path for `mode` at time `now`
///
/// `dir` is prepended verbatim; no separator is inserted.
pub fn resolve(mode: RotationMode, dir: &str, filename: &str, now: NaiveDateTime) -> String {
    match mode {
        RotationMode::Single => format!("{}{}", dir, filename),
        RotationMode::Daily => format!("{}audit-{}.csv", dir, now.format("%Y-%m-%d")),
        // Minutes and seconds are always pinned to 00-00.
        RotationMode::Hourly => format!("{}audit-{}-00-00.csv", dir, now.format("%Y-%m-%d-%H")),
    }
}

/// Resolves audit file paths for a fixed rotation mode
#[derive(Debug, Clone)]
pub struct RotatingPathResolver {
    mode: RotationMode,
    directory: String,
    filename: String,
}

impl RotatingPathResolver {
    pub fn new(mode: RotationMode, directory: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            mode,
            directory: directory.into(),
            filename: filename.into(),
        }
    }

    pub fn from_config(config: &SinkConfig) -> Self {
        Self::new(
            config.logging_type,
            config.directory.clone(),
            config.filename.clone(),
        )
    }

    /// Path (relative to the storage root) active at `now`
    pub fn resolve(&self, now: NaiveDateTime) -> String {
        resolve(self.mode, &self.directory, &self.filename, now)
    }
}
