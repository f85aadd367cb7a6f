//! Path management for the audit sink
//!
//! ## Path Resolution Order
//!
//! Storage root:
//! 1. `AUDIT_SINK_DISK` environment variable (if set)
//! 2. Platform data directory (`directories::ProjectDirs`) + `storage`
//! 3. `./storage`
//!
//! Config file:
//! 1. `AUDIT_SINK_CONFIG` environment variable (if set)
//! 2. Platform config directory + `config.json`

use std::ffi::OsString;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Resolves the default locations used by the sink
#[derive(Debug, Clone)]
pub struct SinkPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl SinkPaths {
    /// Create a new SinkPaths instance from the platform directories
    pub fn new() -> Self {
        match ProjectDirs::from("", "", "audit-sink") {
            Some(dirs) => Self {
                config_dir: dirs.config_dir().to_path_buf(),
                data_dir: dirs.data_dir().to_path_buf(),
            },
            None => Self::with_base_dir(PathBuf::from(".")),
        }
    }

    /// Create SinkPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            config_dir: base_dir.clone(),
            data_dir: base_dir,
        }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Get the default storage root (`disk`)
    pub fn storage_root(&self) -> PathBuf {
        self.storage_root_or(std::env::var_os("AUDIT_SINK_DISK"))
    }

    /// Get the path to the config file
    pub fn config_file(&self) -> PathBuf {
        self.config_file_or(std::env::var_os("AUDIT_SINK_CONFIG"))
    }

    fn storage_root_or(&self, custom: Option<OsString>) -> PathBuf {
        non_empty(custom).unwrap_or_else(|| self.data_dir.join("storage"))
    }

    fn config_file_or(&self, custom: Option<OsString>) -> PathBuf {
        non_empty(custom).unwrap_or_else(|| self.config_dir.join("config.json"))
    }
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

impl Default for SinkPaths {
    fn default() -> Self {
        Self::new()
    }
}
