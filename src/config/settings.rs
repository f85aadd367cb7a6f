//! Sink configuration
//!
//! `SinkConfig` is read once at startup and handed to the sink's
//! constructor. Nothing in the crate looks configuration up globally.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::paths::SinkPaths;
use crate::error::{AuditSinkError, AuditSinkResult};

/// File rotation policy for the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RotationMode {
    /// One file for the lifetime of the system
    #[default]
    Single,
    /// One file per calendar day (`audit-2024-01-01.csv`)
    Daily,
    /// One file per hour (`audit-2024-01-01-05-00-00.csv`)
    Hourly,
}

impl RotationMode {
    /// All accepted configuration values
    pub const VALID: [&'static str; 3] = ["single", "daily", "hourly"];

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationMode::Single => "single",
            RotationMode::Daily => "daily",
            RotationMode::Hourly => "hourly",
        }
    }
}

impl fmt::Display for RotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationMode {
    type Err = AuditSinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(RotationMode::Single),
            "daily" => Ok(RotationMode::Daily),
            "hourly" => Ok(RotationMode::Hourly),
            other => Err(AuditSinkError::Config(format!(
                "File logging type {} unknown. Please use one of 'single', 'daily' or 'hourly'.",
                other
            ))),
        }
    }
}

impl TryFrom<String> for RotationMode {
    type Error = AuditSinkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// What to do when an audit row cannot be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Propagate the error to the caller (default)
    #[default]
    Closed,
    /// Log the error and report success to the caller
    Open,
}

/// Configuration for the filesystem audit sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Storage root that all audit paths are relative to
    #[serde(default = "default_disk")]
    pub disk: PathBuf,

    /// Prefix prepended verbatim to every file name (include the trailing `/`)
    #[serde(default)]
    pub directory: String,

    /// File name used by `single` rotation
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Rotation policy
    #[serde(default)]
    pub logging_type: RotationMode,

    /// Whether write failures reach the caller
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_disk() -> PathBuf {
    SinkPaths::new().storage_root()
}

fn default_filename() -> String {
    "audit.csv".to_string()
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            disk: default_disk(),
            directory: String::new(),
            filename: default_filename(),
            logging_type: RotationMode::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl SinkConfig {
    /// Default configuration rooted at `disk`
    pub fn with_disk(disk: impl Into<PathBuf>) -> Self {
        Self {
            disk: disk.into(),
            directory: String::new(),
            filename: default_filename(),
            logging_type: RotationMode::default(),
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Load configuration from disk, or fall back to defaults if the file doesn't exist
    ///
    /// `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
    pub fn load_or_default(path: &Path) -> AuditSinkResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AuditSinkError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let parsed: Result<Self, String> = if is_yaml(path) {
            serde_yaml::from_str(&contents).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&contents).map_err(|e| e.to_string())
        };

        parsed.map_err(|e| {
            AuditSinkError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Save configuration to disk, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> AuditSinkResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AuditSinkError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let serialized: Result<String, String> = if is_yaml(path) {
            serde_yaml::to_string(self).map_err(|e| e.to_string())
        } else {
            serde_json::to_string_pretty(self).map_err(|e| e.to_string())
        };
        let contents = serialized
            .map_err(|e| AuditSinkError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| AuditSinkError::Io(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SinkConfig::with_disk("/tmp/audit");
        assert_eq!(config.directory, "");
        assert_eq!(config.filename, "audit.csv");
        assert_eq!(config.logging_type, RotationMode::Single);
        assert_eq!(config.failure_policy, FailurePolicy::Closed);
    }

    #[test]
    fn test_rotation_mode_parse() {
        assert_eq!("single".parse::<RotationMode>().unwrap(), RotationMode::Single);
        assert_eq!("daily".parse::<RotationMode>().unwrap(), RotationMode::Daily);
        assert_eq!("hourly".parse::<RotationMode>().unwrap(), RotationMode::Hourly);
    }

    #[test]
    fn test_invalid_rotation_mode_lists_valid_options() {
        let err = "weekly".parse::<RotationMode>().unwrap_err();
        assert!(err.is_config());

        let message = err.to_string();
        assert!(message.contains("weekly"));
        for valid in RotationMode::VALID {
            assert!(message.contains(valid), "missing {} in {}", valid, message);
        }
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = SinkConfig::load_or_default(&temp_dir.path().join("none.json")).unwrap();
        assert_eq!(config.filename, "audit.csv");
    }

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"disk": "/var/audit", "directory": "logs/", "logging_type": "hourly"}"#,
        )
        .unwrap();

        let config = SinkConfig::load_or_default(&path).unwrap();
        assert_eq!(config.disk, PathBuf::from("/var/audit"));
        assert_eq!(config.directory, "logs/");
        assert_eq!(config.filename, "audit.csv");
        assert_eq!(config.logging_type, RotationMode::Hourly);
    }

    #[test]
    fn test_load_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "logging_type: daily\nfailure_policy: open\n").unwrap();

        let config = SinkConfig::load_or_default(&path).unwrap();
        assert_eq!(config.logging_type, RotationMode::Daily);
        assert_eq!(config.failure_policy, FailurePolicy::Open);
    }

    #[test]
    fn test_load_rejects_unknown_mode() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"logging_type": "weekly"}"#).unwrap();

        let err = SinkConfig::load_or_default(&path).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("weekly"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let mut config = SinkConfig::with_disk(temp_dir.path());
        config.logging_type = RotationMode::Daily;
        config.save(&path).unwrap();

        let loaded = SinkConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.logging_type, RotationMode::Daily);
        assert_eq!(loaded.disk, temp_dir.path());
    }
}
