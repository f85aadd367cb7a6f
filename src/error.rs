//! Error types for the audit sink
//!
//! The sink only distinguishes two failure kinds: bad configuration, which is
//! fatal when the sink is built, and storage I/O, which is handed straight
//! back to the caller.

use thiserror::Error;

/// The main error type for audit sink operations
#[derive(Error, Debug)]
pub enum AuditSinkError {
    /// Configuration-related errors (unknown rotation mode, unreadable config)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure creating, opening, encoding or writing an audit file
    #[error("I/O error: {0}")]
    Io(String),
}

impl AuditSinkError {
    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<std::io::Error> for AuditSinkError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for AuditSinkError {
    fn from(err: csv::Error) -> Self {
        Self::Io(format!("Failed to encode audit row: {}", err))
    }
}

/// Result type alias for audit sink operations
pub type AuditSinkResult<T> = Result<T, AuditSinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuditSinkError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
        assert!(err.is_config());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let sink_err: AuditSinkError = io_err.into();
        assert!(sink_err.is_io());
        assert_eq!(sink_err.to_string(), "I/O error: denied");
    }
}
