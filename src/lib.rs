//! audit-sink - rotating CSV audit trail driver
//!
//! Given a record describing a change to some tracked entity, the sink
//! writes it as one row of a comma-separated file. The file name follows a
//! rotation policy: one file forever, one per day, or one per hour.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `audit`: Audit records, path rotation and the filesystem driver
//! - `export`: CSV encoding
//! - `storage`: Exclusive-create / append file writes
//! - `cli`: Command handlers for the `audit-sink` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use audit_sink::config::{SinkConfig, SinkPaths};
//! use audit_sink::audit::FilesystemSink;
//!
//! let paths = SinkPaths::new();
//! let config = SinkConfig::load_or_default(&paths.config_file())?;
//! let sink = FilesystemSink::new(config);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod storage;

pub use error::{AuditSinkError, AuditSinkResult};
