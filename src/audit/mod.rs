//! Audit trail driver
//!
//! Persists model change events as rows in rotating CSV files.
//!
//! # Architecture
//!
//! - `Auditable` / `AuditChange`: the change delta supplied by the host.
//! - `AuditRecord`: the ordered field map that becomes one row, with a
//!   generated `created_at` column.
//! - `RotatingPathResolver`: picks the active file for `single`, `daily` or
//!   `hourly` rotation.
//! - `FilesystemSink`: the `AuditDriver` the host calls on every change.
//!
//! # Example
//!
//! ```rust,ignore
//! use audit_sink::audit::{AuditChange, AuditDriver, FilesystemSink};
//! use audit_sink::config::SinkConfig;
//!
//! let sink = FilesystemSink::new(SinkConfig::with_disk("/var/lib/audit"));
//! let receipt = sink.audit(&AuditChange::new(old_values, new_values))?;
//! ```

mod record;
pub mod rotation;
mod sink;

pub use record::{
    AuditChange, AuditRecord, Auditable, CREATED_AT, CREATED_AT_FORMAT, NEW_VALUES, OLD_VALUES,
};
pub use rotation::{resolve, RotatingPathResolver};
pub use sink::{AuditDriver, AuditOutcome, AuditReceipt, FilesystemSink};
