//! Filesystem audit driver
//!
//! `FilesystemSink` is the driver the host framework calls on every audited
//! change. It resolves the active file, writes one CSV row and hands back an
//! opaque receipt.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, error, info};
use uuid::Uuid;

use super::record::{AuditRecord, Auditable};
use super::rotation::RotatingPathResolver;
use crate::config::{FailurePolicy, SinkConfig};
use crate::error::AuditSinkResult;
use crate::export::csv::{encode_header, encode_row};
use crate::storage::file_io::{create_or_append, WriteOutcome};

/// Result contract required by the host framework
pub trait AuditOutcome {
    /// Identifier of this result object
    fn id(&self) -> Uuid;
}

/// Opaque success token returned by [`AuditDriver::audit`]
///
/// Carries nothing about the write itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditReceipt {
    id: Uuid,
}

impl AuditReceipt {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }
}

impl Default for AuditReceipt {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditOutcome for AuditReceipt {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Interface the host framework drives
pub trait AuditDriver {
    type Receipt: AuditOutcome;

    /// Persist one change event
    fn audit(&self, entity: &dyn Auditable) -> AuditSinkResult<Self::Receipt>;

    /// Remove old audit data for `entity`, returning whether anything was removed
    fn prune(&self, entity: &dyn Auditable) -> bool;
}

/// Audit driver writing rotating CSV files under a storage root
///
/// Writes through one sink are serialized. Separate processes sharing a
/// file are not coordinated: one may append a row between another's
/// exclusive create and its header write.
#[derive(Debug)]
pub struct FilesystemSink {
    root: PathBuf,
    resolver: RotatingPathResolver,
    failure_policy: FailurePolicy,
    write_lock: Mutex<()>,
}

impl FilesystemSink {
    /// Create a sink from an already-validated configuration
    pub fn new(config: SinkConfig) -> Self {
        info!(
            root = %config.disk.display(),
            logging_type = %config.logging_type,
            failure_policy = ?config.failure_policy,
            "audit sink initialized"
        );

        Self {
            resolver: RotatingPathResolver::from_config(&config),
            failure_policy: config.failure_policy,
            root: config.disk,
            write_lock: Mutex::new(()),
        }
    }

    /// The file the next write would go to
    pub fn current_path(&self) -> PathBuf {
        self.path_at(now())
    }

    /// The file active at `now`
    pub fn path_at(&self, now: NaiveDateTime) -> PathBuf {
        let relative = self.resolver.resolve(now);
        self.root.join(relative.trim_start_matches('/'))
    }

    /// Audit `entity` as if the current time were `now`
    pub fn audit_at(
        &self,
        entity: &dyn Auditable,
        now: NaiveDateTime,
    ) -> AuditSinkResult<AuditReceipt> {
        let record = AuditRecord::from_auditable(entity, now);

        match self.write_record(&record, now) {
            Ok(_) => Ok(AuditReceipt::new()),
            Err(e) => match self.failure_policy {
                FailurePolicy::Closed => Err(e),
                FailurePolicy::Open => {
                    error!(error = %e, "audit write failed, continuing");
                    Ok(AuditReceipt::new())
                }
            },
        }
    }

    /// Write one record to the file active at `now`
    pub fn write_record(
        &self,
        record: &AuditRecord,
        now: NaiveDateTime,
    ) -> AuditSinkResult<WriteOutcome> {
        let record = record.clone().sanitized();
        let header = encode_header(&record)?;
        let row = encode_row(&record)?;

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let path = self.path_at(now);
        let outcome = create_or_append(&path, &header, &row)?;
        let header_written = outcome == WriteOutcome::Created;

        debug!(
            path = %path.display(),
            header_written,
            "audit row written"
        );

        Ok(outcome)
    }
}

impl AuditDriver for FilesystemSink {
    type Receipt = AuditReceipt;

    fn audit(&self, entity: &dyn Auditable) -> AuditSinkResult<AuditReceipt> {
        self.audit_at(entity, now())
    }

    fn prune(&self, _entity: &dyn Auditable) -> bool {
        false
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
