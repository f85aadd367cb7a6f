//! File I/O utilities for audit files
//!
//! The first writer of a file is chosen by an exclusive create (`O_EXCL`),
//! so the header can only ever be written once. Every later writer falls
//! back to a plain append, after checking that its header matches the one
//! already in the file.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::Path;

use crate::error::{AuditSinkError, AuditSinkResult};

/// How a row reached the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created and received the header followed by the row
    Created,
    /// The file already existed and received only the row
    Appended,
}

/// Create `path` with `header` + `row`, or append `row` if it already exists
///
/// Missing parent directories are created first. Each branch issues a
/// single `write_all`. Appending fails with an I/O error when the file's
/// first line differs from `header`, so every row keeps the header's columns.
pub fn create_or_append<P: AsRef<Path>>(
    path: P,
    header: &[u8],
    row: &[u8],
) -> AuditSinkResult<WriteOutcome> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AuditSinkError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            let mut contents = Vec::with_capacity(header.len() + row.len());
            contents.extend_from_slice(header);
            contents.extend_from_slice(row);

            file.write_all(&contents).map_err(|e| {
                AuditSinkError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;
            file.flush().map_err(|e| {
                AuditSinkError::Io(format!("Failed to flush {}: {}", path.display(), e))
            })?;

            Ok(WriteOutcome::Created)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            append(path, header, row)?;
            Ok(WriteOutcome::Appended)
        }
        Err(e) => Err(AuditSinkError::Io(format!(
            "Failed to create {}: {}",
            path.display(),
            e
        ))),
    }
}

fn append(path: &Path, header: &[u8], row: &[u8]) -> AuditSinkResult<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| AuditSinkError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut existing = Vec::with_capacity(header.len());
    BufReader::new(&file)
        .read_until(b'\n', &mut existing)
        .map_err(|e| AuditSinkError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    if existing != header {
        return Err(AuditSinkError::Io(format!(
            "Column mismatch in {}: file header is {:?}, record header is {:?}",
            path.display(),
            String::from_utf8_lossy(&existing).trim_end(),
            String::from_utf8_lossy(header).trim_end()
        )));
    }

    file.write_all(row)
        .map_err(|e| AuditSinkError::Io(format!("Failed to append to {}: {}", path.display(), e)))?;

    file.flush()
        .map_err(|e| AuditSinkError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;

    Ok(())
}
