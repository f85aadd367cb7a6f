//! Storage layer for the audit sink
//!
//! Exclusive-create / append file writes with lazy directory creation.

pub mod file_io;

pub use file_io::{create_or_append, WriteOutcome};
