//! CLI command handlers
//!
//! Bridges the clap argument parsing with the audit sink.

pub mod audit;

pub use audit::{handle_audit_command, AuditCommands};
