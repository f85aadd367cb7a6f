//! Export module for the audit sink
//!
//! - CSV: header derivation and row encoding for audit files

pub mod csv;

pub use self::csv::{encode_header, encode_row, header_title};
