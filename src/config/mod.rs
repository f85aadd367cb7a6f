//! Configuration module for the audit sink
//!
//! - Platform path resolution for the storage root and config file
//! - The explicit `SinkConfig` passed to the sink's constructor

pub mod paths;
pub mod settings;

pub use paths::SinkPaths;
pub use settings::{FailurePolicy, RotationMode, SinkConfig};
