//! Error types for dimension generation.

use thiserror::Error;

/// Errors reported by dimension configuration checks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensionError {
    /// A configuration value is out of range.
    #[error("invalid dimension settings: {0}")]
    InvalidConfig(String),
}

/// Result type for dimension operations.
pub type Result<T> = std::result::Result<T, DimensionError>;
