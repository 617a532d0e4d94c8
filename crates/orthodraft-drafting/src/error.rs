//! Error types for the drafting stages.

use thiserror::Error;

/// Errors reported by drafting configuration checks.
///
/// The geometric stages themselves never fail; degenerate input yields
/// empty results instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftingError {
    /// A configuration value is out of range.
    #[error("invalid drafting settings: {0}")]
    InvalidConfig(String),
}

/// Result type for drafting operations.
pub type Result<T> = std::result::Result<T, DraftingError>;
