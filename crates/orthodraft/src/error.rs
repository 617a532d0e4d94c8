//! Top-level error type for the drawing pipeline.

use orthodraft_dimension::DimensionError;
use orthodraft_drafting::DraftingError;
use thiserror::Error;

/// Errors returned by the drawing pipeline.
///
/// Geometry never fails; only configuration and the injected importer do.
#[derive(Error, Debug)]
pub enum DrawingError {
    /// A drawing-level setting is out of range.
    #[error("invalid drawing settings: {0}")]
    InvalidConfig(String),
    /// The TOML configuration could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
    /// The injected mesh importer failed.
    #[error("mesh import failed: {0}")]
    Import(String),
    /// A drafting setting is out of range.
    #[error(transparent)]
    Drafting(#[from] DraftingError),
    /// A dimension setting is out of range.
    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, DrawingError>;
