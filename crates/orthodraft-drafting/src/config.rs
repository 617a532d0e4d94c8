//! Tunable thresholds for edge classification, projection, and face clustering.

use serde::{Deserialize, Serialize};

use crate::error::{DraftingError, Result};

/// Decimal places used when keying edge endpoints.
pub const DEFAULT_KEY_PRECISION: u32 = 6;

/// Face-normal dot product below which a shared edge is a real crease (~25°).
pub const DEFAULT_CREASE_THRESHOLD: f64 = 0.9;

/// A face faces the viewer when `normal · toward_viewer` exceeds this.
pub const DEFAULT_FACING_EPSILON: f64 = 1e-9;

/// Minimum `|n1 · n2|` for a triangle to join a planar cluster.
pub const DEFAULT_COPLANAR_NORMAL_TOLERANCE: f64 = 0.98;

/// Maximum plane offset difference (model units) for a triangle to join a planar cluster.
pub const DEFAULT_COPLANAR_OFFSET_TOLERANCE: f64 = 1.0;

/// Maximum `|n1 · n2|` for two datum planes to count as perpendicular.
pub const DEFAULT_DATUM_PERPENDICULAR_TOLERANCE: f64 = 0.1;

/// Drawing size the longer view extent is scaled to.
pub const DEFAULT_REFERENCE_SIZE: f64 = 100.0;

/// Projected edges shorter than this (model units) are dropped.
pub const DEFAULT_DEGENERATE_EDGE_LENGTH: f64 = 1e-6;

/// Settings for the drafting stages of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftingConfig {
    /// Decimal places used to merge coincident edge endpoints.
    pub key_precision: u32,
    /// Crease threshold on the dot product of adjacent face normals.
    pub crease_threshold: f64,
    /// Facing test epsilon.
    pub facing_epsilon: f64,
    /// Planar clustering normal tolerance.
    pub coplanar_normal_tolerance: f64,
    /// Planar clustering offset tolerance.
    pub coplanar_offset_tolerance: f64,
    /// Datum perpendicularity tolerance.
    pub datum_perpendicular_tolerance: f64,
    /// Reference drawing size for the display scale.
    pub reference_size: f64,
    /// Degenerate projected edge length.
    pub degenerate_edge_length: f64,
    /// Minimum polyline segments before a chain is considered for circle fitting.
    pub min_circle_segments: usize,
    /// Maximum radial deviation, as a fraction of the radius, for a circle fit.
    pub circle_fit_tolerance: f64,
    /// Minimum swept angle (degrees) for an open chain to be reported as an arc.
    pub min_arc_degrees: f64,
}

impl Default for DraftingConfig {
    fn default() -> Self {
        Self {
            key_precision: DEFAULT_KEY_PRECISION,
            crease_threshold: DEFAULT_CREASE_THRESHOLD,
            facing_epsilon: DEFAULT_FACING_EPSILON,
            coplanar_normal_tolerance: DEFAULT_COPLANAR_NORMAL_TOLERANCE,
            coplanar_offset_tolerance: DEFAULT_COPLANAR_OFFSET_TOLERANCE,
            datum_perpendicular_tolerance: DEFAULT_DATUM_PERPENDICULAR_TOLERANCE,
            reference_size: DEFAULT_REFERENCE_SIZE,
            degenerate_edge_length: DEFAULT_DEGENERATE_EDGE_LENGTH,
            min_circle_segments: 6,
            circle_fit_tolerance: 0.02,
            min_arc_degrees: 90.0,
        }
    }
}

impl DraftingConfig {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.key_precision > 12 {
            return Err(DraftingError::InvalidConfig("key_precision must be at most 12".into()));
        }
        if !(-1.0..=1.0).contains(&self.crease_threshold) {
            return Err(DraftingError::InvalidConfig("crease_threshold must be in [-1, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.coplanar_normal_tolerance) {
            return Err(DraftingError::InvalidConfig("coplanar_normal_tolerance must be in [0, 1]".into()));
        }
        if self.coplanar_offset_tolerance < 0.0 {
            return Err(DraftingError::InvalidConfig("coplanar_offset_tolerance must be non-negative".into()));
        }
        if !(0.0..=1.0).contains(&self.datum_perpendicular_tolerance) {
            return Err(DraftingError::InvalidConfig("datum_perpendicular_tolerance must be in [0, 1]".into()));
        }
        if self.reference_size <= 0.0 {
            return Err(DraftingError::InvalidConfig("reference_size must be positive".into()));
        }
        if self.min_circle_segments < 3 {
            return Err(DraftingError::InvalidConfig("min_circle_segments must be at least 3".into()));
        }
        if self.circle_fit_tolerance <= 0.0 {
            return Err(DraftingError::InvalidConfig("circle_fit_tolerance must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_check() {
        assert!(DraftingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bad_reference_size() {
        let config = DraftingConfig {
            reference_size: 0.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("reference_size"));
    }
}
