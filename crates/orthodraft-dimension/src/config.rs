//! Tunable constants for candidate generation, placement, layout, and filtering.

use serde::{Deserialize, Serialize};

use crate::error::{DimensionError, Result};

/// Minimum gap (model units) between two edge levels for a step dimension.
pub const DEFAULT_STEP_THRESHOLD: f64 = 1.0;

/// Offset (drawing units) from the view outline to the first stacked dimension.
pub const DEFAULT_BASE_OFFSET: f64 = 10.0;

/// Distance (drawing units) between stacked dimensions.
pub const DEFAULT_STACK_DISTANCE: f64 = 10.0;

/// Minimum spacing (drawing units) between same-orientation dimensions.
pub const DEFAULT_MIN_SPACING: f64 = 8.0;

/// Allowed distance (drawing units) outside the view bounds before a penalty applies.
pub const DEFAULT_BOUNDS_MARGIN: f64 = 50.0;

/// Default per-view dimension cap.
pub const DEFAULT_MAX_PER_VIEW: usize = 8;

/// Settings for the candidate generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    /// Noise threshold for step dimensions.
    pub step_threshold: f64,
    /// Relative tolerance for an edge to count as axis-aligned.
    pub axis_tolerance: f64,
    /// Priority of overall dimensions.
    pub overall_priority: u32,
    /// Priority of the datum-reference placeholder.
    pub datum_priority: u32,
    /// Priority of hole diameters.
    pub hole_priority: u32,
    /// Priority of step dimensions.
    pub feature_priority: u32,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            step_threshold: DEFAULT_STEP_THRESHOLD,
            axis_tolerance: 1e-3,
            overall_priority: 100,
            datum_priority: 90,
            hole_priority: 70,
            feature_priority: 50,
        }
    }
}

impl CandidateConfig {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.step_threshold < 0.0 {
            return Err(DimensionError::InvalidConfig("step_threshold must be non-negative".into()));
        }
        if !(0.0..1.0).contains(&self.axis_tolerance) {
            return Err(DimensionError::InvalidConfig("axis_tolerance must be in [0, 1)".into()));
        }
        Ok(())
    }
}

/// Settings for initial stacked placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Offset from the view outline to the first row.
    pub base_offset: f64,
    /// Distance between rows.
    pub stack_distance: f64,
    /// Text height used for the layout footprint.
    pub text_height: f64,
    /// Approximate width of one label character.
    pub char_width: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            base_offset: DEFAULT_BASE_OFFSET,
            stack_distance: DEFAULT_STACK_DISTANCE,
            text_height: 3.5,
            char_width: 2.5,
        }
    }
}

impl PlacementConfig {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.base_offset < 0.0 {
            return Err(DimensionError::InvalidConfig("base_offset must be non-negative".into()));
        }
        if self.stack_distance <= 0.0 {
            return Err(DimensionError::InvalidConfig("stack_distance must be positive".into()));
        }
        if self.text_height <= 0.0 || self.char_width <= 0.0 {
            return Err(DimensionError::InvalidConfig("text size must be positive".into()));
        }
        Ok(())
    }
}

/// Settings for the simulated-annealing layout optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of full sweeps.
    pub sweeps: usize,
    /// Starting temperature.
    pub initial_temperature: f64,
    /// Geometric cooling factor per sweep.
    pub cooling: f64,
    /// Largest single move (drawing units).
    pub max_step: f64,
    /// Minimum spacing between same-orientation dimensions.
    pub min_spacing: f64,
    /// Free zone around the view bounds.
    pub bounds_margin: f64,
    /// Weight of pairwise footprint overlap area.
    pub overlap_weight: f64,
    /// Weight of under-minimum spacing.
    pub spacing_weight: f64,
    /// Weight of distance outside the bounds margin.
    pub bounds_weight: f64,
    /// Weight of deviation from the ideal stacked offset.
    pub ideal_weight: f64,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sweeps: 100,
            initial_temperature: 1.0,
            cooling: 0.95,
            max_step: 2.0,
            min_spacing: DEFAULT_MIN_SPACING,
            bounds_margin: DEFAULT_BOUNDS_MARGIN,
            overlap_weight: 100.0,
            spacing_weight: 20.0,
            bounds_weight: 200.0,
            ideal_weight: 0.5,
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.initial_temperature <= 0.0 {
            return Err(DimensionError::InvalidConfig("initial_temperature must be positive".into()));
        }
        if !(self.cooling > 0.0 && self.cooling < 1.0) {
            return Err(DimensionError::InvalidConfig("cooling must be in (0, 1)".into()));
        }
        if self.max_step <= 0.0 {
            return Err(DimensionError::InvalidConfig("max_step must be positive".into()));
        }
        if self.min_spacing < 0.0 || self.bounds_margin < 0.0 {
            return Err(DimensionError::InvalidConfig("spacing and margin must be non-negative".into()));
        }
        let weights = [
            self.overlap_weight,
            self.spacing_weight,
            self.bounds_weight,
            self.ideal_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DimensionError::InvalidConfig("energy weights must be finite and non-negative".into()));
        }
        Ok(())
    }
}

/// Settings for dedup and per-view capping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Maximum dimensions kept per view.
    pub max_per_view: usize,
    /// Decimal places of the dedup value key.
    pub value_decimals: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_per_view: DEFAULT_MAX_PER_VIEW,
            value_decimals: 1,
        }
    }
}

impl FilterConfig {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_per_view == 0 {
            return Err(DimensionError::InvalidConfig("max_per_view must be at least 1".into()));
        }
        if self.value_decimals > 9 {
            return Err(DimensionError::InvalidConfig("value_decimals must be at most 9".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(CandidateConfig::default().validate().is_ok());
        assert!(PlacementConfig::default().validate().is_ok());
        assert!(LayoutConfig::default().validate().is_ok());
        assert!(FilterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_cooling_out_of_range() {
        for cooling in [0.0, 1.0, 1.5] {
            let config = LayoutConfig {
                cooling,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = FilterConfig {
            max_per_view: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_per_view"));
    }

    #[test]
    fn test_default_stack_clears_min_spacing() {
        let placement = PlacementConfig::default();
        let layout = LayoutConfig::default();
        assert!(placement.stack_distance >= layout.min_spacing);
    }
}
