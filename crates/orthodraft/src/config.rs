//! Drawing configuration.
//!
//! Every stage has its own section; anything omitted falls back to the
//! stage defaults.
//!
//! ```toml
//! views = ["front", "top", "right"]
//! unit = "mm"
//!
//! [drafting]
//! crease_threshold = 0.9
//!
//! [layout]
//! sweeps = 200
//! seed = 42
//!
//! [filter]
//! max_per_view = 6
//! ```

use orthodraft_dimension::{CandidateConfig, FilterConfig, LayoutConfig, PlacementConfig, Unit};
use orthodraft_drafting::{DraftingConfig, ViewDirection};
use serde::{Deserialize, Serialize};

use crate::error::{DrawingError, Result};

/// Views drawn when none are requested.
pub const DEFAULT_VIEWS: [ViewDirection; 3] = [ViewDirection::Front, ViewDirection::Top, ViewDirection::Right];

/// Full pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Views to project, in output order.
    pub views: Vec<ViewDirection>,
    /// Unit stamped on every dimension.
    pub unit: Unit,
    /// Edge, projection and datum settings.
    pub drafting: DraftingConfig,
    /// Candidate generation settings.
    pub candidates: CandidateConfig,
    /// Initial placement settings.
    pub placement: PlacementConfig,
    /// Layout optimizer settings.
    pub layout: LayoutConfig,
    /// Dedup and cap settings.
    pub filter: FilterConfig,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            views: DEFAULT_VIEWS.to_vec(),
            unit: Unit::default(),
            drafting: DraftingConfig::default(),
            candidates: CandidateConfig::default(),
            placement: PlacementConfig::default(),
            layout: LayoutConfig::default(),
            filter: FilterConfig::default(),
        }
    }
}

impl DrawingConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| DrawingError::InvalidConfig(e.to_string()))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        if self.views.is_empty() {
            return Err(DrawingError::InvalidConfig("at least one view is required".into()));
        }
        for (i, view) in self.views.iter().enumerate() {
            if self.views[..i].contains(view) {
                return Err(DrawingError::InvalidConfig(format!("view {} requested twice", view)));
            }
        }
        self.drafting.validate()?;
        self.candidates.validate()?;
        self.placement.validate()?;
        self.layout.validate()?;
        self.filter.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DrawingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.views, DEFAULT_VIEWS.to_vec());
        assert_eq!(config.unit, Unit::Millimeter);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = DrawingConfig::from_toml_str(
            r#"
            views = ["front", "left"]
            unit = "in"

            [layout]
            seed = 42

            [filter]
            max_per_view = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.views, vec![ViewDirection::Front, ViewDirection::Left]);
        assert_eq!(config.unit, Unit::Inch);
        assert_eq!(config.layout.seed, Some(42));
        assert_eq!(config.layout.sweeps, LayoutConfig::default().sweeps);
        assert_eq!(config.filter.max_per_view, 6);
        assert_eq!(config.drafting.crease_threshold, 0.9);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = DrawingConfig::from_toml_str("").unwrap();
        assert_eq!(config.views.len(), 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            DrawingConfig::from_toml_str("views = []"),
            Err(DrawingError::InvalidConfig(_))
        ));
        assert!(matches!(
            DrawingConfig::from_toml_str("[layout]\ncooling = 1.5"),
            Err(DrawingError::Dimension(_))
        ));
        assert!(matches!(
            DrawingConfig::from_toml_str("[drafting]\nreference_size = -1.0"),
            Err(DrawingError::Drafting(_))
        ));
        assert!(matches!(
            DrawingConfig::from_toml_str("views = [\"front\", \"front\"]"),
            Err(DrawingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            DrawingConfig::from_toml_str("views = [\"isometric\"]"),
            Err(DrawingError::Config(_))
        ));
        assert!(matches!(
            DrawingConfig::from_toml_str("unit = 3"),
            Err(DrawingError::Config(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = DrawingConfig::default();
        config.layout.seed = Some(9);
        let text = config.to_toml_string().unwrap();
        let back = DrawingConfig::from_toml_str(&text).unwrap();
        assert_eq!(back.layout.seed, Some(9));
        assert_eq!(back.views, config.views);
    }
}
