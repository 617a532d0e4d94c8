//! Applying externally supplied corrections to finished dimensions.

use orthodraft_drafting::Point2D;
use serde::{Deserialize, Serialize};

use crate::types::{Dimension, DimensionTolerance};

/// What to do with the targeted dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CorrectionAction {
    /// Replace the value and refresh the label.
    UpdateValue {
        /// New value in model units.
        value: f64,
    },
    /// Move the text anchor; the dimension line follows, the anchor stays.
    Reposition {
        /// New text position in drawing units.
        position: Point2D,
    },
    /// Replace (or clear) the tolerance band.
    UpdateTolerance {
        /// New tolerance, `None` to clear.
        tolerance: Option<DimensionTolerance>,
    },
    /// Delete the dimension.
    Remove,
}

/// A correction addressed to one dimension by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// Target dimension id.
    pub id: String,
    /// Action to apply.
    #[serde(flatten)]
    pub action: CorrectionAction,
}

/// Outcome of [`apply_corrections`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectionReport {
    /// Ids of corrections that were applied, in order.
    pub applied: Vec<String>,
    /// Ids that matched no dimension.
    pub unknown: Vec<String>,
    /// Ids whose correction carried an invalid value.
    pub rejected: Vec<String>,
}

impl CorrectionReport {
    /// Whether every correction was applied.
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty() && self.rejected.is_empty()
    }
}

fn apply_one(dim: &mut Dimension, action: &CorrectionAction) -> bool {
    match action {
        CorrectionAction::UpdateValue { value } => {
            if !value.is_finite() || *value < 0.0 {
                return false;
            }
            dim.value = *value;
            dim.label = Dimension::format_label(dim.dim_type, *value, dim.unit);
        }
        CorrectionAction::Reposition { position } => {
            if !position.x.is_finite() || !position.y.is_finite() {
                return false;
            }
            let current = dim.position.text_anchor();
            if dim.position.text.is_none() {
                dim.position.text = Some(current);
            }
            dim.position.shift(position.x - current.x, position.y - current.y);
        }
        CorrectionAction::UpdateTolerance { tolerance } => {
            if tolerance.is_some_and(|t| !t.is_valid()) {
                return false;
            }
            dim.tolerance = *tolerance;
        }
        CorrectionAction::Remove => {}
    }
    true
}

/// Apply corrections in order, in place.
///
/// Unknown ids and invalid values are reported, never fatal. A later
/// correction for an id removed earlier counts as unknown.
pub fn apply_corrections(dims: &mut Vec<Dimension>, corrections: &[Correction]) -> CorrectionReport {
    let mut report = CorrectionReport::default();

    for correction in corrections {
        let Some(index) = dims.iter().position(|d| d.id == correction.id) else {
            tracing::warn!(id = %correction.id, "correction for unknown dimension");
            report.unknown.push(correction.id.clone());
            continue;
        };
        if correction.action == CorrectionAction::Remove {
            dims.remove(index);
            report.applied.push(correction.id.clone());
        } else if apply_one(&mut dims[index], &correction.action) {
            report.applied.push(correction.id.clone());
        } else {
            tracing::warn!(id = %correction.id, "rejected invalid correction");
            report.rejected.push(correction.id.clone());
        }
    }

    tracing::debug!(
        applied = report.applied.len(),
        unknown = report.unknown.len(),
        rejected = report.rejected.len(),
        "applied corrections"
    );

    report
}
