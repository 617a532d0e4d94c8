//! Initial stacked placement of dimension candidates.
//!
//! Horizontal dimensions stack downward from the bottom of the view,
//! vertical dimensions stack rightward from its right side. Rows are
//! assigned in priority order so the most important dimensions sit
//! closest to the part.

use orthodraft_drafting::{BoundingBox2D, ProjectedView};

use crate::config::PlacementConfig;
use crate::types::{
    CandidateKind, Dimension, DimensionCandidate, DimensionPosition, DimensionType, Orientation, Unit,
};

/// Screen coordinate of stacking row `row` for one orientation.
///
/// Horizontal rows are Y values below `bounds`; vertical rows are X values
/// to the right of it. `bounds` are in drawing units.
pub fn stack_coordinate(bounds: &BoundingBox2D, orientation: Orientation, row: usize, config: &PlacementConfig) -> f64 {
    let offset = config.base_offset + row as f64 * config.stack_distance;
    match orientation {
        Orientation::Horizontal => bounds.min_y - offset,
        Orientation::Vertical => bounds.max_x + offset,
    }
}

fn dimension_type(kind: CandidateKind) -> DimensionType {
    match kind {
        CandidateKind::Hole => DimensionType::Diameter,
        _ => DimensionType::Linear,
    }
}

/// Place candidates for one view, producing dimensions in drawing units.
///
/// Candidates are ranked by priority (stable for ties). Datum-reference
/// candidates are rendered as symbols and never placed. Ids follow
/// `{view}-dim-{n}` starting at 1.
pub fn place_dimensions(
    candidates: &[DimensionCandidate],
    view: &ProjectedView,
    unit: Unit,
    config: &PlacementConfig,
) -> Vec<Dimension> {
    let mut ranked: Vec<&DimensionCandidate> = candidates
        .iter()
        .filter(|c| c.kind != CandidateKind::DatumReference)
        .collect();
    ranked.sort_by(|a, b| b.priority.cmp(&a.priority));

    let bounds = view.scaled_bounds();
    let mut rows = [0usize; 2];
    let mut placed = Vec::with_capacity(ranked.len());

    for (n, candidate) in ranked.into_iter().enumerate() {
        let anchor = candidate.anchor.scaled(view.scale);
        let slot = match candidate.orientation {
            Orientation::Horizontal => 0,
            Orientation::Vertical => 1,
        };
        let at = stack_coordinate(&bounds, candidate.orientation, rows[slot], config);
        rows[slot] += 1;

        let line = match candidate.orientation {
            Orientation::Horizontal => anchor.translated(0.0, at - anchor.midpoint().y),
            Orientation::Vertical => anchor.translated(at - anchor.midpoint().x, 0.0),
        };
        let dim_type = dimension_type(candidate.kind);
        placed.push(Dimension {
            id: format!("{}-dim-{}", view.view.name(), n + 1),
            dim_type,
            value: candidate.value,
            tolerance: None,
            unit,
            view: view.view,
            position: DimensionPosition {
                anchor,
                line,
                text: Some(line.midpoint()),
            },
            label: Dimension::format_label(dim_type, candidate.value, unit),
            critical: candidate.critical,
        });
    }

    tracing::debug!(
        view = %view.view,
        horizontal = rows[0],
        vertical = rows[1],
        "placed dimensions"
    );

    placed
}
