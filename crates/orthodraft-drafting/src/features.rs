//! Coarse feature summary reported alongside a drawing.

use orthodraft_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::DraftingConfig;
use crate::planar::PlanarFace;
use crate::types::{CircleKind, MeshEdge, ProjectedView};

/// What kind of part this looks like, inferred from the edge graph, the
/// planar faces and the detected circles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSummary {
    /// At least one hole was detected in some view.
    pub has_holes: bool,
    /// At least one partial arc was detected in some view.
    pub has_fillets: bool,
    /// At least one crease is neither square nor flat.
    pub has_chamfers: bool,
    /// Largest number of holes seen in a single view.
    pub hole_count: usize,
    /// Number of planar faces.
    pub surface_count: usize,
}

/// Whether a two-triangle edge is an oblique crease.
///
/// The face normals must turn by more than the crease threshold, without
/// being perpendicular (within `datum_perpendicular_tolerance`) or parallel
/// (within `coplanar_normal_tolerance`).
fn is_oblique_crease(edge: &MeshEdge, normals: &[Vec3], config: &DraftingConfig) -> bool {
    let &[t0, t1] = edge.triangles.as_slice() else {
        return false;
    };
    let (Some(n0), Some(n1)) = (normals.get(t0 as usize), normals.get(t1 as usize)) else {
        return false;
    };
    if n0.norm_squared() == 0.0 || n1.norm_squared() == 0.0 {
        return false;
    }
    let dot = n0.dot(n1);
    dot < config.crease_threshold
        && dot.abs() > config.datum_perpendicular_tolerance
        && dot.abs() < config.coplanar_normal_tolerance
}

/// Summarize the features of a part.
///
/// A through hole shows up as a circle in more than one view direction, so
/// holes are counted per view and the largest count is reported.
pub fn summarize_features<'a>(
    edges: &[MeshEdge],
    normals: &[Vec3],
    faces: &[PlanarFace],
    views: impl IntoIterator<Item = &'a ProjectedView>,
    config: &DraftingConfig,
) -> FeatureSummary {
    let mut hole_count = 0;
    let mut has_fillets = false;
    for view in views {
        let holes = view.circles.iter().filter(|c| c.kind == CircleKind::Hole).count();
        hole_count = hole_count.max(holes);
        has_fillets |= view.circles.iter().any(|c| c.kind == CircleKind::Arc);
    }

    let chamfers = edges.iter().filter(|e| is_oblique_crease(e, normals, config)).count();

    tracing::debug!(hole_count, has_fillets, chamfers, surfaces = faces.len(), "summarized features");

    FeatureSummary {
        has_holes: hole_count > 0,
        has_fillets,
        has_chamfers: chamfers > 0,
        hole_count,
        surface_count: faces.len(),
    }
}
