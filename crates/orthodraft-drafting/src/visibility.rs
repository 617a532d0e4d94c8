//! View-dependent edge classification.
//!
//! Distinguishes outline and crease lines from triangulation noise the way a
//! line drawing does:
//!
//! - one adjacent face: silhouette (free boundary, always drawn)
//! - more than two adjacent faces: internal (non-manifold seam, suppressed)
//! - two faces, one toward and one away from the viewer: silhouette
//! - two faces meeting at a crease: visible if both face the viewer, hidden
//!   if both face away
//! - otherwise (smooth, co-facing): internal

use orthodraft_math::Vec3;

use crate::config::DraftingConfig;
use crate::types::{EdgeClass, MeshEdge};

/// Thresholds used by the classifier.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyParams {
    /// Face-normal dot product below which the edge is a crease.
    pub crease_threshold: f64,
    /// Facing test epsilon; faces exactly edge-on count as facing away.
    pub facing_epsilon: f64,
}

impl From<&DraftingConfig> for ClassifyParams {
    fn from(config: &DraftingConfig) -> Self {
        Self {
            crease_threshold: config.crease_threshold,
            facing_epsilon: config.facing_epsilon,
        }
    }
}

impl Default for ClassifyParams {
    fn default() -> Self {
        Self::from(&DraftingConfig::default())
    }
}

/// Classify an edge from the normals of its adjacent faces.
///
/// `toward_viewer` points from the model to the viewer. The result does not
/// depend on the order of `normals`.
pub fn classify_faces(normals: &[Vec3], toward_viewer: &Vec3, params: &ClassifyParams) -> EdgeClass {
    match normals {
        [] => EdgeClass::Internal,
        [_] => EdgeClass::Silhouette,
        [n1, n2] => {
            let facing1 = n1.dot(toward_viewer) > params.facing_epsilon;
            let facing2 = n2.dot(toward_viewer) > params.facing_epsilon;
            if facing1 != facing2 {
                EdgeClass::Silhouette
            } else if n1.dot(n2) < params.crease_threshold {
                if facing1 {
                    EdgeClass::Visible
                } else {
                    EdgeClass::Hidden
                }
            } else {
                EdgeClass::Internal
            }
        }
        _ => EdgeClass::Internal,
    }
}

/// Classify a mesh edge for one view direction.
///
/// `face_normals` is indexed by triangle index (see
/// [`face_normals`](crate::edge_extract::face_normals)). Adjacent triangles
/// outside that table are ignored.
pub fn classify_edge(
    edge: &MeshEdge,
    face_normals: &[Vec3],
    toward_viewer: &Vec3,
    params: &ClassifyParams,
) -> EdgeClass {
    if edge.triangles.len() > 2 {
        return EdgeClass::Internal;
    }
    let normals: Vec<Vec3> = edge
        .triangles
        .iter()
        .filter_map(|&t| face_normals.get(t as usize).copied())
        .collect();
    classify_faces(&normals, toward_viewer, params)
}
