//! Datum reference frame selection.
//!
//! Picks up to three mutually perpendicular planar faces following the
//! primary/secondary/tertiary convention: A is the largest face, B the
//! largest face perpendicular to A, C the largest face perpendicular to
//! both. Missing B or C is a degraded result, not an error.

use orthodraft_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::planar::PlanarFace;

/// Which slot of the datum reference frame a datum fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatumSlot {
    /// Datum A.
    Primary,
    /// Datum B.
    Secondary,
    /// Datum C.
    Tertiary,
}

impl DatumSlot {
    /// Drawing letter for the datum symbol.
    pub fn letter(&self) -> char {
        match self {
            DatumSlot::Primary => 'A',
            DatumSlot::Secondary => 'B',
            DatumSlot::Tertiary => 'C',
        }
    }
}

/// A selected reference datum.
///
/// Uses array representation for serialization compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatumFeature {
    /// Frame slot.
    pub slot: DatumSlot,
    /// Unit surface normal [x, y, z].
    pub normal: [f64; 3],
    /// Area-weighted centroid [x, y, z].
    pub centroid: [f64; 3],
    /// Total clustered area.
    pub area: f64,
    /// Contributing vertex indices.
    pub vertices: Vec<u32>,
}

impl DatumFeature {
    fn from_face(slot: DatumSlot, face: &PlanarFace) -> Self {
        Self {
            slot,
            normal: [face.normal.x, face.normal.y, face.normal.z],
            centroid: [face.centroid.x, face.centroid.y, face.centroid.z],
            area: face.area,
            vertices: face.vertices.clone(),
        }
    }

    /// Get normal as Vec3.
    pub fn normal_vec(&self) -> Vec3 {
        Vec3::new(self.normal[0], self.normal[1], self.normal[2])
    }

    /// Get centroid as Point3.
    pub fn centroid_point(&self) -> Point3 {
        Point3::new(self.centroid[0], self.centroid[1], self.centroid[2])
    }
}

/// Select the datum reference frame from clustered planar faces.
///
/// Two faces count as perpendicular when `|n1 · n2| < perpendicular_tolerance`.
/// Ties in area keep the clustering order.
pub fn select_datums(faces: &[PlanarFace], perpendicular_tolerance: f64) -> Vec<DatumFeature> {
    let mut order: Vec<&PlanarFace> = faces.iter().filter(|f| f.area > 0.0).collect();
    order.sort_by(|a, b| b.area.total_cmp(&a.area));

    let perpendicular = |a: &PlanarFace, b: &PlanarFace| a.normal.dot(&b.normal).abs() < perpendicular_tolerance;

    let Some((&primary, rest)) = order.split_first() else {
        return Vec::new();
    };
    let mut datums = vec![DatumFeature::from_face(DatumSlot::Primary, primary)];

    let secondary = rest.iter().position(|f| perpendicular(f, primary));
    if let Some(b_idx) = secondary {
        let b = rest[b_idx];
        datums.push(DatumFeature::from_face(DatumSlot::Secondary, b));

        let tertiary = rest
            .iter()
            .enumerate()
            .find(|&(i, f)| i != b_idx && perpendicular(f, primary) && perpendicular(f, b));
        if let Some((_, c)) = tertiary {
            datums.push(DatumFeature::from_face(DatumSlot::Tertiary, c));
        }
    }

    tracing::debug!(
        candidates = order.len(),
        datums = datums.len(),
        "selected datum reference frame"
    );

    datums
}
