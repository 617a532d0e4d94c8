//! Axis-aligned 3D bounding box.

use orthodraft_math::Point3;
use serde::{Deserialize, Serialize};

use crate::mesh::TriangleMesh;

/// A model-space coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X axis (width).
    X,
    /// Y axis (height; model space is Y-up).
    Y,
    /// Z axis (depth).
    Z,
}

/// Axis-aligned bounding box of a part, with derived extents.
///
/// The default is the degenerate box at the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3 {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
}

impl BoundingBox3 {
    /// Create a bounding box from two corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self {
            min: [min.x, min.y, min.z],
            max: [max.x, max.y, max.z],
        }
    }

    /// Bounding box of every vertex in `mesh`, or `None` for an empty mesh.
    pub fn from_mesh(mesh: &TriangleMesh) -> Option<Self> {
        if mesh.vertices.len() < 3 {
            return None;
        }
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for v in mesh.vertices.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis] as f64);
                max[axis] = max[axis].max(v[axis] as f64);
            }
        }
        Some(Self { min, max })
    }

    /// Extent along `axis`.
    pub fn extent(&self, axis: Axis) -> f64 {
        let i = axis as usize;
        self.max[i] - self.min[i]
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.extent(Axis::X)
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.extent(Axis::Y)
    }

    /// Extent along Z.
    pub fn depth(&self) -> f64 {
        self.extent(Axis::Z)
    }

    /// Largest of the three extents.
    pub fn max_extent(&self) -> f64 {
        self.width().max(self.height()).max(self.depth())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extents() {
        let bb = BoundingBox3::new(Point3::new(-10.0, 0.0, 5.0), Point3::new(40.0, 30.0, 25.0));
        assert_relative_eq!(bb.width(), 50.0);
        assert_relative_eq!(bb.height(), 30.0);
        assert_relative_eq!(bb.depth(), 20.0);
        assert_relative_eq!(bb.max_extent(), 50.0);
    }

    #[test]
    fn test_from_mesh() {
        let mesh =
            TriangleMesh::axis_aligned_box(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 8.0, 5.0));
        let bb = BoundingBox3::from_mesh(&mesh).unwrap();
        assert_eq!(bb.min, [1.0, 2.0, 3.0]);
        assert_eq!(bb.max, [4.0, 8.0, 5.0]);
    }

    #[test]
    fn test_from_empty_mesh() {
        assert!(BoundingBox3::from_mesh(&TriangleMesh::new()).is_none());
    }
}
