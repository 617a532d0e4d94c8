//! Planar face clustering.
//!
//! Groups coplanar triangles into flat faces so that datum selection can
//! work with real surfaces instead of individual triangles. The result is
//! triangulation dependent: a face is whatever set of triangles agree on a
//! normal and a plane offset within tolerance.

use orthodraft_math::{Point3, Vec3};
use orthodraft_mesh::{Triangle3D, TriangleMesh};

use crate::config::DraftingConfig;

/// A cluster of coplanar triangles.
#[derive(Debug, Clone)]
pub struct PlanarFace {
    /// Unit normal of the first triangle in the cluster.
    pub normal: Vec3,
    /// Plane offset along `normal` (`normal · p` for points on the plane).
    pub offset: f64,
    /// Area-weighted centroid.
    pub centroid: Point3,
    /// Total clustered area.
    pub area: f64,
    /// Contributing triangle indices.
    pub triangles: Vec<u32>,
    /// Contributing vertex indices (sorted, unique).
    pub vertices: Vec<u32>,
}

impl PlanarFace {
    fn seed(tri: &Triangle3D, area: f64) -> Self {
        let centroid = tri.centroid();
        let mut vertices = tri.indices.to_vec();
        vertices.sort_unstable();
        vertices.dedup();
        Self {
            normal: tri.normal,
            offset: tri.normal.dot(&centroid.coords),
            centroid,
            area,
            triangles: vec![tri.index],
            vertices,
        }
    }

    /// Whether `tri` lies on this face's plane within tolerance.
    fn accepts(&self, tri: &Triangle3D, normal_tolerance: f64, offset_tolerance: f64) -> bool {
        if self.normal.dot(&tri.normal).abs() <= normal_tolerance {
            return false;
        }
        let offset = self.normal.dot(&tri.centroid().coords);
        (offset - self.offset).abs() <= offset_tolerance
    }

    fn absorb(&mut self, tri: &Triangle3D, area: f64) {
        let total = self.area + area;
        self.centroid = Point3::from(
            (self.centroid.coords * self.area + tri.centroid().coords * area) / total,
        );
        self.area = total;
        self.triangles.push(tri.index);
        for v in tri.indices {
            if let Err(pos) = self.vertices.binary_search(&v) {
                self.vertices.insert(pos, v);
            }
        }
    }
}

/// Cluster the triangles of `mesh` into planar faces.
///
/// A triangle joins the first existing cluster whose normal it nearly
/// parallels (`|n1 · n2| > coplanar_normal_tolerance`) and whose plane
/// offset it matches within `coplanar_offset_tolerance`; otherwise it
/// starts a new cluster. Degenerate triangles are ignored.
///
/// Every triangle is compared against every cluster, so this is quadratic
/// in the worst case.
pub fn cluster_planar_faces(mesh: &TriangleMesh, config: &DraftingConfig) -> Vec<PlanarFace> {
    // TODO: bucket clusters by quantized (normal, offset) to make large meshes near-linear.
    let mut faces: Vec<PlanarFace> = Vec::new();

    for tri in mesh.triangles() {
        let area = tri.area();
        if tri.is_degenerate() || area <= 0.0 {
            continue;
        }
        let target = faces.iter_mut().find(|f| {
            f.accepts(
                &tri,
                config.coplanar_normal_tolerance,
                config.coplanar_offset_tolerance,
            )
        });
        match target {
            Some(face) => face.absorb(&tri, area),
            None => faces.push(PlanarFace::seed(&tri, area)),
        }
    }

    tracing::debug!(
        triangles = mesh.num_triangles(),
        faces = faces.len(),
        "clustered planar faces"
    );

    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_box_has_six_faces() {
        let mesh = TriangleMesh::axis_aligned_box(Point3::origin(), Point3::new(50.0, 30.0, 20.0));
        let faces = cluster_planar_faces(&mesh, &DraftingConfig::default());
        assert_eq!(faces.len(), 6);
        for face in &faces {
            assert_eq!(face.triangles.len(), 2);
            assert_eq!(face.vertices.len(), 4);
        }
        let total: f64 = faces.iter().map(|f| f.area).sum();
        assert_abs_diff_eq!(total, 2.0 * (1500.0 + 1000.0 + 600.0), epsilon = 1e-6);
    }

    #[test]
    fn test_centroid_is_area_weighted() {
        let mesh = TriangleMesh::axis_aligned_box(Point3::origin(), Point3::new(50.0, 30.0, 20.0));
        let faces = cluster_planar_faces(&mesh, &DraftingConfig::default());
        let top = faces.iter().find(|f| f.normal.y > 0.9).unwrap();
        assert_abs_diff_eq!(top.centroid.x, 25.0, epsilon = 1e-6);
        assert_abs_diff_eq!(top.centroid.y, 30.0, epsilon = 1e-6);
        assert_abs_diff_eq!(top.centroid.z, 10.0, epsilon = 1e-6);
        assert_abs_diff_eq!(top.area, 1000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_parallel_planes_stay_separate() {
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        mesh.push_triangle(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(1.0, 0.0, 5.0),
            Point3::new(0.0, 1.0, 5.0),
        );
        let faces = cluster_planar_faces(&mesh, &DraftingConfig::default());
        assert_eq!(faces.len(), 2);
    }

    #[test]
    fn test_offset_tolerance_merges_near_planes() {
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        mesh.push_triangle(
            Point3::new(2.0, 0.0, 0.5),
            Point3::new(3.0, 0.0, 0.5),
            Point3::new(2.0, 1.0, 0.5),
        );
        let faces = cluster_planar_faces(&mesh, &DraftingConfig::default());
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].triangles, vec![0, 1]);
    }

    #[test]
    fn test_degenerate_and_empty() {
        assert!(cluster_planar_faces(&TriangleMesh::new(), &DraftingConfig::default()).is_empty());
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(cluster_planar_faces(&mesh, &DraftingConfig::default()).is_empty());
    }
}
