//! Flat-buffer triangle mesh and per-triangle accessors.

use orthodraft_math::{normalize_or_zero, Point3, Vec3};
use serde::{Deserialize, Serialize};

/// Triangle mesh as delivered by the import component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of vertex normals: `[nx0, ny0, nz0, ...]` (f32). May be empty.
    #[serde(default)]
    pub normals: Vec<f32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.num_triangles() == 0
    }

    /// Position of vertex `index`, or `None` if out of range.
    pub fn vertex(&self, index: u32) -> Option<Point3> {
        let i = index as usize * 3;
        let v = self.vertices.get(i..i + 3)?;
        Some(Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
    }

    /// Triangle `index` with positions resolved, or `None` when the triangle
    /// references a vertex outside the vertex buffer.
    pub fn triangle(&self, index: usize) -> Option<Triangle3D> {
        let ids = self.indices.get(index * 3..index * 3 + 3)?;
        let indices = [ids[0], ids[1], ids[2]];
        Some(Triangle3D::new(
            index as u32,
            indices,
            self.vertex(indices[0])?,
            self.vertex(indices[1])?,
            self.vertex(indices[2])?,
        ))
    }

    /// Iterate over all resolvable triangles.
    ///
    /// Triangles with out-of-range indices are skipped and logged.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle3D> + '_ {
        (0..self.num_triangles()).filter_map(move |i| {
            let tri = self.triangle(i);
            if tri.is_none() {
                tracing::warn!(triangle = i, "skipping triangle with out-of-range vertex index");
            }
            tri
        })
    }

    /// Append a triangle as three new (unshared) vertices.
    pub fn push_triangle(&mut self, a: Point3, b: Point3, c: Point3) {
        let base = self.num_vertices() as u32;
        for p in [a, b, c] {
            self.vertices
                .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Build an axis-aligned box between `min` and `max` with outward-facing
    /// triangles (12 triangles, 8 shared vertices).
    pub fn axis_aligned_box(min: Point3, max: Point3) -> Self {
        let corner = |x: bool, y: bool, z: bool| {
            [
                (if x { max.x } else { min.x }) as f32,
                (if y { max.y } else { min.y }) as f32,
                (if z { max.z } else { min.z }) as f32,
            ]
        };
        let corners = [
            corner(false, false, false),
            corner(true, false, false),
            corner(true, true, false),
            corner(false, true, false),
            corner(false, false, true),
            corner(true, false, true),
            corner(true, true, true),
            corner(false, true, true),
        ];

        #[rustfmt::skip]
        let indices: Vec<u32> = vec![
            0, 2, 1, 0, 3, 2,  // z = min
            4, 5, 6, 4, 6, 7,  // z = max
            0, 1, 5, 0, 5, 4,  // y = min
            2, 3, 7, 2, 7, 6,  // y = max
            0, 4, 7, 0, 7, 3,  // x = min
            1, 2, 6, 1, 6, 5,  // x = max
        ];

        Self {
            vertices: corners.iter().flatten().copied().collect(),
            indices,
            normals: Vec::new(),
        }
    }
}

/// A mesh triangle with resolved positions and a unit face normal.
#[derive(Debug, Clone, Copy)]
pub struct Triangle3D {
    /// Index of the triangle within its mesh.
    pub index: u32,
    /// Vertex indices into the mesh vertex buffer.
    pub indices: [u32; 3],
    /// First vertex.
    pub v0: Point3,
    /// Second vertex.
    pub v1: Point3,
    /// Third vertex.
    pub v2: Point3,
    /// Face normal from the winding order; zero for degenerate triangles.
    pub normal: Vec3,
}

impl Triangle3D {
    /// Create a triangle and compute its normal.
    pub fn new(index: u32, indices: [u32; 3], v0: Point3, v1: Point3, v2: Point3) -> Self {
        let normal = normalize_or_zero(&(v1 - v0).cross(&(v2 - v0)));
        Self {
            index,
            indices,
            v0,
            v1,
            v2,
            normal,
        }
    }

    /// Surface area.
    pub fn area(&self) -> f64 {
        0.5 * (self.v1 - self.v0).cross(&(self.v2 - self.v0)).norm()
    }

    /// Centroid of the triangle.
    pub fn centroid(&self) -> Point3 {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// The three edges as vertex position pairs, in winding order.
    pub fn edges(&self) -> [(Point3, Point3); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// Whether the triangle has (near) zero area.
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_counts() {
        let mesh = TriangleMesh::axis_aligned_box(Point3::origin(), Point3::new(2.0, 3.0, 4.0));
        assert_eq!(mesh.num_triangles(), 12);
        assert_eq!(mesh.num_vertices(), 8);
    }

    #[test]
    fn test_box_normals_point_outward() {
        let min = Point3::origin();
        let max = Point3::new(2.0, 3.0, 4.0);
        let center = Point3::new(1.0, 1.5, 2.0);
        let mesh = TriangleMesh::axis_aligned_box(min, max);
        for tri in mesh.triangles() {
            let outward = tri.centroid() - center;
            assert!(tri.normal.dot(&outward) > 0.0, "triangle {} faces inward", tri.index);
        }
    }

    #[test]
    fn test_box_total_area() {
        let mesh = TriangleMesh::axis_aligned_box(Point3::origin(), Point3::new(2.0, 3.0, 4.0));
        let area: f64 = mesh.triangles().map(|t| t.area()).sum();
        assert_relative_eq!(area, 2.0 * (6.0 + 8.0 + 12.0), epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_range_triangle_skipped() {
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        mesh.indices.extend_from_slice(&[0, 1, 99]);
        assert_eq!(mesh.num_triangles(), 2);
        assert!(mesh.triangle(1).is_none());
        assert_eq!(mesh.triangles().count(), 1);
    }

    #[test]
    fn test_degenerate_triangle_has_zero_normal() {
        let tri = Triangle3D::new(
            0,
            [0, 1, 2],
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(tri.is_degenerate());
        assert_eq!(tri.area(), 0.0);
    }

    #[test]
    fn test_triangle_normal() {
        let tri = Triangle3D::new(
            0,
            [0, 1, 2],
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!(tri.normal.z > 0.9);
    }
}
