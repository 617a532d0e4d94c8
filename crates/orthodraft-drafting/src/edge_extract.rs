//! Edge graph reconstruction from a triangle soup.
//!
//! Edges are keyed by their rounded endpoint coordinates rather than by
//! vertex index, so triangles that share a geometric edge merge into one
//! logical edge even when the import produced unshared index buffers.

use std::collections::HashMap;

use orthodraft_math::{quantize_point, Vec3};
use orthodraft_mesh::TriangleMesh;

use crate::types::MeshEdge;

type PointKey = (i64, i64, i64);

/// Canonical key for an undirected edge: smaller endpoint key first.
fn edge_key(a: PointKey, b: PointKey) -> (PointKey, PointKey) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Build the edge list of `mesh` with triangle adjacency.
///
/// `key_precision` is the number of decimal places endpoints are rounded to
/// before comparison. Edges come out in first-seen order. Zero-length edges
/// (both endpoints rounding to the same key) are skipped. An empty mesh
/// yields an empty list.
pub fn extract_edges(mesh: &TriangleMesh, key_precision: u32) -> Vec<MeshEdge> {
    let mut lookup: HashMap<(PointKey, PointKey), usize> = HashMap::new();
    let mut edges: Vec<MeshEdge> = Vec::new();

    for tri in mesh.triangles() {
        for (p0, p1) in tri.edges() {
            let k0 = quantize_point(&p0, key_precision);
            let k1 = quantize_point(&p1, key_precision);
            if k0 == k1 {
                continue;
            }
            let key = edge_key(k0, k1);
            match lookup.get(&key) {
                Some(&idx) => {
                    let adjacent = &mut edges[idx].triangles;
                    if !adjacent.contains(&tri.index) {
                        adjacent.push(tri.index);
                    }
                }
                None => {
                    let (start, end) = if k0 <= k1 { (p0, p1) } else { (p1, p0) };
                    lookup.insert(key, edges.len());
                    edges.push(MeshEdge {
                        start,
                        end,
                        triangles: vec![tri.index],
                    });
                }
            }
        }
    }

    let non_manifold = edges.iter().filter(|e| e.is_non_manifold()).count();
    tracing::debug!(
        triangles = mesh.num_triangles(),
        edges = edges.len(),
        non_manifold,
        "extracted edge graph"
    );

    edges
}

/// Unit normal of every triangle, indexed by triangle index.
///
/// Triangles that cannot be resolved or have zero area get a zero normal.
pub fn face_normals(mesh: &TriangleMesh) -> Vec<Vec3> {
    let mut normals = vec![Vec3::zeros(); mesh.num_triangles()];
    for tri in mesh.triangles() {
        normals[tri.index as usize] = tri.normal;
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use orthodraft_math::Point3;

    fn unit_cube() -> TriangleMesh {
        TriangleMesh::axis_aligned_box(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_empty_mesh() {
        assert!(extract_edges(&TriangleMesh::new(), 6).is_empty());
        assert!(face_normals(&TriangleMesh::new()).is_empty());
    }

    #[test]
    fn test_cube_edge_count() {
        // 12 box edges + 6 face diagonals
        let edges = extract_edges(&unit_cube(), 6);
        assert_eq!(edges.len(), 18);
    }

    #[test]
    fn test_closed_mesh_is_manifold() {
        for edge in extract_edges(&unit_cube(), 6) {
            assert_eq!(edge.triangles.len(), 2);
        }
    }

    #[test]
    fn test_unshared_vertices_merge() {
        // Two triangles sharing an edge geometrically but not by index
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        mesh.push_triangle(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let edges = extract_edges(&mesh, 6);
        assert_eq!(edges.len(), 5);
        let shared: Vec<_> = edges.iter().filter(|e| e.triangles.len() == 2).collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].triangles, vec![0, 1]);
    }

    #[test]
    fn test_endpoints_are_canonical() {
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        for edge in extract_edges(&mesh, 6) {
            let a = quantize_point(&edge.start, 6);
            let b = quantize_point(&edge.end, 6);
            assert!(a < b);
        }
    }

    #[test]
    fn test_non_manifold_seam() {
        // Three triangles fanning out from a common edge
        let mut mesh = TriangleMesh::new();
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(0.0, 0.0, 1.0);
        mesh.push_triangle(a, b, Point3::new(1.0, 0.0, 0.0));
        mesh.push_triangle(a, b, Point3::new(0.0, 1.0, 0.0));
        mesh.push_triangle(a, b, Point3::new(-1.0, 0.0, 0.0));
        let edges = extract_edges(&mesh, 6);
        let seam = edges.iter().find(|e| e.is_non_manifold()).unwrap();
        assert_eq!(seam.triangles.len(), 3);
    }

    #[test]
    fn test_degenerate_edges_skipped() {
        let mut mesh = TriangleMesh::new();
        let p = Point3::new(1.0, 1.0, 1.0);
        mesh.push_triangle(p, p, Point3::new(2.0, 1.0, 1.0));
        let edges = extract_edges(&mesh, 6);
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn test_face_normals_indexed_by_triangle() {
        let normals = face_normals(&unit_cube());
        assert_eq!(normals.len(), 12);
        assert!((normals[0].z + 1.0).abs() < 1e-12);
        assert!((normals[2].z - 1.0).abs() < 1e-12);
    }
}
