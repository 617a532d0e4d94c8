//! Orthographic projection onto the six canonical view planes.

use orthodraft_math::{guarded_divisor, normalize_or_zero, Point3, Vec3};
use orthodraft_mesh::TriangleMesh;

use crate::circles::detect_circles;
use crate::config::DraftingConfig;
use crate::edge_extract::{extract_edges, face_normals};
use crate::types::{BoundingBox2D, EdgeClass, MeshEdge, Point2D, ProjectedEdge, ProjectedView, ViewDirection};
use crate::visibility::{classify_edge, ClassifyParams};

/// Orthonormal screen basis for a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    /// Screen +X in model space.
    pub right: Vec3,
    /// Screen +Y in model space.
    pub up: Vec3,
    /// Direction from the model toward the viewer.
    pub toward_viewer: Vec3,
}

impl ViewBasis {
    /// Build a basis from a view direction and a nominal up vector.
    ///
    /// `right = normalize(up × dir)`, `up' = normalize(dir × right)`.
    pub fn new(toward_viewer: Vec3, nominal_up: Vec3) -> Self {
        let dir = normalize_or_zero(&toward_viewer);
        let right = normalize_or_zero(&nominal_up.cross(&dir));
        let up = normalize_or_zero(&dir.cross(&right));
        Self {
            right,
            up,
            toward_viewer: dir,
        }
    }

    /// Basis for one of the canonical views.
    pub fn for_view(view: ViewDirection) -> Self {
        Self::new(view.toward_viewer(), view.up_vector())
    }

    /// Project a 3D point to 2D view coordinates.
    pub fn project(&self, p: &Point3) -> Point2D {
        Point2D::new(p.coords.dot(&self.right), p.coords.dot(&self.up))
    }

    /// Project a direction to its 2D screen components.
    pub fn project_vector(&self, v: &Vec3) -> (f64, f64) {
        (v.dot(&self.right), v.dot(&self.up))
    }

    /// Signed depth toward the viewer (larger is closer).
    pub fn depth(&self, p: &Point3) -> f64 {
        p.coords.dot(&self.toward_viewer)
    }
}

/// Scale mapping the larger of the bounds' width and height to `reference_size`.
///
/// Empty or zero-size bounds get a scale of 1.
pub fn display_scale(bounds: &BoundingBox2D, reference_size: f64) -> f64 {
    let extent = bounds.width().max(bounds.height());
    if extent <= 0.0 {
        return 1.0;
    }
    reference_size / guarded_divisor(extent, reference_size)
}

/// Classify and project a pre-extracted edge graph for one view.
///
/// Internal edges and edges that project to (near) zero length are dropped.
/// Circles are detected on the resulting solid edges.
pub fn project_edges(
    edges: &[MeshEdge],
    normals: &[Vec3],
    view: ViewDirection,
    config: &DraftingConfig,
) -> ProjectedView {
    let basis = ViewBasis::for_view(view);
    let params = ClassifyParams::from(config);
    let mut result = ProjectedView::new(view);

    for edge in edges {
        let class = classify_edge(edge, normals, &basis.toward_viewer, &params);
        if !class.is_drawn() {
            continue;
        }
        let projected = ProjectedEdge::new(
            basis.project(&edge.start),
            basis.project(&edge.end),
            class,
            basis.depth(&edge.midpoint()),
        );
        if projected.is_degenerate(config.degenerate_edge_length) {
            continue;
        }
        result.add_edge(projected);
    }

    result.scale = display_scale(&result.bounds, config.reference_size);
    result.circles = detect_circles(&result, config);

    tracing::debug!(
        view = %view,
        silhouette = result.count(EdgeClass::Silhouette),
        visible = result.count(EdgeClass::Visible),
        hidden = result.count(EdgeClass::Hidden),
        circles = result.circles.len(),
        scale = result.scale,
        "projected view"
    );

    result
}

/// Project a mesh into a single view.
///
/// Convenience wrapper that extracts the edge graph first. When projecting
/// several views, extract once and call [`project_edges`] per view.
pub fn project_mesh(mesh: &TriangleMesh, view: ViewDirection, config: &DraftingConfig) -> ProjectedView {
    let edges = extract_edges(mesh, config.key_precision);
    let normals = face_normals(mesh);
    project_edges(&edges, &normals, view, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn block(w: f64, h: f64, d: f64) -> TriangleMesh {
        TriangleMesh::axis_aligned_box(Point3::origin(), Point3::new(w, h, d))
    }

    #[test]
    fn test_basis_orthonormal_for_all_views() {
        for view in ViewDirection::ALL {
            let b = ViewBasis::for_view(view);
            assert_abs_diff_eq!(b.right.dot(&b.up), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(b.right.dot(&b.toward_viewer), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(b.up.dot(&b.toward_viewer), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(b.right.norm(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(b.up.norm(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(b.toward_viewer.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_front_basis_axes() {
        let b = ViewBasis::for_view(ViewDirection::Front);
        assert_abs_diff_eq!(b.right.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.up.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_screen_axes_match_extent_axes() {
        for view in ViewDirection::ALL {
            let b = ViewBasis::for_view(view);
            let (h, v) = view.extent_axes();
            assert_abs_diff_eq!(b.right[h as usize].abs(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(b.up[v as usize].abs(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_front_view_of_block() {
        let view = project_mesh(&block(50.0, 30.0, 20.0), ViewDirection::Front, &DraftingConfig::default());
        assert!(view.bounds.is_valid());
        assert_abs_diff_eq!(view.bounds.width(), 50.0, epsilon = 1e-6);
        assert_abs_diff_eq!(view.bounds.height(), 30.0, epsilon = 1e-6);
        assert_abs_diff_eq!(view.scale, 2.0, epsilon = 1e-9);
        // Front face outline
        assert_eq!(view.count(EdgeClass::Silhouette), 4);
        // Back face outline folds between two away-facing faces
        assert_eq!(view.count(EdgeClass::Hidden), 4);
        assert_eq!(view.count(EdgeClass::Visible), 0);
    }

    #[test]
    fn test_all_standard_views_have_edges() {
        let mesh = block(2.0, 3.0, 4.0);
        for view in ViewDirection::ALL {
            let projected = project_mesh(&mesh, view, &DraftingConfig::default());
            assert!(!projected.is_empty(), "view {} should have edges", view);
            assert!(projected.bounds.is_valid());
            assert!(projected.edges.iter().all(|e| e.class != EdgeClass::Internal));
        }
    }

    #[test]
    fn test_top_view_extents() {
        let view = project_mesh(&block(50.0, 30.0, 20.0), ViewDirection::Top, &DraftingConfig::default());
        assert_abs_diff_eq!(view.bounds.width(), 50.0, epsilon = 1e-6);
        assert_abs_diff_eq!(view.bounds.height(), 20.0, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_mesh_projects_to_empty_view() {
        let view = project_mesh(&TriangleMesh::new(), ViewDirection::Front, &DraftingConfig::default());
        assert!(view.is_empty());
        assert!(!view.bounds.is_valid());
        assert_eq!(view.scale, 1.0);
        assert!(view.circles.is_empty());
    }

    #[test]
    fn test_display_scale_guards_zero_size() {
        let flat = BoundingBox2D::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(display_scale(&flat, 100.0), 1.0);
        let bb = BoundingBox2D::new(0.0, 0.0, 10.0, 4.0);
        assert_abs_diff_eq!(display_scale(&bb, 100.0), 10.0, epsilon = 1e-12);
    }
}
