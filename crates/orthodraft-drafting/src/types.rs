//! Core types for projected views, edges, and circular features.

use std::fmt;

use orthodraft_math::{Point3, Vec3};
use orthodraft_mesh::Axis;
use serde::{Deserialize, Serialize};

/// A 2D point for serializable drafting output.
///
/// We use a custom type instead of nalgebra::Point2 to keep the renderer-facing
/// JSON flat (`{"x": .., "y": ..}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Midpoint between `self` and `other`.
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Point scaled about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// One of the six canonical orthographic views.
///
/// Model space is Y-up. Each view is defined by the direction from the model
/// toward the viewer and a nominal up direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewDirection {
    /// Viewer on +Z, up +Y.
    #[default]
    Front,
    /// Viewer on -Z, up +Y.
    Back,
    /// Viewer on +Y, up -Z.
    Top,
    /// Viewer on -Y, up +Z.
    Bottom,
    /// Viewer on +X, up +Y.
    Right,
    /// Viewer on -X, up +Y.
    Left,
}

impl ViewDirection {
    /// All six views in drawing order.
    pub const ALL: [Self; 6] = [
        Self::Front,
        Self::Back,
        Self::Top,
        Self::Bottom,
        Self::Right,
        Self::Left,
    ];

    /// Unit vector pointing from the model toward the viewer.
    pub fn toward_viewer(&self) -> Vec3 {
        match self {
            ViewDirection::Front => Vec3::new(0.0, 0.0, 1.0),
            ViewDirection::Back => Vec3::new(0.0, 0.0, -1.0),
            ViewDirection::Top => Vec3::new(0.0, 1.0, 0.0),
            ViewDirection::Bottom => Vec3::new(0.0, -1.0, 0.0),
            ViewDirection::Right => Vec3::new(1.0, 0.0, 0.0),
            ViewDirection::Left => Vec3::new(-1.0, 0.0, 0.0),
        }
    }

    /// Nominal up vector for this view (used to orient the 2D projection).
    pub fn up_vector(&self) -> Vec3 {
        match self {
            ViewDirection::Top => Vec3::new(0.0, 0.0, -1.0),
            ViewDirection::Bottom => Vec3::new(0.0, 0.0, 1.0),
            _ => Vec3::new(0.0, 1.0, 0.0),
        }
    }

    /// Model axes that map to the horizontal and vertical screen directions.
    pub fn extent_axes(&self) -> (Axis, Axis) {
        match self {
            ViewDirection::Front | ViewDirection::Back => (Axis::X, Axis::Y),
            ViewDirection::Top | ViewDirection::Bottom => (Axis::X, Axis::Z),
            ViewDirection::Right | ViewDirection::Left => (Axis::Z, Axis::Y),
        }
    }

    /// Lowercase view name.
    pub fn name(&self) -> &'static str {
        match self {
            ViewDirection::Front => "front",
            ViewDirection::Back => "back",
            ViewDirection::Top => "top",
            ViewDirection::Bottom => "bottom",
            ViewDirection::Right => "right",
            ViewDirection::Left => "left",
        }
    }

    /// Parse a view name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ViewDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an edge is drawn in a given view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeClass {
    /// Outline edge: a free boundary, or the fold between a face toward the
    /// viewer and one facing away.
    Silhouette,
    /// Crease between two faces that both face the viewer.
    Visible,
    /// Crease between two faces that both face away (drawn dashed).
    Hidden,
    /// Tessellation artifact or non-manifold seam; not drawn.
    Internal,
}

impl EdgeClass {
    /// Whether edges of this class appear in the drawing at all.
    pub fn is_drawn(&self) -> bool {
        !matches!(self, EdgeClass::Internal)
    }

    /// Whether edges of this class are drawn as solid lines.
    pub fn is_solid(&self) -> bool {
        matches!(self, EdgeClass::Silhouette | EdgeClass::Visible)
    }
}

/// A logical mesh edge in 3D space with its adjacent triangles.
///
/// Endpoints are stored with the lexicographically smaller (after rounding)
/// endpoint first.
#[derive(Debug, Clone)]
pub struct MeshEdge {
    /// First endpoint.
    pub start: Point3,
    /// Second endpoint.
    pub end: Point3,
    /// Indices of all triangles that reference this edge.
    pub triangles: Vec<u32>,
}

impl MeshEdge {
    /// Whether this is a free boundary edge (one adjacent triangle).
    pub fn is_boundary(&self) -> bool {
        self.triangles.len() == 1
    }

    /// Whether this edge is shared by more than two triangles.
    pub fn is_non_manifold(&self) -> bool {
        self.triangles.len() > 2
    }

    /// Midpoint of the edge.
    pub fn midpoint(&self) -> Point3 {
        Point3::from((self.start.coords + self.end.coords) / 2.0)
    }
}

/// A 2D projected edge with its classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedEdge {
    /// Start point in 2D view coordinates.
    pub start: Point2D,
    /// End point in 2D view coordinates.
    pub end: Point2D,
    /// Visibility classification.
    pub class: EdgeClass,
    /// Depth of the edge midpoint toward the viewer (larger is closer).
    pub depth: f64,
}

impl ProjectedEdge {
    /// Create a new projected edge.
    pub fn new(start: Point2D, end: Point2D, class: EdgeClass, depth: f64) -> Self {
        Self {
            start,
            end,
            class,
            depth,
        }
    }

    /// Length of the edge in 2D.
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Check if the edge is degenerate (zero length).
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        self.length() < tolerance
    }

    /// Whether the edge runs horizontally within `tolerance` (relative to its length).
    pub fn is_horizontal(&self, tolerance: f64) -> bool {
        (self.end.y - self.start.y).abs() <= tolerance * self.length()
    }

    /// Whether the edge runs vertically within `tolerance` (relative to its length).
    pub fn is_vertical(&self, tolerance: f64) -> bool {
        (self.end.x - self.start.x).abs() <= tolerance * self.length()
    }
}

/// Wire form of [`BoundingBox2D`]; JSON has no infinities, so an empty box
/// is written as zeros plus a flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BoundingBox2DData {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    empty: bool,
}

/// 2D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "BoundingBox2DData", from = "BoundingBox2DData")]
pub struct BoundingBox2D {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl BoundingBox2D {
    /// Create an empty bounding box.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Create a bounding box from explicit limits.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Expand the bounding box to include a point.
    pub fn include_point(&mut self, p: Point2D) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Width of the bounding box (zero when empty).
    pub fn width(&self) -> f64 {
        if self.is_valid() {
            self.max_x - self.min_x
        } else {
            0.0
        }
    }

    /// Height of the bounding box (zero when empty).
    pub fn height(&self) -> f64 {
        if self.is_valid() {
            self.max_y - self.min_y
        } else {
            0.0
        }
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Check if the bounding box is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Bounding box scaled about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.min_x * factor,
            self.min_y * factor,
            self.max_x * factor,
            self.max_y * factor,
        )
    }

    /// Bounding box grown by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }

    /// Area of the intersection with `other` (zero when disjoint).
    pub fn overlap_area(&self, other: &Self) -> f64 {
        let w = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let h = self.max_y.min(other.max_y) - self.min_y.max(other.min_y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }

    /// Total distance by which `other` sticks out of this box, summed over all four sides.
    pub fn outside_distance(&self, other: &Self) -> f64 {
        (self.min_x - other.min_x).max(0.0)
            + (other.max_x - self.max_x).max(0.0)
            + (self.min_y - other.min_y).max(0.0)
            + (other.max_y - self.max_y).max(0.0)
    }
}

impl Default for BoundingBox2D {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<BoundingBox2D> for BoundingBox2DData {
    fn from(bounds: BoundingBox2D) -> Self {
        if bounds.is_valid() {
            Self {
                min_x: bounds.min_x,
                min_y: bounds.min_y,
                max_x: bounds.max_x,
                max_y: bounds.max_y,
                empty: false,
            }
        } else {
            Self {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
                empty: true,
            }
        }
    }
}

impl From<BoundingBox2DData> for BoundingBox2D {
    fn from(data: BoundingBox2DData) -> Self {
        if data.empty {
            Self::empty()
        } else {
            Self::new(data.min_x, data.min_y, data.max_x, data.max_y)
        }
    }
}

/// Kind of a detected circular feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircleKind {
    /// Full circle lying strictly inside the view outline.
    Hole,
    /// Full circle that forms part of the view outline.
    Boss,
    /// Partial arc (fillet, slot end, rounded corner).
    Arc,
}

/// A circular feature in a projected view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle2D {
    /// Center in 2D view coordinates.
    pub center: Point2D,
    /// Radius in model units.
    pub radius: f64,
    /// Feature kind.
    pub kind: CircleKind,
}

impl Circle2D {
    /// Diameter in model units.
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }
}

/// A complete projected view: classified edges, circles, bounds and display scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedView {
    /// Which canonical view this is.
    pub view: ViewDirection,
    /// All drawn edges (internal edges are dropped).
    pub edges: Vec<ProjectedEdge>,
    /// Detected circular features.
    pub circles: Vec<Circle2D>,
    /// 2D bounding box in view coordinates.
    pub bounds: BoundingBox2D,
    /// Factor mapping the longer bounds extent to the reference size.
    pub scale: f64,
}

impl ProjectedView {
    /// Create a new empty projected view.
    pub fn new(view: ViewDirection) -> Self {
        Self {
            view,
            edges: Vec::new(),
            circles: Vec::new(),
            bounds: BoundingBox2D::empty(),
            scale: 1.0,
        }
    }

    /// Add an edge and update the bounding box.
    pub fn add_edge(&mut self, edge: ProjectedEdge) {
        self.bounds.include_point(edge.start);
        self.bounds.include_point(edge.end);
        self.edges.push(edge);
    }

    /// Edges of one class.
    pub fn edges_of(&self, class: EdgeClass) -> impl Iterator<Item = &ProjectedEdge> {
        self.edges.iter().filter(move |e| e.class == class)
    }

    /// Edges drawn as solid lines (silhouette and visible).
    pub fn solid_edges(&self) -> impl Iterator<Item = &ProjectedEdge> {
        self.edges.iter().filter(|e| e.class.is_solid())
    }

    /// Number of edges of one class.
    pub fn count(&self, class: EdgeClass) -> usize {
        self.edges_of(class).count()
    }

    /// Bounds in drawing units (view bounds times display scale).
    pub fn scaled_bounds(&self) -> BoundingBox2D {
        if self.bounds.is_valid() {
            self.bounds.scaled(self.scale)
        } else {
            BoundingBox2D::new(0.0, 0.0, 0.0, 0.0)
        }
    }

    /// Whether the view contains nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_direction_vectors_are_unit() {
        for view in ViewDirection::ALL {
            assert!((view.toward_viewer().norm() - 1.0).abs() < 1e-12);
            assert!((view.up_vector().norm() - 1.0).abs() < 1e-12);
            assert!(view.toward_viewer().dot(&view.up_vector()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_view_names_round_trip() {
        for view in ViewDirection::ALL {
            assert_eq!(ViewDirection::from_name(view.name()), Some(view));
        }
        assert_eq!(ViewDirection::from_name(" TOP "), Some(ViewDirection::Top));
        assert_eq!(ViewDirection::from_name("isometric"), None);
    }

    #[test]
    fn test_bounding_box() {
        let mut bb = BoundingBox2D::empty();
        assert!(!bb.is_valid());
        assert_eq!(bb.width(), 0.0);

        bb.include_point(Point2D::new(0.0, 0.0));
        bb.include_point(Point2D::new(10.0, 5.0));

        assert!(bb.is_valid());
        assert!((bb.width() - 10.0).abs() < 1e-10);
        assert!((bb.height() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_bounds_serialize_finite() {
        let json = serde_json::to_string(&BoundingBox2D::empty()).unwrap();
        assert!(!json.contains("null"), "{json}");
        let back: BoundingBox2D = serde_json::from_str(&json).unwrap();
        assert!(!back.is_valid());

        let bb = BoundingBox2D::new(-1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&bb).unwrap();
        assert!(!json.contains("empty"));
        assert_eq!(serde_json::from_str::<BoundingBox2D>(&json).unwrap(), bb);
    }

    #[test]
    fn test_overlap_area() {
        let a = BoundingBox2D::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox2D::new(5.0, 5.0, 15.0, 15.0);
        let c = BoundingBox2D::new(20.0, 20.0, 30.0, 30.0);
        assert!((a.overlap_area(&b) - 25.0).abs() < 1e-12);
        assert_eq!(a.overlap_area(&c), 0.0);
    }

    #[test]
    fn test_outside_distance() {
        let outer = BoundingBox2D::new(0.0, 0.0, 10.0, 10.0);
        let inside = BoundingBox2D::new(2.0, 2.0, 4.0, 4.0);
        let poking = BoundingBox2D::new(-3.0, 2.0, 4.0, 12.0);
        assert_eq!(outer.outside_distance(&inside), 0.0);
        assert!((outer.outside_distance(&poking) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_projected_edge_orientation() {
        let edge = ProjectedEdge::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 4.0),
            EdgeClass::Visible,
            0.0,
        );
        assert!((edge.length() - 5.0).abs() < 1e-10);
        assert!(!edge.is_horizontal(0.01));

        let flat = ProjectedEdge::new(
            Point2D::new(0.0, 1.0),
            Point2D::new(10.0, 1.0),
            EdgeClass::Silhouette,
            0.0,
        );
        assert!(flat.is_horizontal(0.01));
        assert!(!flat.is_vertical(0.01));
    }

    #[test]
    fn test_edge_class_drawn() {
        assert!(EdgeClass::Hidden.is_drawn());
        assert!(!EdgeClass::Hidden.is_solid());
        assert!(!EdgeClass::Internal.is_drawn());
    }
}
