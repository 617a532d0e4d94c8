//! Dimension data model.

use std::fmt;

use orthodraft_drafting::{Point2D, ViewDirection};
use serde::{Deserialize, Serialize};

/// Direction a linear dimension measures along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Measures along screen X; stacked below the view.
    Horizontal,
    /// Measures along screen Y; stacked right of the view.
    Vertical,
}

/// Which strategy proposed a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    /// Overall width or height of the part.
    Overall,
    /// Step between two distinct edge levels.
    Feature,
    /// Diameter of a through feature.
    Hole,
    /// Placeholder for the primary datum symbol.
    DatumReference,
}

/// Semantic dimension type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionType {
    /// Straight-line distance.
    Linear,
    /// Circle diameter.
    Diameter,
    /// Arc radius.
    Radius,
    /// Angle between two lines.
    Angular,
    /// Distance from a common origin.
    Ordinate,
    /// Length along an arc.
    ArcLength,
}

impl DimensionType {
    /// Snake-case name as used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            DimensionType::Linear => "linear",
            DimensionType::Diameter => "diameter",
            DimensionType::Radius => "radius",
            DimensionType::Angular => "angular",
            DimensionType::Ordinate => "ordinate",
            DimensionType::ArcLength => "arc_length",
        }
    }

    /// Parse a type name (case-insensitive; `arc-length` and `arclength` accepted).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(DimensionType::Linear),
            "diameter" => Some(DimensionType::Diameter),
            "radius" => Some(DimensionType::Radius),
            "angular" | "angle" => Some(DimensionType::Angular),
            "ordinate" => Some(DimensionType::Ordinate),
            "arc_length" | "arc-length" | "arclength" => Some(DimensionType::ArcLength),
            _ => None,
        }
    }
}

/// Drawing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Unit {
    /// Millimeters.
    #[default]
    #[serde(rename = "mm")]
    Millimeter,
    /// Inches.
    #[serde(rename = "in")]
    Inch,
}

impl Unit {
    /// Unit suffix.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Millimeter => "mm",
            Unit::Inch => "in",
        }
    }

    /// Decimal places conventionally shown for this unit.
    pub fn decimals(&self) -> usize {
        match self {
            Unit::Millimeter => 1,
            Unit::Inch => 3,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A 2D line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment2D {
    /// Start point.
    pub start: Point2D,
    /// End point.
    pub end: Point2D,
}

impl Segment2D {
    /// Create a segment.
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Degenerate segment at a single point.
    pub fn point(p: Point2D) -> Self {
        Self { start: p, end: p }
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Midpoint.
    pub fn midpoint(&self) -> Point2D {
        self.start.midpoint(&self.end)
    }

    /// Segment scaled about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.start.scaled(factor), self.end.scaled(factor))
    }

    /// Segment moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            Point2D::new(self.start.x + dx, self.start.y + dy),
            Point2D::new(self.end.x + dx, self.end.y + dy),
        )
    }

    /// Horizontal when the X span is at least the Y span.
    pub fn orientation(&self) -> Orientation {
        if (self.end.x - self.start.x).abs() >= (self.end.y - self.start.y).abs() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// A proposed dimension before placement.
///
/// Anchor coordinates are in view units (model units on the view plane).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionCandidate {
    /// Proposing strategy.
    pub kind: CandidateKind,
    /// Measuring direction.
    pub orientation: Orientation,
    /// Magnitude in model units.
    pub value: f64,
    /// Measured geometry in view coordinates.
    pub anchor: Segment2D,
    /// Ranking weight; higher is placed first.
    pub priority: u32,
    /// Display label.
    pub label: String,
    /// Whether the dimension must survive filtering.
    pub critical: bool,
}

/// Plus/minus tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionTolerance {
    /// Upper deviation (non-negative).
    pub plus: f64,
    /// Lower deviation (non-negative).
    pub minus: f64,
}

impl DimensionTolerance {
    /// Symmetric tolerance.
    pub fn symmetric(value: f64) -> Self {
        Self {
            plus: value,
            minus: value,
        }
    }

    /// Whether both deviations are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.plus.is_finite() && self.minus.is_finite() && self.plus >= 0.0 && self.minus >= 0.0
    }
}

/// Resolved position of a dimension in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionPosition {
    /// Measured geometry the extension lines start from.
    pub anchor: Segment2D,
    /// The dimension line itself.
    pub line: Segment2D,
    /// Where the value text sits; defaults to the line midpoint.
    pub text: Option<Point2D>,
}

impl DimensionPosition {
    /// Text anchor, falling back to the dimension line midpoint.
    pub fn text_anchor(&self) -> Point2D {
        self.text.unwrap_or_else(|| self.line.midpoint())
    }

    /// Move the dimension line and text by `(dx, dy)`, leaving the anchor in place.
    pub fn shift(&mut self, dx: f64, dy: f64) {
        self.line = self.line.translated(dx, dy);
        self.text = self.text.map(|t| Point2D::new(t.x + dx, t.y + dy));
    }
}

/// A finalized, renderable dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Stable identifier, e.g. `front-dim-1`.
    pub id: String,
    /// Semantic type.
    pub dim_type: DimensionType,
    /// Value in model units.
    pub value: f64,
    /// Optional tolerance band.
    pub tolerance: Option<DimensionTolerance>,
    /// Display unit.
    pub unit: Unit,
    /// Owning view.
    pub view: ViewDirection,
    /// Resolved position.
    pub position: DimensionPosition,
    /// Display label.
    pub label: String,
    /// Criticality flag.
    pub critical: bool,
}

impl Dimension {
    /// Label text for a value of the given type.
    pub fn format_label(dim_type: DimensionType, value: f64, unit: Unit) -> String {
        let decimals = unit.decimals();
        match dim_type {
            DimensionType::Diameter => format!("\u{2300}{:.*}", decimals, value),
            DimensionType::Radius => format!("R{:.*}", decimals, value),
            DimensionType::Angular => format!("{:.1}\u{b0}", value),
            _ => format!("{:.*}", decimals, value),
        }
    }

    /// Orientation of the dimension line.
    pub fn orientation(&self) -> Orientation {
        self.position.line.orientation()
    }
}
