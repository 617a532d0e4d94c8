//! Dimension candidate generation.
//!
//! Three independent strategies propose candidates for a single view:
//! overall extents, steps between axis-aligned edge levels, and hole
//! diameters. A zero-value datum-reference placeholder marks where the
//! primary datum symbol goes. Every candidate carries a priority that the
//! placer ranks by.

use orthodraft_drafting::{
    CircleKind, DatumFeature, DatumSlot, Point2D, ProjectedView, ViewBasis,
};
use orthodraft_math::quantize;
use orthodraft_mesh::BoundingBox3;

use crate::config::CandidateConfig;
use crate::types::{CandidateKind, Dimension, DimensionCandidate, DimensionType, Orientation, Segment2D, Unit};

/// Decimal places used to merge coincident edge levels.
const LEVEL_PRECISION: u32 = 6;

/// Overall width and height of the part as seen in `view`.
///
/// Values come from the model bounding box mapped through the view's extent
/// axes; anchors run along the bottom and right edges of the view bounds.
/// Produces nothing for an empty view or a zero extent.
pub fn overall_candidates(
    view: &ProjectedView,
    bbox: &BoundingBox3,
    config: &CandidateConfig,
) -> Vec<DimensionCandidate> {
    let b = &view.bounds;
    if !b.is_valid() {
        return Vec::new();
    }
    let (h_axis, v_axis) = view.view.extent_axes();
    let mut out = Vec::with_capacity(2);

    let width = bbox.extent(h_axis);
    if width > 0.0 {
        out.push(DimensionCandidate {
            kind: CandidateKind::Overall,
            orientation: Orientation::Horizontal,
            value: width,
            anchor: Segment2D::new(Point2D::new(b.min_x, b.min_y), Point2D::new(b.max_x, b.min_y)),
            priority: config.overall_priority,
            label: Dimension::format_label(DimensionType::Linear, width, Unit::Millimeter),
            critical: true,
        });
    }

    let height = bbox.extent(v_axis);
    if height > 0.0 {
        out.push(DimensionCandidate {
            kind: CandidateKind::Overall,
            orientation: Orientation::Vertical,
            value: height,
            anchor: Segment2D::new(Point2D::new(b.max_x, b.min_y), Point2D::new(b.max_x, b.max_y)),
            priority: config.overall_priority,
            label: Dimension::format_label(DimensionType::Linear, height, Unit::Millimeter),
            critical: true,
        });
    }

    out
}

/// Pairs of adjacent distinct levels whose gap exceeds `threshold`.
///
/// Each level is compared with its immediate predecessor, so a run of
/// closely spaced levels produces no step even when it spans more than
/// `threshold` overall.
fn level_steps(mut values: Vec<f64>, threshold: f64) -> Vec<(f64, f64)> {
    values.sort_by(f64::total_cmp);
    values.dedup_by_key(|v| quantize(*v, LEVEL_PRECISION));
    values
        .windows(2)
        .filter(|pair| pair[1] - pair[0] > threshold)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Step dimensions between adjacent edge levels.
///
/// Vertical solid edges contribute X levels (measured by horizontal
/// dimensions), horizontal solid edges contribute Y levels. Adjacent levels
/// closer than the step threshold produce no step.
pub fn feature_candidates(view: &ProjectedView, config: &CandidateConfig) -> Vec<DimensionCandidate> {
    let b = &view.bounds;
    if !b.is_valid() {
        return Vec::new();
    }

    let mut x_levels = Vec::new();
    let mut y_levels = Vec::new();
    for edge in view.solid_edges() {
        if edge.is_vertical(config.axis_tolerance) {
            x_levels.push((edge.start.x + edge.end.x) / 2.0);
        } else if edge.is_horizontal(config.axis_tolerance) {
            y_levels.push((edge.start.y + edge.end.y) / 2.0);
        }
    }

    let mut out = Vec::new();
    for (lo, hi) in level_steps(x_levels, config.step_threshold) {
        let value = hi - lo;
        out.push(DimensionCandidate {
            kind: CandidateKind::Feature,
            orientation: Orientation::Horizontal,
            value,
            anchor: Segment2D::new(Point2D::new(lo, b.min_y), Point2D::new(hi, b.min_y)),
            priority: config.feature_priority,
            label: Dimension::format_label(DimensionType::Linear, value, Unit::Millimeter),
            critical: false,
        });
    }
    for (lo, hi) in level_steps(y_levels, config.step_threshold) {
        let value = hi - lo;
        out.push(DimensionCandidate {
            kind: CandidateKind::Feature,
            orientation: Orientation::Vertical,
            value,
            anchor: Segment2D::new(Point2D::new(b.max_x, lo), Point2D::new(b.max_x, hi)),
            priority: config.feature_priority,
            label: Dimension::format_label(DimensionType::Linear, value, Unit::Millimeter),
            critical: false,
        });
    }
    out
}

/// Diameter candidates for every detected hole.
pub fn hole_candidates(view: &ProjectedView, config: &CandidateConfig) -> Vec<DimensionCandidate> {
    view.circles
        .iter()
        .filter(|c| c.kind == CircleKind::Hole)
        .map(|c| {
            let diameter = c.diameter();
            DimensionCandidate {
                kind: CandidateKind::Hole,
                orientation: Orientation::Horizontal,
                value: diameter,
                anchor: Segment2D::new(
                    Point2D::new(c.center.x - c.radius, c.center.y),
                    Point2D::new(c.center.x + c.radius, c.center.y),
                ),
                priority: config.hole_priority,
                label: Dimension::format_label(DimensionType::Diameter, diameter, Unit::Millimeter),
                critical: false,
            }
        })
        .collect()
}

/// Placeholder marking where the primary datum symbol sits in this view.
pub fn datum_reference_candidate(
    view: &ProjectedView,
    datums: &[DatumFeature],
    config: &CandidateConfig,
) -> Option<DimensionCandidate> {
    let primary = datums.iter().find(|d| d.slot == DatumSlot::Primary)?;
    let basis = ViewBasis::for_view(view.view);
    let at = basis.project(&primary.centroid_point());
    Some(DimensionCandidate {
        kind: CandidateKind::DatumReference,
        orientation: Orientation::Horizontal,
        value: 0.0,
        anchor: Segment2D::point(at),
        priority: config.datum_priority,
        label: primary.slot.letter().to_string(),
        critical: false,
    })
}

/// Run every strategy for one view.
///
/// Nothing is proposed for a view with no drawn edges.
pub fn generate_candidates(
    view: &ProjectedView,
    bbox: &BoundingBox3,
    datums: &[DatumFeature],
    config: &CandidateConfig,
) -> Vec<DimensionCandidate> {
    if view.is_empty() {
        return Vec::new();
    }
    let mut out = overall_candidates(view, bbox, config);
    out.extend(feature_candidates(view, config));
    out.extend(hole_candidates(view, config));
    out.extend(datum_reference_candidate(view, datums, config));

    tracing::debug!(view = %view.view, candidates = out.len(), "generated dimension candidates");
    out
}
