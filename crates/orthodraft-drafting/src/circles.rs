//! Circular feature detection on projected views.
//!
//! Tessellated holes, bosses, and fillets show up in a projection as chains
//! of short solid edges that turn consistently in one direction. We chain
//! the drawn edges into polylines, split them into smoothly turning runs,
//! and fit a circle to each run by algebraic least squares.

use std::collections::{HashMap, VecDeque};

use nalgebra::{Matrix3, Vector3};
use orthodraft_math::quantize;

use crate::config::DraftingConfig;
use crate::types::{Circle2D, CircleKind, Point2D, ProjectedView};

/// Largest turn between consecutive segments that still counts as a smooth arc.
const ARC_MAX_TURN_DEGREES: f64 = 40.0;

/// Consecutive segment lengths may differ by at most this factor within one arc.
const ARC_MAX_LENGTH_RATIO: f64 = 2.0;

/// Turns smaller than this (radians) are treated as straight.
const STRAIGHT_TURN: f64 = 1e-6;

type Key = (i64, i64);

fn point_key(p: &Point2D, precision: u32) -> Key {
    (quantize(p.x, precision), quantize(p.y, precision))
}

/// A chained 2D polyline.
#[derive(Debug, Clone)]
pub struct Polyline2D {
    /// Ordered vertices. Closed polylines do not repeat the first vertex.
    pub points: Vec<Point2D>,
    /// Whether the last vertex connects back to the first.
    pub closed: bool,
}

/// Chain segments into polylines through vertices shared by exactly two segments.
///
/// Junctions (three or more segments meeting) and free ends terminate a chain.
pub fn chain_edges(segments: &[(Point2D, Point2D)], precision: u32) -> Vec<Polyline2D> {
    let mut adjacency: HashMap<Key, Vec<usize>> = HashMap::new();
    for (i, (a, b)) in segments.iter().enumerate() {
        adjacency.entry(point_key(a, precision)).or_default().push(i);
        adjacency.entry(point_key(b, precision)).or_default().push(i);
    }

    // Next point past `from`, or None at a junction or free end.
    let step = |used: &mut Vec<bool>, from: Key| -> Option<Point2D> {
        let neighbors = adjacency.get(&from)?;
        if neighbors.len() != 2 {
            return None;
        }
        let &next = neighbors.iter().find(|&&i| !used[i])?;
        used[next] = true;
        let (a, b) = segments[next];
        Some(if point_key(&a, precision) == from { b } else { a })
    };

    let mut used = vec![false; segments.len()];
    let mut polylines = Vec::new();

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (a, b) = segments[start];
        let head_key = point_key(&a, precision);
        let mut points: VecDeque<Point2D> = VecDeque::from([a, b]);
        let mut closed = false;

        let mut tail_key = point_key(&b, precision);
        while let Some(next) = step(&mut used, tail_key) {
            let key = point_key(&next, precision);
            if key == head_key {
                closed = true;
                break;
            }
            points.push_back(next);
            tail_key = key;
        }

        if !closed {
            let mut front_key = head_key;
            while let Some(next) = step(&mut used, front_key) {
                points.push_front(next);
                front_key = point_key(&next, precision);
            }
        }

        polylines.push(Polyline2D {
            points: points.into_iter().collect(),
            closed,
        });
    }

    polylines
}

/// Fit a circle to `points` (Kåsa algebraic fit).
///
/// Returns `(center, radius, max_radial_deviation)`, or `None` when the
/// points are collinear or too few.
pub fn fit_circle(points: &[Point2D]) -> Option<(Point2D, f64, f64)> {
    if points.len() < 3 {
        return None;
    }
    let n = points.len() as f64;
    let mx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let my = points.iter().map(|p| p.y).sum::<f64>() / n;

    // Centered coordinates keep the normal equations well conditioned.
    let mut m = Matrix3::<f64>::zeros();
    let mut rhs = Vector3::<f64>::zeros();
    for p in points {
        let (x, y) = (p.x - mx, p.y - my);
        let row = Vector3::new(x, y, 1.0);
        m += row * row.transpose();
        rhs -= row * (x * x + y * y);
    }

    let sol = m.lu().solve(&rhs)?;
    let (cx, cy) = (-sol[0] / 2.0, -sol[1] / 2.0);
    let r2 = cx * cx + cy * cy - sol[2];
    if !r2.is_finite() || r2 <= 0.0 {
        return None;
    }
    let radius = r2.sqrt();
    let center = Point2D::new(cx + mx, cy + my);
    let max_dev = points
        .iter()
        .map(|p| (p.distance(&center) - radius).abs())
        .fold(0.0, f64::max);
    Some((center, radius, max_dev))
}

/// Signed turn angle at `b` for the path `a -> b -> c`.
fn turn_angle(a: &Point2D, b: &Point2D, c: &Point2D) -> f64 {
    let (ux, uy) = (b.x - a.x, b.y - a.y);
    let (vx, vy) = (c.x - b.x, c.y - b.y);
    (ux * vy - uy * vx).atan2(ux * vx + uy * vy)
}

/// Whether segment `b -> c` continues the arc `a -> b` smoothly with the given turn sign.
fn continues_arc(a: &Point2D, b: &Point2D, c: &Point2D, sign: f64) -> bool {
    let turn = turn_angle(a, b, c);
    if turn.abs() < STRAIGHT_TURN || turn.abs() > ARC_MAX_TURN_DEGREES.to_radians() {
        return false;
    }
    if sign != 0.0 && turn.signum() != sign {
        return false;
    }
    let l0 = a.distance(b);
    let l1 = b.distance(c);
    let ratio = l0.max(l1) / l0.min(l1).max(f64::MIN_POSITIVE);
    ratio <= ARC_MAX_LENGTH_RATIO
}

/// Split an open polyline into maximal smoothly turning runs of points.
fn arc_runs(points: &[Point2D]) -> Vec<&[Point2D]> {
    let mut runs = Vec::new();
    if points.len() < 3 {
        return runs;
    }
    let mut start = 0;
    let mut sign = 0.0;
    for i in 1..points.len() - 1 {
        if continues_arc(&points[i - 1], &points[i], &points[i + 1], sign) {
            if sign == 0.0 {
                sign = turn_angle(&points[i - 1], &points[i], &points[i + 1]).signum();
            }
        } else {
            if i - start >= 2 {
                runs.push(&points[start..=i]);
            }
            start = i;
            sign = 0.0;
        }
    }
    if points.len() - 1 - start >= 2 {
        runs.push(&points[start..]);
    }
    runs
}

/// Whether every corner of a closed polyline turns smoothly in one direction.
fn is_smooth_loop(points: &[Point2D]) -> bool {
    let n = points.len();
    let first = turn_angle(&points[n - 1], &points[0], &points[1]).signum();
    (0..n).all(|i| {
        continues_arc(
            &points[(i + n - 1) % n],
            &points[i],
            &points[(i + 1) % n],
            first,
        )
    })
}

/// Total angle swept around `center` along `points`, in degrees.
fn swept_degrees(points: &[Point2D], center: &Point2D) -> f64 {
    points
        .windows(2)
        .map(|w| {
            let a = (w[0].y - center.y).atan2(w[0].x - center.x);
            let b = (w[1].y - center.y).atan2(w[1].x - center.x);
            let mut d = b - a;
            while d > std::f64::consts::PI {
                d -= std::f64::consts::TAU;
            }
            while d < -std::f64::consts::PI {
                d += std::f64::consts::TAU;
            }
            d
        })
        .sum::<f64>()
        .abs()
        .to_degrees()
}

/// Detect circles and arcs among the solid (silhouette and visible) edges of a view.
pub fn detect_circles(view: &ProjectedView, config: &DraftingConfig) -> Vec<Circle2D> {
    if !view.bounds.is_valid() {
        return Vec::new();
    }
    let segments: Vec<(Point2D, Point2D)> = view.solid_edges().map(|e| (e.start, e.end)).collect();
    let extent = view.bounds.width().max(view.bounds.height());
    let touch_tol = 1e-6 * (1.0 + extent);
    let min_arc_segments = (config.min_circle_segments / 2).max(3);

    let mut circles: Vec<Circle2D> = Vec::new();
    let mut accept = |center: Point2D, radius: f64, kind: CircleKind| {
        let duplicate = circles.iter().any(|c| {
            c.kind == kind
                && c.center.distance(&center) <= touch_tol.max(radius * config.circle_fit_tolerance)
                && (c.radius - radius).abs() <= radius * config.circle_fit_tolerance
        });
        if !duplicate {
            circles.push(Circle2D {
                center,
                radius,
                kind,
            });
        }
    };

    for polyline in chain_edges(&segments, config.key_precision) {
        let pts = &polyline.points;
        if polyline.closed {
            if pts.len() < config.min_circle_segments || !is_smooth_loop(pts) {
                continue;
            }
            let Some((center, radius, dev)) = fit_circle(pts) else {
                continue;
            };
            if dev > radius * config.circle_fit_tolerance {
                continue;
            }
            let b = &view.bounds;
            let touches_outline = center.x - radius <= b.min_x + touch_tol
                || center.x + radius >= b.max_x - touch_tol
                || center.y - radius <= b.min_y + touch_tol
                || center.y + radius >= b.max_y - touch_tol;
            let kind = if touches_outline {
                CircleKind::Boss
            } else {
                CircleKind::Hole
            };
            accept(center, radius, kind);
        } else {
            for run in arc_runs(pts) {
                if run.len() - 1 < min_arc_segments {
                    continue;
                }
                let Some((center, radius, dev)) = fit_circle(run) else {
                    continue;
                };
                if dev > radius * config.circle_fit_tolerance {
                    continue;
                }
                if swept_degrees(run, &center) >= config.min_arc_degrees {
                    accept(center, radius, CircleKind::Arc);
                }
            }
        }
    }

    circles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EdgeClass, ProjectedEdge, ViewDirection};
    use approx::assert_abs_diff_eq;

    fn polygon(cx: f64, cy: f64, r: f64, n: usize, from_deg: f64, to_deg: f64, closed: bool) -> Vec<Point2D> {
        let count = if closed { n } else { n + 1 };
        (0..count)
            .map(|i| {
                let t = (from_deg + (to_deg - from_deg) * i as f64 / n as f64).to_radians();
                Point2D::new(cx + r * t.cos(), cy + r * t.sin())
            })
            .collect()
    }

    fn add_path(view: &mut ProjectedView, pts: &[Point2D], closed: bool, class: EdgeClass) {
        let n = pts.len();
        let segs = if closed { n } else { n - 1 };
        for i in 0..segs {
            view.add_edge(ProjectedEdge::new(pts[i], pts[(i + 1) % n], class, 0.0));
        }
    }

    fn square(view: &mut ProjectedView, size: f64) {
        let pts = [
            Point2D::new(0.0, 0.0),
            Point2D::new(size, 0.0),
            Point2D::new(size, size),
            Point2D::new(0.0, size),
        ];
        add_path(view, &pts, true, EdgeClass::Silhouette);
    }

    #[test]
    fn test_fit_exact_circle() {
        let pts = polygon(3.0, -2.0, 5.0, 24, 0.0, 360.0, true);
        let (c, r, dev) = fit_circle(&pts).unwrap();
        assert_abs_diff_eq!(c.x, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, -2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r, 5.0, epsilon = 1e-9);
        assert!(dev < 1e-9);
    }

    #[test]
    fn test_fit_collinear_fails() {
        let pts: Vec<_> = (0..5).map(|i| Point2D::new(i as f64, 0.0)).collect();
        assert!(fit_circle(&pts).is_none());
    }

    #[test]
    fn test_chain_closed_loop() {
        let pts = polygon(0.0, 0.0, 1.0, 8, 0.0, 360.0, true);
        let segs: Vec<_> = (0..8).map(|i| (pts[i], pts[(i + 1) % 8])).collect();
        let chains = chain_edges(&segs, 6);
        assert_eq!(chains.len(), 1);
        assert!(chains[0].closed);
        assert_eq!(chains[0].points.len(), 8);
    }

    #[test]
    fn test_chain_stops_at_junction() {
        let o = Point2D::new(0.0, 0.0);
        let segs = vec![
            (o, Point2D::new(1.0, 0.0)),
            (o, Point2D::new(0.0, 1.0)),
            (o, Point2D::new(-1.0, 0.0)),
        ];
        let chains = chain_edges(&segs, 6);
        assert_eq!(chains.len(), 3);
        assert!(chains.iter().all(|c| !c.closed && c.points.len() == 2));
    }

    #[test]
    fn test_hole_inside_outline() {
        let mut view = ProjectedView::new(ViewDirection::Front);
        square(&mut view, 100.0);
        let hole = polygon(50.0, 50.0, 10.0, 32, 0.0, 360.0, true);
        add_path(&mut view, &hole, true, EdgeClass::Silhouette);

        let circles = detect_circles(&view, &DraftingConfig::default());
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].kind, CircleKind::Hole);
        assert_abs_diff_eq!(circles[0].radius, 10.0, epsilon = 1e-6);
        assert_abs_diff_eq!(circles[0].diameter(), 20.0, epsilon = 1e-6);
    }

    #[test]
    fn test_boss_forms_outline() {
        let mut view = ProjectedView::new(ViewDirection::Top);
        let rim = polygon(0.0, 0.0, 12.0, 32, 0.0, 360.0, true);
        add_path(&mut view, &rim, true, EdgeClass::Silhouette);
        let circles = detect_circles(&view, &DraftingConfig::default());
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].kind, CircleKind::Boss);
    }

    #[test]
    fn test_hidden_circle_ignored() {
        let mut view = ProjectedView::new(ViewDirection::Front);
        square(&mut view, 100.0);
        let hole = polygon(50.0, 50.0, 10.0, 32, 0.0, 360.0, true);
        add_path(&mut view, &hole, true, EdgeClass::Hidden);
        assert!(detect_circles(&view, &DraftingConfig::default()).is_empty());
    }

    #[test]
    fn test_polygon_with_sharp_corners_rejected() {
        let mut view = ProjectedView::new(ViewDirection::Front);
        square(&mut view, 100.0);
        let hex = polygon(50.0, 50.0, 10.0, 6, 0.0, 360.0, true);
        add_path(&mut view, &hex, true, EdgeClass::Visible);
        assert!(detect_circles(&view, &DraftingConfig::default()).is_empty());
    }

    #[test]
    fn test_fillet_arc_between_straight_edges() {
        // Straight edge, 120° arc of 8 segments, then a tangent straight edge
        let arc = polygon(-5.0, 0.0, 5.0, 8, 0.0, 120.0, false);
        let end = arc[arc.len() - 1];
        let t = 120f64.to_radians();
        let tangent = (-t.sin(), t.cos());
        let mut pts = vec![Point2D::new(0.0, -50.0)];
        pts.extend(arc);
        pts.push(Point2D::new(end.x + 40.0 * tangent.0, end.y + 40.0 * tangent.1));
        let mut view = ProjectedView::new(ViewDirection::Front);
        add_path(&mut view, &pts, false, EdgeClass::Silhouette);

        let circles = detect_circles(&view, &DraftingConfig::default());
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].kind, CircleKind::Arc);
        assert_abs_diff_eq!(circles[0].radius, 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(circles[0].center.x, -5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_shallow_arc_not_reported() {
        let arc = polygon(0.0, 0.0, 20.0, 6, 0.0, 45.0, false);
        let mut view = ProjectedView::new(ViewDirection::Front);
        add_path(&mut view, &arc, false, EdgeClass::Visible);
        assert!(detect_circles(&view, &DraftingConfig::default()).is_empty());
    }

    #[test]
    fn test_empty_view() {
        let view = ProjectedView::new(ViewDirection::Front);
        assert!(detect_circles(&view, &DraftingConfig::default()).is_empty());
    }
}
