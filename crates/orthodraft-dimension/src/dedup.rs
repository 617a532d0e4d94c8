//! Duplicate collapsing and per-view capping.

use std::collections::HashSet;

use orthodraft_drafting::ViewDirection;
use orthodraft_math::quantize;

use crate::config::FilterConfig;
use crate::types::{Dimension, DimensionType};

/// Drop dimensions whose (view, type, rounded value) was already seen.
///
/// The first occurrence wins, so callers should pass dimensions in
/// priority order. Orientation is not part of the key: a square outline
/// keeps only one of its two equal overall dimensions.
pub fn dedup_dimensions(dims: Vec<Dimension>, value_decimals: u32) -> Vec<Dimension> {
    let mut seen: HashSet<(ViewDirection, DimensionType, i64)> = HashSet::new();
    dims.into_iter()
        .filter(|d| seen.insert((d.view, d.dim_type, quantize(d.value, value_decimals))))
        .collect()
}

/// Keep at most `max_per_view` dimensions per view.
///
/// Within a view, critical dimensions come first, then larger values.
/// Views keep the order in which they first appear.
pub fn filter_per_view(dims: Vec<Dimension>, max_per_view: usize) -> Vec<Dimension> {
    let mut order: Vec<ViewDirection> = Vec::new();
    for d in &dims {
        if !order.contains(&d.view) {
            order.push(d.view);
        }
    }

    let mut groups: Vec<Vec<Dimension>> = vec![Vec::new(); order.len()];
    for d in dims {
        if let Some(slot) = order.iter().position(|v| *v == d.view) {
            groups[slot].push(d);
        }
    }

    groups
        .into_iter()
        .flat_map(|mut group| {
            group.sort_by(|a, b| b.critical.cmp(&a.critical).then(b.value.total_cmp(&a.value)));
            group.truncate(max_per_view);
            group
        })
        .collect()
}

/// Dedup followed by the per-view cap.
pub fn dedup_and_filter(dims: Vec<Dimension>, config: &FilterConfig) -> Vec<Dimension> {
    let total = dims.len();
    let unique = dedup_dimensions(dims, config.value_decimals);
    let duplicates = total - unique.len();
    let kept = filter_per_view(unique, config.max_per_view);

    tracing::debug!(
        total,
        duplicates,
        capped = total - duplicates - kept.len(),
        kept = kept.len(),
        "filtered dimensions"
    );

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DimensionPosition, Segment2D, Unit};
    use orthodraft_drafting::Point2D;

    fn dim(id: &str, view: ViewDirection, dim_type: DimensionType, value: f64, critical: bool) -> Dimension {
        let seg = Segment2D::new(Point2D::new(0.0, 0.0), Point2D::new(value, 0.0));
        Dimension {
            id: id.to_string(),
            dim_type,
            value,
            tolerance: None,
            unit: Unit::Millimeter,
            view,
            position: DimensionPosition {
                anchor: seg,
                line: seg,
                text: None,
            },
            label: String::new(),
            critical,
        }
    }

    fn sample() -> Vec<Dimension> {
        vec![
            dim("a", ViewDirection::Front, DimensionType::Linear, 50.0, true),
            dim("b", ViewDirection::Front, DimensionType::Linear, 50.04, false),
            dim("c", ViewDirection::Front, DimensionType::Diameter, 50.0, false),
            dim("d", ViewDirection::Top, DimensionType::Linear, 50.0, true),
            dim("e", ViewDirection::Front, DimensionType::Linear, 12.3, false),
            dim("f", ViewDirection::Front, DimensionType::Linear, 12.34, false),
        ]
    }

    fn ids(dims: &[Dimension]) -> Vec<&str> {
        dims.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_equal_width_and_height_collapse() {
        let width = dim("w", ViewDirection::Front, DimensionType::Linear, 10.0, true);
        let mut height = dim("h", ViewDirection::Front, DimensionType::Linear, 10.0, true);
        height.position.line = Segment2D::new(Point2D::new(0.0, 0.0), Point2D::new(0.0, 10.0));
        let kept = dedup_dimensions(vec![width, height], 1);
        assert_eq!(ids(&kept), vec!["w"]);
    }

    #[test]
    fn test_dedup_keeps_first_per_key() {
        let out = dedup_dimensions(sample(), 1);
        assert_eq!(ids(&out), vec!["a", "c", "d", "e"]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let once = dedup_dimensions(sample(), 1);
        let twice = dedup_dimensions(once.clone(), 1);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_respects_cap() {
        let mut dims = Vec::new();
        for i in 0..20 {
            dims.push(dim(&format!("f{i}"), ViewDirection::Front, DimensionType::Linear, i as f64, i % 5 == 0));
            dims.push(dim(&format!("r{i}"), ViewDirection::Right, DimensionType::Linear, i as f64, false));
        }
        for cap in [1, 3, 8] {
            let out = filter_per_view(dims.clone(), cap);
            for view in [ViewDirection::Front, ViewDirection::Right] {
                assert!(out.iter().filter(|d| d.view == view).count() <= cap);
            }
        }
    }

    #[test]
    fn test_filter_ranks_critical_then_value() {
        let dims = vec![
            dim("small", ViewDirection::Front, DimensionType::Linear, 5.0, false),
            dim("crit", ViewDirection::Front, DimensionType::Linear, 1.0, true),
            dim("big", ViewDirection::Front, DimensionType::Linear, 40.0, false),
        ];
        let out = filter_per_view(dims, 2);
        assert_eq!(ids(&out), vec!["crit", "big"]);
    }

    #[test]
    fn test_dedup_and_filter_is_idempotent() {
        let config = FilterConfig {
            max_per_view: 2,
            ..Default::default()
        };
        let once = dedup_and_filter(sample(), &config);
        let twice = dedup_and_filter(once.clone(), &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup_and_filter(Vec::new(), &FilterConfig::default()).is_empty());
    }
}
