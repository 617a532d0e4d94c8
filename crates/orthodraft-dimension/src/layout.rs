//! Simulated-annealing layout refinement.
//!
//! Each dimension may slide along a single axis (perpendicular to the
//! direction it measures). The energy of a dimension sums:
//!
//! - footprint overlap area with every other dimension in the view
//! - linear penalty for spacing below the minimum to same-orientation dimensions
//! - linear penalty for sticking out past the view bounds plus a margin
//! - distance from its ideal stacked row
//!
//! A move is kept when it lowers that dimension's energy, or otherwise with
//! probability `exp(-ΔE / T)`. The result is a local improvement only.

use orthodraft_drafting::{BoundingBox2D, Point2D};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{LayoutConfig, PlacementConfig};
use crate::placer::stack_coordinate;
use crate::types::{Dimension, Orientation, Segment2D};

/// Working state of one dimension during optimization.
#[derive(Debug, Clone)]
pub struct LayoutDimension {
    /// Measuring direction.
    pub orientation: Orientation,
    /// Measured geometry (fixed).
    pub anchor: Segment2D,
    /// Center of the dimension line; moves along one axis only.
    pub position: Point2D,
    /// Approximate text footprint (width, height).
    pub text_size: (f64, f64),
    /// Stacking row within its orientation.
    pub stack_index: usize,
    /// Ideal value of the movable coordinate for `stack_index`.
    pub ideal: f64,
}

impl LayoutDimension {
    /// The coordinate this dimension is allowed to move along.
    pub fn offset(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.position.y,
            Orientation::Vertical => self.position.x,
        }
    }

    fn set_offset(&mut self, value: f64) {
        match self.orientation {
            Orientation::Horizontal => self.position.y = value,
            Orientation::Vertical => self.position.x = value,
        }
    }

    /// Box covered by the dimension line and its text.
    pub fn footprint(&self) -> BoundingBox2D {
        let (text_w, text_h) = self.text_size;
        match self.orientation {
            Orientation::Horizontal => {
                let lo = self.anchor.start.x.min(self.anchor.end.x);
                let hi = self.anchor.start.x.max(self.anchor.end.x);
                let half = ((hi - lo).max(text_w)) / 2.0;
                let mid = (lo + hi) / 2.0;
                BoundingBox2D::new(mid - half, self.position.y - text_h / 2.0, mid + half, self.position.y + text_h / 2.0)
            }
            Orientation::Vertical => {
                let lo = self.anchor.start.y.min(self.anchor.end.y);
                let hi = self.anchor.start.y.max(self.anchor.end.y);
                let half = ((hi - lo).max(text_w)) / 2.0;
                let mid = (lo + hi) / 2.0;
                BoundingBox2D::new(self.position.x - text_h / 2.0, mid - half, self.position.x + text_h / 2.0, mid + half)
            }
        }
    }
}

/// Energy bookkeeping from one optimizer run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutStats {
    /// Total energy before the first sweep.
    pub initial_energy: f64,
    /// Total energy after the last sweep.
    pub final_energy: f64,
    /// Accepted moves.
    pub accepted: usize,
    /// Rejected (reverted) moves.
    pub rejected: usize,
}

/// Energy of dimension `i` against the rest of the layout.
pub fn dimension_energy(dims: &[LayoutDimension], i: usize, bounds: &BoundingBox2D, config: &LayoutConfig) -> f64 {
    let me = &dims[i];
    let footprint = me.footprint();
    let mut energy = 0.0;

    for (j, other) in dims.iter().enumerate() {
        if j == i {
            continue;
        }
        energy += config.overlap_weight * footprint.overlap_area(&other.footprint());
        if other.orientation == me.orientation {
            let gap = (me.offset() - other.offset()).abs();
            energy += config.spacing_weight * (config.min_spacing - gap).max(0.0);
        }
    }

    if bounds.is_valid() {
        energy += config.bounds_weight * bounds.expanded(config.bounds_margin).outside_distance(&footprint);
    }
    energy += config.ideal_weight * (me.offset() - me.ideal).abs();
    energy
}

/// Sum of per-dimension energies.
pub fn total_energy(dims: &[LayoutDimension], bounds: &BoundingBox2D, config: &LayoutConfig) -> f64 {
    (0..dims.len()).map(|i| dimension_energy(dims, i, bounds, config)).sum()
}

/// Refine positions in place by simulated annealing.
///
/// Runs `config.sweeps` sweeps; each sweep proposes one move per dimension.
/// The temperature starts at `initial_temperature` and is multiplied by
/// `cooling` after every sweep.
pub fn optimize<R: Rng>(
    dims: &mut [LayoutDimension],
    bounds: &BoundingBox2D,
    config: &LayoutConfig,
    rng: &mut R,
) -> LayoutStats {
    let mut stats = LayoutStats {
        initial_energy: total_energy(dims, bounds, config),
        ..Default::default()
    };
    if dims.is_empty() {
        return stats;
    }

    let mut temperature = config.initial_temperature;
    for _ in 0..config.sweeps {
        for i in 0..dims.len() {
            let before = dimension_energy(dims, i, bounds, config);
            let old = dims[i].offset();
            let delta = rng.gen_range(-config.max_step..=config.max_step);
            dims[i].set_offset(old + delta);
            let after = dimension_energy(dims, i, bounds, config);

            let change = after - before;
            let keep = change < 0.0 || rng.gen::<f64>() < (-change / temperature).exp();
            if keep {
                stats.accepted += 1;
            } else {
                dims[i].set_offset(old);
                stats.rejected += 1;
            }
        }
        temperature *= config.cooling;
    }

    stats.final_energy = total_energy(dims, bounds, config);
    stats
}

/// Working states for the placed dimensions of one view.
///
/// Orientation comes from each dimension line; stack rows are assigned per
/// orientation in slice order, matching the placer.
pub fn layout_dimensions(
    dims: &[Dimension],
    bounds: &BoundingBox2D,
    placement: &PlacementConfig,
) -> Vec<LayoutDimension> {
    let mut rows = [0usize; 2];
    dims.iter()
        .map(|d| {
            let orientation = d.orientation();
            let slot = match orientation {
                Orientation::Horizontal => 0,
                Orientation::Vertical => 1,
            };
            let stack_index = rows[slot];
            rows[slot] += 1;
            LayoutDimension {
                orientation,
                anchor: d.position.anchor,
                position: d.position.line.midpoint(),
                text_size: (d.label.chars().count() as f64 * placement.char_width, placement.text_height),
                stack_index,
                ideal: stack_coordinate(bounds, orientation, stack_index, placement),
            }
        })
        .collect()
}

/// RNG for a layout run: seeded when `seed` is set, otherwise from entropy.
pub fn layout_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Optimize the placed dimensions of one view in place.
///
/// `bounds` are the view bounds in drawing units. Dimension lines and text
/// follow the optimized offsets; anchors are untouched.
pub fn optimize_dimensions(
    dims: &mut [Dimension],
    bounds: &BoundingBox2D,
    placement: &PlacementConfig,
    config: &LayoutConfig,
    seed: Option<u64>,
) -> LayoutStats {
    let mut working = layout_dimensions(dims, bounds, placement);
    let mut rng = layout_rng(seed);
    let stats = optimize(&mut working, bounds, config, &mut rng);

    for (dim, state) in dims.iter_mut().zip(&working) {
        let current = dim.position.line.midpoint();
        dim.position
            .shift(state.position.x - current.x, state.position.y - current.y);
    }

    tracing::debug!(
        dimensions = dims.len(),
        initial_energy = stats.initial_energy,
        final_energy = stats.final_energy,
        accepted = stats.accepted,
        rejected = stats.rejected,
        "optimized dimension layout"
    );

    stats
}
