#![warn(missing_docs)]

//! Dimension generation for orthographic drawings.
//!
//! Takes projected views and the datum frame from `orthodraft-drafting` and
//! produces the final, renderable [`Dimension`] list:
//!
//! 1. [`generate_candidates`] proposes overall, step, hole and datum-reference candidates
//! 2. [`place_dimensions`] stacks them outside the view by priority
//! 3. [`optimize_dimensions`] refines the stack by simulated annealing
//! 4. [`dedup_and_filter`] collapses duplicates and caps each view
//!
//! [`apply_corrections`] edits the result afterwards on behalf of an
//! external review step.

pub mod candidates;
pub mod config;
pub mod corrections;
pub mod dedup;
pub mod error;
pub mod layout;
pub mod placer;
pub mod types;

pub use candidates::{
    datum_reference_candidate, feature_candidates, generate_candidates, hole_candidates, overall_candidates,
};
pub use config::{CandidateConfig, FilterConfig, LayoutConfig, PlacementConfig};
pub use corrections::{apply_corrections, Correction, CorrectionAction, CorrectionReport};
pub use dedup::{dedup_and_filter, dedup_dimensions, filter_per_view};
pub use error::{DimensionError, Result};
pub use layout::{optimize, optimize_dimensions, LayoutDimension, LayoutStats};
pub use placer::{place_dimensions, stack_coordinate};
pub use types::{
    CandidateKind, Dimension, DimensionCandidate, DimensionPosition, DimensionTolerance, DimensionType,
    Orientation, Segment2D, Unit,
};
