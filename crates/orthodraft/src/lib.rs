#![warn(missing_docs)]

//! orthodraft: dimensioned orthographic drawings from triangle meshes.
//!
//! The pipeline rebuilds the edge graph of a mesh, projects it into the
//! requested standard views with hidden-line classification, picks a datum
//! reference frame, and lays out a ranked, non-overlapping set of
//! dimensions for each view.
//!
//! # Example
//!
//! ```rust,no_run
//! use orthodraft::{generate_drawing, DrawingConfig};
//! use orthodraft::mesh::{BoundingBox3, TriangleMesh};
//! use orthodraft::math::Point3;
//!
//! let max = Point3::new(50.0, 30.0, 20.0);
//! let mesh = TriangleMesh::axis_aligned_box(Point3::origin(), max);
//! let bbox = BoundingBox3::new(Point3::origin(), max);
//! let drawing = generate_drawing(&mesh, &bbox, &DrawingConfig::default()).unwrap();
//! for dim in &drawing.dimensions {
//!     println!("{} {} {}", dim.id, dim.view, dim.label);
//! }
//! ```

pub mod assist;
pub mod config;
pub mod error;
pub mod import;
pub mod pipeline;

pub use assist::{
    parse_suggestions, ChatMessage, DimensionSuggestion, SuggestionError, SuggestionRequest, SuggestionResponse,
    TitleBlock,
};
pub use config::DrawingConfig;
pub use error::{DrawingError, Result};
pub use import::{DrawingGenerator, JsonMeshImporter, MeshImporter};
pub use pipeline::{generate_drawing, Drawing, ViewDrawing};

pub use orthodraft_dimension as dimension;
pub use orthodraft_drafting as drafting;
pub use orthodraft_math as math;
pub use orthodraft_mesh as mesh;
