#![warn(missing_docs)]

//! Orthographic drafting stages for the orthodraft pipeline.
//!
//! Turns a read-only triangle mesh into per-view line drawings and a datum
//! reference frame:
//!
//! - [`extract_edges`] rebuilds the shared-edge graph from a triangle soup
//! - [`classify_edge`] labels each edge for a view direction
//! - [`project_edges`] projects the drawn edges and detects circles
//! - [`cluster_planar_faces`] and [`select_datums`] find datums A, B and C
//! - [`summarize_features`] reports holes, fillets, chamfers and surfaces
//!
//! # Example
//!
//! ```ignore
//! use orthodraft_drafting::{project_mesh, DraftingConfig, ViewDirection};
//!
//! let config = DraftingConfig::default();
//! let front = project_mesh(&mesh, ViewDirection::Front, &config);
//! println!("{} edges, scale {}", front.edges.len(), front.scale);
//! ```

pub mod circles;
pub mod config;
pub mod datum;
pub mod edge_extract;
pub mod error;
pub mod features;
pub mod planar;
pub mod projection;
pub mod types;
pub mod visibility;

pub use circles::{chain_edges, detect_circles, fit_circle, Polyline2D};
pub use config::DraftingConfig;
pub use datum::{select_datums, DatumFeature, DatumSlot};
pub use edge_extract::{extract_edges, face_normals};
pub use error::{DraftingError, Result};
pub use features::{summarize_features, FeatureSummary};
pub use planar::{cluster_planar_faces, PlanarFace};
pub use projection::{display_scale, project_edges, project_mesh, ViewBasis};
pub use types::{
    BoundingBox2D, Circle2D, CircleKind, EdgeClass, MeshEdge, Point2D, ProjectedEdge, ProjectedView,
    ViewDirection,
};
pub use visibility::{classify_edge, classify_faces, ClassifyParams};
