#![warn(missing_docs)]

//! Triangle mesh input types for the orthodraft drawing pipeline.
//!
//! The mesh is produced by an external CAD import component and handed
//! to the pipeline read-only. This crate provides the flat-buffer mesh
//! representation, per-triangle accessors that tolerate malformed index
//! buffers, and the axis-aligned bounding box consumed by the dimension
//! generator.

pub mod bbox;
pub mod mesh;

pub use bbox::{Axis, BoundingBox3};
pub use mesh::{Triangle3D, TriangleMesh};
