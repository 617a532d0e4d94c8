#![warn(missing_docs)]

//! Math types for the orthodraft drawing pipeline.
//!
//! Thin wrappers around nalgebra providing the point and vector types
//! used throughout the pipeline, plus the numeric guards every stage
//! relies on to degrade gracefully on degenerate input.

use nalgebra::{Vector2, Vector3};

/// A point in 3D model space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D model space.
pub type Vec3 = Vector3<f64>;

/// A point in a 2D view plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in a 2D view plane.
pub type Vec2 = Vector2<f64>;

/// Lengths below this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Normalize `v`, returning the zero vector when `v` has (near) zero length.
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    let len = v.norm();
    if len < NORMALIZE_EPSILON {
        Vec3::zeros()
    } else {
        v / len
    }
}

/// Return `denominator`, or `fallback` when `denominator` is too close to zero
/// to divide by safely.
pub fn guarded_divisor(denominator: f64, fallback: f64) -> f64 {
    if denominator.abs() < NORMALIZE_EPSILON || !denominator.is_finite() {
        fallback
    } else {
        denominator
    }
}

/// Quantize a coordinate to an integer key at `decimals` decimal places.
///
/// Two values that agree after rounding to `decimals` places map to the
/// same key, which makes the key usable in hash maps.
pub fn quantize(value: f64, decimals: u32) -> i64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() as i64
}

/// Quantize a 3D point component-wise (see [`quantize`]).
pub fn quantize_point(p: &Point3, decimals: u32) -> (i64, i64, i64) {
    (
        quantize(p.x, decimals),
        quantize(p.y, decimals),
        quantize(p.z, decimals),
    )
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in model units.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
