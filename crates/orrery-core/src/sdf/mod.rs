//! Signed Distance Functions (SDF) for the scene geometry
//!
//! SDFs represent shapes as mathematical functions that return the distance
//! from any point in space to the nearest surface. Negative values are inside,
//! positive values are outside, and zero is exactly on the surface.
//!
//! ## Example
//!
//! ```rust
//! use orrery_core::sdf::{Sdf, SmoothUnion, Sphere, Torus};
//! use glam::Vec3;
//!
//! let ringed = SmoothUnion::new(Sphere::new(0.35), Torus::new(0.4, 0.03), 0.1);
//! assert!(ringed.distance(Vec3::ZERO) < 0.0);
//! ```

pub mod normal;
pub mod operations;
pub mod primitives;

use glam::Vec3;

/// The core SDF trait - any type that can compute distance from a point
pub trait Sdf: Send + Sync {
    /// Calculate the signed distance from point `p` to the surface.
    ///
    /// - Returns negative values for points inside the shape
    /// - Returns positive values for points outside the shape
    /// - Returns zero for points exactly on the surface
    fn distance(&self, p: Vec3) -> f32;
}

impl<S: Sdf + ?Sized> Sdf for &S {
    fn distance(&self, p: Vec3) -> f32 {
        (**self).distance(p)
    }
}

// Re-exports
pub use normal::{NORMAL_EPSILON, estimate_normal};
pub use operations::*;
pub use primitives::*;
