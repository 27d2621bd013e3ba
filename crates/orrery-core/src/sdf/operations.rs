//! SDF Operations - hard and smooth unions

use super::Sdf;
use glam::Vec3;

/// Polynomial (cubic) smooth minimum of two distances.
///
/// Fuses two fields so that surfaces closer than `k` melt into each other
/// without a crease. When `|a - b| >= k` the result is exactly `a.min(b)`.
///
/// `k` must be strictly positive.
#[inline]
pub fn smooth_min(a: f32, b: f32, k: f32) -> f32 {
    debug_assert!(k > 0.0, "smooth_min blend radius must be positive, got {k}");
    let h = ((k - (a - b).abs()) / k).clamp(0.0, 1.0);
    a.min(b) - h * h * h * k / 6.0
}

// ============================================================================
// Boolean Operations
// ============================================================================

/// Union of two SDFs (combine shapes)
pub struct Union<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
}

impl<A: Sdf, B: Sdf> Union<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Sdf, B: Sdf> Sdf for Union<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        self.a.distance(p).min(self.b.distance(p))
    }
}

/// Smooth union with cubic blending over radius `k`
pub struct SmoothUnion<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
    pub k: f32,
}

impl<A: Sdf, B: Sdf> SmoothUnion<A, B> {
    pub fn new(a: A, b: B, k: f32) -> Self {
        Self { a, b, k }
    }
}

impl<A: Sdf, B: Sdf> Sdf for SmoothUnion<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        smooth_min(self.a.distance(p), self.b.distance(p), self.k)
    }
}
