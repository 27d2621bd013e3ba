//! SDF Primitive shapes
//!
//! All primitives are centered at the origin. Callers offset the query point
//! (`p - center`) to place them.

use super::Sdf;
use glam::{Vec2, Vec3};

/// Distance from `p` to a sphere of the given radius centered at the origin.
#[inline]
pub fn sphere_distance(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

/// Distance from `p` to a torus lying in the XZ plane.
///
/// `major_radius` is the distance from the center to the middle of the tube,
/// `minor_radius` the radius of the tube itself.
#[inline]
pub fn torus_distance(p: Vec3, major_radius: f32, minor_radius: f32) -> f32 {
    let q = Vec2::new(Vec2::new(p.x, p.z).length() - major_radius, p.y);
    q.length() - minor_radius
}

/// Sphere centered at origin
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Sdf for Sphere {
    fn distance(&self, p: Vec3) -> f32 {
        sphere_distance(p, self.radius)
    }
}

/// Torus (donut) lying in the XZ plane
#[derive(Debug, Clone, Copy)]
pub struct Torus {
    pub major_radius: f32,
    pub minor_radius: f32,
}

impl Torus {
    pub fn new(major_radius: f32, minor_radius: f32) -> Self {
        Self {
            major_radius,
            minor_radius,
        }
    }
}

impl Sdf for Torus {
    fn distance(&self, p: Vec3) -> f32 {
        torus_distance(p, self.major_radius, self.minor_radius)
    }
}
