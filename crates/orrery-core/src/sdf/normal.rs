//! Surface normals from the field gradient

use super::Sdf;
use glam::Vec3;

/// Step used for the central differences
pub const NORMAL_EPSILON: f32 = 0.01;

/// Estimate the surface normal at `p` as the normalized central-difference
/// gradient of `field` (six evaluations).
///
/// A flat or non-finite gradient has no direction; `Vec3::Y` is returned so
/// shading stays finite.
pub fn estimate_normal<S: Sdf + ?Sized>(field: &S, p: Vec3) -> Vec3 {
    let ex = Vec3::new(NORMAL_EPSILON, 0.0, 0.0);
    let ey = Vec3::new(0.0, NORMAL_EPSILON, 0.0);
    let ez = Vec3::new(0.0, 0.0, NORMAL_EPSILON);

    let gradient = Vec3::new(
        field.distance(p + ex) - field.distance(p - ex),
        field.distance(p + ey) - field.distance(p - ey),
        field.distance(p + ez) - field.distance(p - ez),
    );

    gradient.try_normalize().unwrap_or(Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::{Sphere, Torus};
    use approx::assert_relative_eq;

    struct Flat;

    impl Sdf for Flat {
        fn distance(&self, _p: Vec3) -> f32 {
            1.0
        }
    }

    #[test]
    fn sphere_normal_points_outward() {
        let s = Sphere::new(1.0);
        let dir = Vec3::new(1.0, 2.0, -0.5).normalize();
        let n = estimate_normal(&s, dir);

        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-5);
        assert!(n.dot(dir) > 0.999);
    }

    #[test]
    fn torus_normal_on_top_points_up() {
        let t = Torus::new(0.4, 0.03);
        let n = estimate_normal(&t, Vec3::new(0.4, 0.03, 0.0));
        assert!(n.y > 0.99);
    }

    #[test]
    fn degenerate_gradient_falls_back_to_unit_vector() {
        let n = estimate_normal(&Flat, Vec3::new(3.0, -1.0, 2.0));
        assert_eq!(n, Vec3::Y);
        assert!(n.is_finite());
    }
}
