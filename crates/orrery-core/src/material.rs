//! Body identification and base colors
//!
//! Blended distances cannot be attributed to a single body, so surface
//! points are classified with a second, unblended nearest-surface search over
//! the same geometry the field uses.

use crate::orbit::PLANET_COUNT;
use crate::scene::{FAR_SENTINEL, SceneSnapshot};
use crate::sdf::sphere_distance;
use glam::Vec3;

/// Points closer than this to the origin belong to the sun
pub const SUN_CLASSIFY_RADIUS: f32 = 0.6;

/// Sun base color
pub const SUN_COLOR: Vec3 = Vec3::new(1.0, 0.7, 0.0);

/// Ring base color
pub const RING_COLOR: Vec3 = Vec3::new(0.9, 0.9, 0.7);

/// Planet base colors, indexed by planet
pub const PLANET_COLORS: [Vec3; PLANET_COUNT] = [
    Vec3::new(0.7, 0.5, 0.3),
    Vec3::new(0.9, 0.7, 0.3),
    Vec3::new(0.2, 0.5, 0.8),
    Vec3::new(0.9, 0.2, 0.1),
    Vec3::new(0.9, 0.6, 0.4),
    Vec3::new(0.9, 0.8, 0.3),
    Vec3::new(0.2, 0.6, 0.9),
    Vec3::new(0.1, 0.3, 0.8),
];

/// Color of a planet's first moon, indexed by planet
pub const MOON_COLORS: [Vec3; PLANET_COUNT] = [
    Vec3::splat(0.8),
    Vec3::splat(0.8),
    Vec3::splat(0.8),
    Vec3::splat(0.7),
    Vec3::new(0.9, 0.8, 0.6),
    Vec3::new(0.8, 0.8, 0.7),
    Vec3::new(0.6, 0.7, 0.8),
    Vec3::new(0.5, 0.6, 0.7),
];

/// Per-moon darkening applied to [`MOON_COLORS`], indexed by planet
pub const MOON_DARKENING: [f32; PLANET_COUNT] = [0.0, 0.0, 0.0, 0.05, 0.07, 0.05, 0.07, 0.1];

/// Fallback for planets outside the table
const UNKNOWN_PLANET_COLOR: Vec3 = Vec3::ONE;

/// Fallback for moons of planets outside the table
const UNKNOWN_MOON_COLOR: Vec3 = Vec3::splat(0.8);

/// Which body a surface point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Planet(usize),
    Ring(usize),
    Moon { planet: usize, moon: usize },
}

impl Body {
    /// Unlit color of the body
    pub fn base_color(self) -> Vec3 {
        match self {
            Self::Sun => SUN_COLOR,
            Self::Ring(_) => RING_COLOR,
            Self::Planet(i) => PLANET_COLORS.get(i).copied().unwrap_or(UNKNOWN_PLANET_COLOR),
            Self::Moon { planet, moon } => match (MOON_COLORS.get(planet), MOON_DARKENING.get(planet)) {
                (Some(&base), Some(&step)) => base - Vec3::splat(step * moon as f32),
                _ => UNKNOWN_MOON_COLOR,
            },
        }
    }

    /// Planet the body belongs to, `None` for the sun
    pub fn planet(self) -> Option<usize> {
        match self {
            Self::Sun => None,
            Self::Planet(i) | Self::Ring(i) | Self::Moon { planet: i, .. } => Some(i),
        }
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sun => write!(f, "sun"),
            Self::Planet(i) => write!(f, "planet {i}"),
            Self::Ring(i) => write!(f, "ring of planet {i}"),
            Self::Moon { planet, moon } => write!(f, "moon {moon} of planet {planet}"),
        }
    }
}

/// Identify the body whose surface is nearest to `point`.
///
/// Anything within [`SUN_CLASSIFY_RADIUS`] of the origin is the sun. Otherwise
/// planets, the ring and moons are visited in the same order as the distance
/// field; a later body only wins when strictly nearer, and the ring only wins
/// when it is nearer than its own planet as well.
pub fn classify(point: Vec3, scene: &SceneSnapshot) -> Body {
    if point.length() < SUN_CLASSIFY_RADIUS {
        return Body::Sun;
    }

    let mut nearest = FAR_SENTINEL;
    let mut body = Body::Sun;

    for (i, planet) in scene.planets().iter().enumerate() {
        let planet_d = planet.sphere_distance(point);

        match planet.ring_distance(point) {
            Some(ring_d) if ring_d < planet_d && ring_d < nearest => {
                nearest = ring_d;
                body = Body::Ring(i);
            }
            _ if planet_d < nearest => {
                nearest = planet_d;
                body = Body::Planet(i);
            }
            _ => {}
        }

        for (m, moon) in planet.moons().iter().enumerate() {
            let moon_d = sphere_distance(point - moon.position, moon.radius);
            if moon_d < nearest {
                nearest = moon_d;
                body = Body::Moon { planet: i, moon: m };
            }
        }
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::RING_PLANET;
    use crate::scene::RING_MAJOR_RADIUS;
    use approx::assert_relative_eq;

    #[test]
    fn points_near_origin_are_the_sun() {
        let scene = SceneSnapshot::at(0.0);
        assert_eq!(classify(Vec3::ZERO, &scene), Body::Sun);
        assert_eq!(classify(Vec3::new(0.0, 0.59, 0.0), &scene), Body::Sun);
        assert_eq!(classify(Vec3::new(0.5, 0.0, 0.0), &scene), Body::Sun);
    }

    #[test]
    fn planet_surface_is_classified_as_that_planet() {
        let scene = SceneSnapshot::at(20.0);
        for (i, planet) in scene.planets().iter().enumerate() {
            if planet.has_ring {
                continue;
            }
            // Point on the side of the planet facing away from the sun
            let outward = planet.position.normalize();
            let p = planet.position + outward * planet.radius;
            let body = classify(p, &scene);
            assert_eq!(body.planet(), Some(i), "{p} classified as {body}");
        }
    }

    #[test]
    fn ring_is_classified_separately_from_its_planet() {
        let scene = SceneSnapshot::at(20.0);
        let planet = &scene.planets()[RING_PLANET];

        let on_ring = planet.position + Vec3::new(RING_MAJOR_RADIUS, 0.0, 0.0);
        assert_eq!(classify(on_ring, &scene), Body::Ring(RING_PLANET));

        let on_pole = planet.position + Vec3::new(0.0, planet.radius, 0.0);
        assert_eq!(classify(on_pole, &scene), Body::Planet(RING_PLANET));
    }

    #[test]
    fn moon_surface_is_classified_as_moon() {
        let scene = SceneSnapshot::at(20.0);
        let planet = &scene.planets()[4];
        let moon = planet.moons()[2];

        assert_eq!(
            classify(moon.position, &scene),
            Body::Moon { planet: 4, moon: 2 }
        );
    }

    #[test]
    fn colors_follow_table() {
        assert_eq!(Body::Sun.base_color(), Vec3::new(1.0, 0.7, 0.0));
        assert_eq!(Body::Planet(3).base_color(), Vec3::new(0.9, 0.2, 0.1));
        assert_eq!(Body::Ring(5).base_color(), Vec3::new(0.9, 0.9, 0.7));
        assert_eq!(Body::Planet(42).base_color(), Vec3::ONE);
        assert_eq!(Body::Moon { planet: 42, moon: 0 }.base_color(), Vec3::splat(0.8));
    }

    #[test]
    fn moons_darken_by_index() {
        let first = Body::Moon { planet: 7, moon: 0 }.base_color();
        let second = Body::Moon { planet: 7, moon: 1 }.base_color();
        assert_relative_eq!(first.x - second.x, 0.1, epsilon = 1e-6);
        assert_relative_eq!(first.z - second.z, 0.1, epsilon = 1e-6);

        let m4 = Body::Moon { planet: 4, moon: 3 }.base_color();
        assert_relative_eq!(m4.x, 0.9 - 0.21, epsilon = 1e-6);

        // The single moon of planet 2 does not darken
        assert_eq!(Body::Moon { planet: 2, moon: 0 }.base_color(), Vec3::splat(0.8));
    }

    #[test]
    fn display_names() {
        assert_eq!(Body::Sun.to_string(), "sun");
        assert_eq!(Body::Ring(5).to_string(), "ring of planet 5");
        assert_eq!(Body::Moon { planet: 3, moon: 1 }.to_string(), "moon 1 of planet 3");
    }
}
