//! The solar-system distance field
//!
//! Composition, with the fusion order fixed:
//!
//! ```text
//! planets = smin(.., planet_i ∪ ring, 0.5)   for i in 0..8
//! moons   = smin(.., moon_ij,         0.3)   planet-major
//! scene   = smin(smin(sun, planets, 0.8), moons, 0.5)
//! ```

use crate::orbit::{
    MAX_MOONS, PLANET_COUNT, RING_PLANET, moon_count, moon_position, moon_size, planet_position,
    planet_size,
};
use crate::sdf::{Sdf, smooth_min, sphere_distance, torus_distance};
use glam::Vec3;

/// Radius of the sun at the origin
pub const SUN_RADIUS: f32 = 0.5;

/// Ring torus major radius, around the ringed planet's center
pub const RING_MAJOR_RADIUS: f32 = 0.4;

/// Ring torus tube radius
pub const RING_MINOR_RADIUS: f32 = 0.03;

/// Blend radius between consecutive planets
pub const PLANET_BLEND: f32 = 0.5;

/// Blend radius between consecutive moons
pub const MOON_BLEND: f32 = 0.3;

/// Blend radius between the sun and the planet group
pub const SUN_PLANET_BLEND: f32 = 0.8;

/// Blend radius between the sun+planets group and the moon group
pub const MOON_GROUP_BLEND: f32 = 0.5;

/// Seed for the running minimums, effectively +infinity
pub const FAR_SENTINEL: f32 = 1e10;

/// A moon frozen at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonState {
    pub position: Vec3,
    pub radius: f32,
}

/// A planet (and its moons) frozen at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetState {
    pub position: Vec3,
    pub radius: f32,
    pub has_ring: bool,
    moons: [MoonState; MAX_MOONS],
    moon_count: usize,
}

impl PlanetState {
    fn at(index: usize, time: f32) -> Self {
        let position = planet_position(index, time);
        let radius = planet_size(index);
        let moon_count = moon_count(index).min(MAX_MOONS);

        let mut moons = [MoonState {
            position,
            radius: 0.0,
        }; MAX_MOONS];
        for (m, moon) in moons.iter_mut().enumerate().take(moon_count) {
            *moon = MoonState {
                position: moon_position(position, radius, m, time),
                radius: moon_size(radius, m),
            };
        }

        Self {
            position,
            radius,
            has_ring: index == RING_PLANET,
            moons,
            moon_count,
        }
    }

    /// Moons of this planet, in index order
    pub fn moons(&self) -> &[MoonState] {
        &self.moons[..self.moon_count]
    }

    /// Unblended distance to the planet sphere
    pub fn sphere_distance(&self, p: Vec3) -> f32 {
        sphere_distance(p - self.position, self.radius)
    }

    /// Unblended distance to the ring, if this planet has one
    pub fn ring_distance(&self, p: Vec3) -> Option<f32> {
        self.has_ring
            .then(|| torus_distance(p - self.position, RING_MAJOR_RADIUS, RING_MINOR_RADIUS))
    }
}

/// Every body transform of the scene evaluated for one frame time.
///
/// Body positions depend only on time, so a frame computes them once and
/// reuses them for every field sample instead of re-deriving them per point.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    time: f32,
    planets: [PlanetState; PLANET_COUNT],
}

impl SceneSnapshot {
    /// Freeze the scene at `time`
    pub fn at(time: f32) -> Self {
        Self {
            time,
            planets: std::array::from_fn(|i| PlanetState::at(i, time)),
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn planets(&self) -> &[PlanetState; PLANET_COUNT] {
        &self.planets
    }

    /// Blended distance to the planet group (rings included)
    pub fn planets_distance(&self, p: Vec3) -> f32 {
        self.planets.iter().fold(FAR_SENTINEL, |acc, planet| {
            let mut d = planet.sphere_distance(p);
            if let Some(ring) = planet.ring_distance(p) {
                d = d.min(ring);
            }
            smooth_min(acc, d, PLANET_BLEND)
        })
    }

    /// Blended distance to all moons
    pub fn moons_distance(&self, p: Vec3) -> f32 {
        self.planets
            .iter()
            .flat_map(|planet| planet.moons())
            .fold(FAR_SENTINEL, |acc, moon| {
                smooth_min(acc, sphere_distance(p - moon.position, moon.radius), MOON_BLEND)
            })
    }

    /// Distance to the sun
    pub fn sun_distance(&self, p: Vec3) -> f32 {
        sphere_distance(p, SUN_RADIUS)
    }
}

impl Sdf for SceneSnapshot {
    fn distance(&self, p: Vec3) -> f32 {
        let sun_and_planets =
            smooth_min(self.sun_distance(p), self.planets_distance(p), SUN_PLANET_BLEND);
        smooth_min(sun_and_planets, self.moons_distance(p), MOON_GROUP_BLEND)
    }
}

/// Scene distance at `point` for frame `time`.
///
/// Convenience form of [`SceneSnapshot`] for one-off queries; renderers
/// should build the snapshot once per frame.
pub fn scene_distance(point: Vec3, time: f32) -> f32 {
    SceneSnapshot::at(time).distance(point)
}
