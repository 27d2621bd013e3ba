//! Orbital kinematics
//!
//! Body positions are closed-form functions of elapsed time. The motion is a
//! scripted one-shot sequence rather than a simulation:
//!
//! ```text
//!  t:  0 ──── 5 ─────────────── 40 ──────── 50 ──────────▶
//!      expand   steady orbit      contract    idle jitter
//! ```

use glam::Vec3;

/// Number of planets in the system
pub const PLANET_COUNT: usize = 8;

/// Hard cap on the moons considered per planet
pub const MAX_MOONS: usize = 5;

/// The planet that carries a ring
pub const RING_PLANET: usize = 5;

/// Moons per planet, indexed by planet
pub const MOON_COUNTS: [usize; PLANET_COUNT] = [0, 0, 1, 2, 4, 5, 3, 2];

/// Time over which orbits grow from the origin to full radius
pub const EXPAND_DURATION: f32 = 5.0;

/// Time at which planets start falling back to the origin
pub const CONTRACT_START: f32 = 40.0;

/// Length of the contraction window
pub const CONTRACT_DURATION: f32 = 10.0;

/// Time after which the collapsed planets idle with a small jitter
pub const IDLE_START: f32 = CONTRACT_START + CONTRACT_DURATION;

/// Amplitude of the idle jitter on each axis
pub const JITTER_AMPLITUDE: f32 = 0.1;

/// Stage of the scripted animation at a given time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitPhase {
    /// Orbits growing from the origin (`t < 5`)
    Expanding,
    /// Full-radius orbits (`5 <= t < 40`)
    Orbiting,
    /// Planets collapsing toward the origin (`40 <= t <= 50`)
    Contracting,
    /// Collapsed planets jittering around the origin (`t > 50`)
    Idle,
}

impl OrbitPhase {
    pub fn at(time: f32) -> Self {
        if time < EXPAND_DURATION {
            Self::Expanding
        } else if time < CONTRACT_START {
            Self::Orbiting
        } else if time <= IDLE_START {
            Self::Contracting
        } else {
            Self::Idle
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Expanding => "expanding",
            Self::Orbiting => "orbiting",
            Self::Contracting => "contracting",
            Self::Idle => "idle",
        }
    }
}

impl std::fmt::Display for OrbitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of moons listed for a planet. Unknown planets have none.
///
/// This is the raw table value; traversals additionally cap it at [`MAX_MOONS`].
pub fn moon_count(planet: usize) -> usize {
    MOON_COUNTS.get(planet).copied().unwrap_or(0)
}

/// Radius of planet `index`
#[inline]
pub fn planet_size(index: usize) -> f32 {
    0.2 + index as f32 * 0.03
}

/// Radius of moon `moon` orbiting a planet of radius `planet_size`
#[inline]
pub fn moon_size(planet_size: f32, moon: usize) -> f32 {
    planet_size * 0.2 + moon as f32 * 0.01
}

/// Position of planet `index` at `time`.
pub fn planet_position(index: usize, time: f32) -> Vec3 {
    let i = index as f32;
    let orbit_radius = 2.0 + i * 0.5;
    let orbit_speed = 1.0 / (1.0 + i * 0.2);
    let angle = time * orbit_speed;

    let inclination_x = (i * 0.8).sin() * 1.2;
    let inclination_z = (i * 0.9).cos() * 1.2;

    let transition = (time / EXPAND_DURATION).clamp(0.0, 1.0);
    let radius = orbit_radius * transition;
    let (sin, cos) = angle.sin_cos();

    if time < CONTRACT_START {
        return Vec3::new(
            cos * radius,
            sin * inclination_x * transition,
            sin * radius * inclination_z,
        );
    }

    // The ramp has long finished here, so the vertical offset is unscaled
    let orbit = Vec3::new(cos * radius, sin * inclination_x, sin * radius * inclination_z);
    let collapse = ((time - CONTRACT_START) / CONTRACT_DURATION).clamp(0.0, 1.0);
    let mut position = orbit.lerp(Vec3::ZERO, collapse);

    if time > IDLE_START {
        position += JITTER_AMPLITUDE
            * Vec3::new(
                (time + i * 0.5).sin(),
                (time * 0.3 + i * 0.7).cos(),
                (time * 0.2 + i * 0.9).sin(),
            );
    }

    position
}

/// Position of moon `moon` around a planet at `planet_pos` with radius
/// `planet_size`.
pub fn moon_position(planet_pos: Vec3, planet_size: f32, moon: usize, time: f32) -> Vec3 {
    let m = moon as f32;
    let orbit_radius = planet_size * 2.0 + m * 0.15;
    let speed = 3.0 - m * 0.2;
    let inclination_x = (m * 1.5).sin() * 0.8;
    let inclination_z = (m * 1.7).cos() * 0.8;
    // Phase offset keeps sibling moons from lining up
    let angle = time * speed + m * 7.0;
    let (sin, cos) = angle.sin_cos();

    planet_pos
        + Vec3::new(
            cos * orbit_radius,
            sin * inclination_x,
            sin * orbit_radius * inclination_z,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn all_planets_start_at_origin() {
        for i in 0..PLANET_COUNT {
            assert_eq!(planet_position(i, 0.0), Vec3::ZERO, "planet {i}");
        }
    }

    #[test]
    fn expansion_reaches_full_radius() {
        // Planet 0: no X inclination, Z inclination of 1.2
        let p = planet_position(0, 5.0);
        let angle = 5.0_f32;
        assert_relative_eq!(p.x, angle.cos() * 2.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, angle.sin() * 2.0 * 1.2, epsilon = 1e-5);
    }

    #[test]
    fn expansion_is_linear_in_time() {
        let half = planet_position(3, 2.5);
        let angle = 2.5 / (1.0 + 3.0 * 0.2);
        let radius = (2.0 + 1.5) * 0.5;
        assert_relative_eq!(half.x, f32::cos(angle) * radius, epsilon = 1e-5);
    }

    #[test]
    fn planets_are_away_from_origin_while_orbiting() {
        for i in 0..PLANET_COUNT {
            assert!(planet_position(i, 20.0).length() > 1.0, "planet {i}");
        }
    }

    #[test]
    fn contraction_starts_from_orbit_position() {
        for i in 0..PLANET_COUNT {
            let before = planet_position(i, CONTRACT_START - 1e-3);
            let at = planet_position(i, CONTRACT_START);
            assert!((before - at).length() < 1e-2, "planet {i} jumps at t=40");
        }
    }

    #[test]
    fn contraction_halfway_is_half_the_orbit() {
        let t = 45.0;
        let i = 2;
        let fi = i as f32;
        let angle = t / (1.0 + fi * 0.2);
        let orbit = Vec3::new(
            angle.cos() * (2.0 + fi * 0.5),
            angle.sin() * (fi * 0.8).sin() * 1.2,
            angle.sin() * (2.0 + fi * 0.5) * (fi * 0.9).cos() * 1.2,
        );
        let p = planet_position(i, t);
        assert_relative_eq!(p.x, orbit.x * 0.5, epsilon = 1e-4);
        assert_relative_eq!(p.y, orbit.y * 0.5, epsilon = 1e-4);
        assert_relative_eq!(p.z, orbit.z * 0.5, epsilon = 1e-4);
    }

    #[test]
    fn contraction_ends_at_origin() {
        for i in 0..PLANET_COUNT {
            assert!(planet_position(i, IDLE_START).length() < 1e-5, "planet {i}");
        }
    }

    #[test]
    fn idle_jitter_stays_bounded() {
        let bound = JITTER_AMPLITUDE * 3.0_f32.sqrt() + 1e-5;
        for step in 1..500 {
            let t = IDLE_START + step as f32 * 0.37;
            for i in 0..PLANET_COUNT {
                let len = planet_position(i, t).length();
                assert!(len <= bound, "planet {i} at t={t}: {len}");
                assert!(len <= 0.2);
            }
        }
    }

    #[test]
    fn idle_jitter_is_not_lockstep() {
        let t = 60.0;
        let a = planet_position(0, t);
        let b = planet_position(1, t);
        assert!((a - b).length() > 1e-3);
    }

    #[test]
    fn moon_count_table() {
        let counts: Vec<usize> = (0..PLANET_COUNT).map(moon_count).collect();
        assert_eq!(counts, vec![0, 0, 1, 2, 4, 5, 3, 2]);
        assert_eq!(moon_count(8), 0);
        assert_eq!(moon_count(usize::MAX), 0);
    }

    #[test]
    fn body_sizes() {
        assert_relative_eq!(planet_size(0), 0.2);
        assert_relative_eq!(planet_size(7), 0.41, epsilon = 1e-6);
        assert_relative_eq!(moon_size(0.35, 0), 0.07, epsilon = 1e-6);
        assert_relative_eq!(moon_size(0.35, 4), 0.11, epsilon = 1e-6);
    }

    #[test]
    fn moon_orbits_its_parent() {
        let parent = Vec3::new(1.0, 2.0, 3.0);
        let size = 0.3;
        for m in 0..MAX_MOONS {
            for step in 0..20 {
                let t = step as f32 * 0.9;
                let offset = moon_position(parent, size, m, t) - parent;
                let r = size * 2.0 + m as f32 * 0.15;
                // X is always cos*r; Y and Z are bounded by the inclinations
                assert!(offset.x.abs() <= r + 1e-5);
                assert!(offset.y.abs() <= 0.8 + 1e-5);
                assert!(offset.z.abs() <= r * 0.8 + 1e-5);
            }
        }
    }

    #[test]
    fn first_moon_starts_on_x_axis() {
        let p = moon_position(Vec3::ZERO, 0.25, 0, 0.0);
        assert_relative_eq!(p.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn phase_breakpoints() {
        assert_eq!(OrbitPhase::at(0.0), OrbitPhase::Expanding);
        assert_eq!(OrbitPhase::at(4.99), OrbitPhase::Expanding);
        assert_eq!(OrbitPhase::at(5.0), OrbitPhase::Orbiting);
        assert_eq!(OrbitPhase::at(39.9), OrbitPhase::Orbiting);
        assert_eq!(OrbitPhase::at(40.0), OrbitPhase::Contracting);
        assert_eq!(OrbitPhase::at(50.0), OrbitPhase::Contracting);
        assert_eq!(OrbitPhase::at(50.01), OrbitPhase::Idle);
        assert_eq!(OrbitPhase::Idle.to_string(), "idle");
    }
}
