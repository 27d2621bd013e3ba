//! Sphere tracing

use crate::settings::MarchSettings;
use glam::Vec3;
use orrery_core::sdf::Sdf;

/// Outcome of tracing one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarchResult {
    /// The field dropped below the surface threshold after traveling
    /// `distance` along the ray
    Hit { distance: f32, steps: u32 },
    /// The ray left the scene or ran out of steps
    Miss { distance: f32, steps: u32 },
}

impl MarchResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Distance traveled along the ray
    pub fn distance(&self) -> f32 {
        match *self {
            Self::Hit { distance, .. } | Self::Miss { distance, .. } => distance,
        }
    }

    /// Number of field evaluations spent
    pub fn steps(&self) -> u32 {
        match *self {
            Self::Hit { steps, .. } | Self::Miss { steps, .. } => steps,
        }
    }

    /// Surface point for a hit
    pub fn hit_point(&self, origin: Vec3, dir: Vec3) -> Option<Vec3> {
        match *self {
            Self::Hit { distance, .. } => Some(origin + dir * distance),
            Self::Miss { .. } => None,
        }
    }
}

/// Trace a ray from `origin` along unit `dir` through `field`.
///
/// Each step samples the field and advances by `relaxation` times the sampled
/// distance. The ray hits when a sample falls below `surface_epsilon` (the hit
/// distance is where that sample was taken) and misses once the traveled
/// distance exceeds `max_distance` or `max_steps` samples are used up.
pub fn march<S: Sdf + ?Sized>(
    field: &S,
    origin: Vec3,
    dir: Vec3,
    settings: &MarchSettings,
) -> MarchResult {
    let mut traveled = 0.0;

    for step in 1..=settings.max_steps {
        let d = field.distance(origin + dir * traveled);

        if d < settings.surface_epsilon {
            return MarchResult::Hit {
                distance: traveled,
                steps: step,
            };
        }

        traveled += d * settings.relaxation;
        if traveled > settings.max_distance {
            return MarchResult::Miss {
                distance: traveled,
                steps: step,
            };
        }
    }

    MarchResult::Miss {
        distance: traveled,
        steps: settings.max_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use orrery_core::sdf::Sphere;

    struct Constant(f32);

    impl Sdf for Constant {
        fn distance(&self, _p: Vec3) -> f32 {
            self.0
        }
    }

    #[test]
    fn hits_unit_sphere_head_on() {
        let settings = MarchSettings::default();
        let result = march(
            &Sphere::new(1.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::NEG_Z,
            &settings,
        );

        assert!(result.is_hit());
        // Under-relaxed steps converge from outside
        assert!(result.distance() <= 4.0 + 1e-5);
        assert!(result.distance() > 4.0 - settings.surface_epsilon / 0.8 - 1e-4);
        assert!(result.steps() <= settings.max_steps);
    }

    #[test]
    fn surface_point_is_within_threshold() {
        let settings = MarchSettings::default();
        let sphere = Sphere::new(1.0);
        let origin = Vec3::new(3.0, 0.0, 0.0);
        let result = march(&sphere, origin, Vec3::NEG_X, &settings);

        let p = result.hit_point(origin, Vec3::NEG_X);
        let p = p.unwrap_or(Vec3::ZERO);
        assert!(sphere.distance(p) < settings.surface_epsilon);
        assert!(sphere.distance(p) > -1e-5);
    }

    #[test]
    fn starting_inside_is_an_immediate_hit() {
        let result = march(
            &Sphere::new(1.0),
            Vec3::ZERO,
            Vec3::X,
            &MarchSettings::default(),
        );
        assert_eq!(result, MarchResult::Hit { distance: 0.0, steps: 1 });
    }

    #[test]
    fn ray_pointing_away_leaves_the_scene() {
        let result = march(
            &Sphere::new(1.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::Z,
            &MarchSettings::default(),
        );
        assert!(!result.is_hit());
        assert!(result.distance() > 40.0);
        assert!(result.hit_point(Vec3::ZERO, Vec3::Z).is_none());
    }

    #[test]
    fn step_budget_is_a_hard_cap() {
        // 40 steps of 0.4 only reach 16 units: out of steps, not out of range
        let result = march(
            &Constant(0.5),
            Vec3::ZERO,
            Vec3::X,
            &MarchSettings::default(),
        );
        assert_eq!(result.steps(), 40);
        assert!(!result.is_hit());
        assert_relative_eq!(result.distance(), 16.0, epsilon = 1e-3);
    }

    #[test]
    fn one_huge_step_aborts() {
        let result = march(
            &Constant(1e6),
            Vec3::ZERO,
            Vec3::X,
            &MarchSettings::default(),
        );
        assert_eq!(result.steps(), 1);
        assert!(!result.is_hit());
    }

    #[test]
    fn nan_field_never_hits() {
        let result = march(
            &Constant(f32::NAN),
            Vec3::ZERO,
            Vec3::X,
            &MarchSettings::default(),
        );
        assert!(!result.is_hit());
    }
}
