//! Render settings
//!
//! Every tunable of the pixel pipeline in one serializable value. The defaults
//! reproduce the reference look; the CLI loads overrides from JSON and the
//! WGSL generator bakes the same numbers into the shader.

use crate::camera::Camera;
use crate::error::{RenderError, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Complete settings for one renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub camera: CameraSettings,
    pub march: MarchSettings,
    pub shading: ShadingSettings,
}

impl RenderSettings {
    /// Check that every number is finite.
    ///
    /// Settings are baked into generated WGSL, where `inf` and `NaN` are not
    /// valid literals.
    pub fn validate(&self) -> Result<()> {
        let vectors = [
            ("camera.eye", &self.camera.eye),
            ("camera.target", &self.camera.target),
            ("camera.up", &self.camera.up),
            ("shading.light_direction", &self.shading.light_direction),
            ("shading.background", &self.shading.background),
        ];
        let scalars = [
            ("march.max_distance", self.march.max_distance),
            ("march.surface_epsilon", self.march.surface_epsilon),
            ("march.relaxation", self.march.relaxation),
            ("shading.ambient", self.shading.ambient),
            ("shading.star_threshold", self.shading.star_threshold),
        ];

        let fields = vectors
            .into_iter()
            .flat_map(|(field, v)| v.iter().map(move |&value| (field, value)))
            .chain(scalars);

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(RenderError::NonFiniteSetting { field, value });
            }
        }
        Ok(())
    }
}

/// Fixed camera pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Eye position in world space
    pub eye: [f32; 3],
    /// Point the camera looks at
    pub target: [f32; 3],
    /// World up hint used to build the basis
    pub up: [f32; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye: [2.0, 3.5, 7.5],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

impl CameraSettings {
    /// Build the camera described by these settings
    pub fn camera(&self) -> Camera {
        Camera::look_at(Vec3::from(self.eye), Vec3::from(self.target)).with_up(Vec3::from(self.up))
    }
}

/// Sphere tracing budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchSettings {
    /// Maximum field evaluations per ray
    pub max_steps: u32,
    /// Rays that travel further than this are misses
    pub max_distance: f32,
    /// Distances below this count as a surface hit
    pub surface_epsilon: f32,
    /// Fraction of the safe distance taken per step
    pub relaxation: f32,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            max_steps: 40,
            max_distance: 40.0,
            surface_epsilon: 0.001,
            relaxation: 0.8,
        }
    }
}

/// Lighting and background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingSettings {
    /// Direction towards the light (normalized on use)
    pub light_direction: [f32; 3],
    /// Lower bound of the diffuse term
    pub ambient: f32,
    /// Color of rays that miss everything
    pub background: [f32; 3],
    /// Hash values at or above this become stars
    pub star_threshold: f32,
}

impl Default for ShadingSettings {
    fn default() -> Self {
        Self {
            light_direction: [1.0, 1.0, 1.0],
            ambient: 0.3,
            background: [0.01, 0.01, 0.02],
            star_threshold: 0.985,
        }
    }
}

impl ShadingSettings {
    /// Unit vector towards the light, `Vec3::Y` if the setting is degenerate
    pub fn light(&self) -> Vec3 {
        Vec3::from(self.light_direction)
            .try_normalize()
            .unwrap_or(Vec3::Y)
    }

    pub fn background(&self) -> Vec3 {
        Vec3::from(self.background)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_reference_look() {
        let s = RenderSettings::default();
        assert_eq!(s.camera.eye, [2.0, 3.5, 7.5]);
        assert_eq!(s.march.max_steps, 40);
        assert_relative_eq!(s.march.relaxation, 0.8);
        assert_relative_eq!(s.shading.ambient, 0.3);
        assert_relative_eq!(s.shading.star_threshold, 0.985);
    }

    #[test]
    fn light_is_normalized() {
        let light = ShadingSettings::default().light();
        assert_relative_eq!(light.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(light.x, 1.0 / 3.0_f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn degenerate_light_falls_back_to_up() {
        let shading = ShadingSettings {
            light_direction: [0.0; 3],
            ..Default::default()
        };
        assert_eq!(shading.light(), Vec3::Y);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "march": { "max_steps": 64 }, "shading": { "ambient": 0.1 } }"#;
        let s: RenderSettings = serde_json::from_str(json).unwrap();

        assert_eq!(s.march.max_steps, 64);
        assert_relative_eq!(s.march.max_distance, 40.0);
        assert_relative_eq!(s.shading.ambient, 0.1);
        assert_eq!(s.camera, CameraSettings::default());
    }

    #[test]
    fn defaults_are_valid() {
        assert!(RenderSettings::default().validate().is_ok());
    }

    #[test]
    fn overflowing_json_values_are_rejected() {
        let json = r#"{ "shading": { "ambient": 1e39 } }"#;
        let s: RenderSettings = serde_json::from_str(json).unwrap();
        assert!(s.shading.ambient.is_infinite());

        match s.validate() {
            Err(RenderError::NonFiniteSetting { field, .. }) => {
                assert_eq!(field, "shading.ambient");
            }
            other => panic!("expected NonFiniteSetting, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_vector_components_are_rejected() {
        let mut s = RenderSettings::default();
        s.camera.eye[2] = f32::NAN;
        assert!(matches!(
            s.validate(),
            Err(RenderError::NonFiniteSetting { field: "camera.eye", .. })
        ));
    }

    #[test]
    fn json_roundtrip_preserves_settings() {
        let mut s = RenderSettings::default();
        s.camera.eye = [0.0, 10.0, 0.1];
        let json = serde_json::to_string_pretty(&s).unwrap();
        let back: RenderSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
