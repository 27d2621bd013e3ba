//! Per-pixel shading
//!
//! The CPU rendition of the fragment program: build the camera ray, trace it
//! through the scene, then either light the surface or draw background and
//! stars. Every function here is pure in its inputs.

use crate::camera::Camera;
use crate::frame::FrameInputs;
use crate::march::{MarchResult, march};
use crate::settings::RenderSettings;
use glam::{Vec2, Vec3};
use orrery_core::material::{Body, classify};
use orrery_core::scene::SceneSnapshot;
use orrery_core::sdf::estimate_normal;

/// Direction of the screen-space hash
const STAR_HASH_DIRECTION: Vec2 = Vec2::new(12.9898, 78.233);

/// Scale of the screen-space hash
const STAR_HASH_SCALE: f32 = 43758.5453;

/// `x - floor(x)`, always in `[0, 1)` unlike `f32::fract`
#[inline]
fn fract_gl(x: f32) -> f32 {
    x - x.floor()
}

/// Pseudo-random value in `[0, 1)` for a screen coordinate
pub fn star_hash(uv: Vec2) -> f32 {
    fract_gl(uv.dot(STAR_HASH_DIRECTION).sin() * STAR_HASH_SCALE)
}

/// 1.0 where a star is drawn, 0.0 elsewhere.
///
/// Depends only on `uv`, so stars are fixed to the screen and do not move
/// with time or the camera.
pub fn star_mask(uv: Vec2, threshold: f32) -> f32 {
    if star_hash(uv) >= threshold { 1.0 } else { 0.0 }
}

/// Replace non-finite channels with 0
fn sanitize(color: Vec3) -> Vec3 {
    let channel = |c: f32| if c.is_finite() { c } else { 0.0 };
    Vec3::new(channel(color.x), channel(color.y), channel(color.z))
}

/// Convert a linear color to RGBA8, clamping to `[0, 1]`, alpha opaque
pub fn to_rgba8(color: Vec3) -> [u8; 4] {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    let color = sanitize(color);
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// Everything computed for one pixel, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelProbe {
    /// Aspect-corrected screen coordinate
    pub uv: Vec2,
    /// Camera ray direction
    pub direction: Vec3,
    pub march: MarchResult,
    /// Surface point, body and normal for hits
    pub surface: Option<SurfaceSample>,
    /// Final color, channels nominally in `[0, 1]`
    pub color: Vec3,
}

/// Lit surface point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub point: Vec3,
    pub body: Body,
    pub normal: Vec3,
}

/// Shading state shared by all pixels of one frame.
///
/// Holds the scene snapshot and the derived camera so per-pixel work is only
/// the trace and the lighting.
#[derive(Debug, Clone)]
pub struct FrameShader<'a> {
    frame: FrameInputs,
    scene: SceneSnapshot,
    camera: Camera,
    light: Vec3,
    settings: &'a RenderSettings,
}

impl<'a> FrameShader<'a> {
    pub fn new(frame: FrameInputs, settings: &'a RenderSettings) -> Self {
        Self::with_scene(frame, SceneSnapshot::at(frame.time), settings)
    }

    /// Shade against an existing snapshot. The snapshot should be taken at
    /// `frame.time`.
    pub fn with_scene(frame: FrameInputs, scene: SceneSnapshot, settings: &'a RenderSettings) -> Self {
        Self {
            frame,
            scene,
            camera: settings.camera.camera(),
            light: settings.shading.light(),
            settings,
        }
    }

    /// Color of the fragment at `frag_coord` (bottom-left origin)
    pub fn shade(&self, frag_coord: Vec2) -> Vec3 {
        self.probe(frag_coord).color
    }

    /// Trace the fragment at `frag_coord` and report every intermediate
    pub fn probe(&self, frag_coord: Vec2) -> PixelProbe {
        let uv = self.frame.uv(frag_coord);
        let origin = self.camera.position;
        let direction = self.camera.ray_direction(uv);
        let result = march(&self.scene, origin, direction, &self.settings.march);

        let (surface, color) = match result.hit_point(origin, direction) {
            Some(point) => {
                let body = classify(point, &self.scene);
                let normal = estimate_normal(&self.scene, point);
                let diffuse = normal.dot(self.light).max(self.settings.shading.ambient);
                let sample = SurfaceSample {
                    point,
                    body,
                    normal,
                };
                (Some(sample), body.base_color() * diffuse)
            }
            None => {
                let stars = star_mask(uv, self.settings.shading.star_threshold);
                (None, self.settings.shading.background() + Vec3::splat(stars))
            }
        };

        PixelProbe {
            uv,
            direction,
            march: result,
            surface,
            color: sanitize(color),
        }
    }
}

/// Color of one fragment.
///
/// `frag_coord` is in pixels with the origin at the bottom-left. Renderers
/// that shade many pixels should build a [`FrameShader`] once instead.
pub fn shade_fragment(
    frag_coord: Vec2,
    frame: &FrameInputs,
    scene: &SceneSnapshot,
    settings: &RenderSettings,
) -> Vec3 {
    FrameShader::with_scene(*frame, scene.clone(), settings).shade(frag_coord)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame(time: f32) -> FrameInputs {
        FrameInputs::new(64, 36, time).unwrap()
    }

    #[test]
    fn fract_gl_is_positive_for_negative_input() {
        assert_relative_eq!(fract_gl(-0.25), 0.75);
        assert_relative_eq!(fract_gl(2.5), 0.5);
    }

    #[test]
    fn star_mask_is_binary_and_deterministic() {
        for i in 0..100 {
            let uv = Vec2::new(i as f32 * 0.031 - 1.5, (i as f32 * 0.17).sin());
            let m = star_mask(uv, 0.985);
            assert!(m == 0.0 || m == 1.0);
            assert_eq!(m, star_mask(uv, 0.985));
        }
    }

    #[test]
    fn stars_are_sparse() {
        let (w, h) = (320, 180);
        let frame = FrameInputs::new(w, h, 0.0).unwrap();
        let mut stars = 0;
        for y in 0..h {
            for x in 0..w {
                let uv = frame.uv(frame.pixel_center(x, y));
                stars += star_mask(uv, 0.985) as u32;
            }
        }
        let fraction = stars as f32 / (w * h) as f32;
        assert!(fraction > 0.005 && fraction < 0.03, "star fraction {fraction}");
    }

    #[test]
    fn threshold_above_one_disables_stars() {
        for i in 0..200 {
            assert_eq!(star_mask(Vec2::new(i as f32 * 0.013, 0.4), 1.01), 0.0);
        }
    }

    #[test]
    fn miss_is_background_or_star() {
        let settings = RenderSettings::default();
        let shader = FrameShader::new(frame(10.0), &settings);

        // Image corner looks past the whole system
        let probe = shader.probe(Vec2::new(0.5, 35.5));
        assert!(!probe.march.is_hit());
        assert!(probe.surface.is_none());

        let bg = settings.shading.background();
        let star = star_mask(probe.uv, settings.shading.star_threshold);
        assert_eq!(probe.color, bg + Vec3::splat(star));
    }

    #[test]
    fn center_pixel_hits_the_sun_mid_orbit() {
        let settings = RenderSettings::default();
        let shader = FrameShader::new(frame(10.0), &settings);

        let probe = shader.probe(Vec2::new(32.0, 18.0));
        let surface = probe.surface.unwrap();
        assert_eq!(surface.body, Body::Sun);
        assert_relative_eq!(probe.color.z, 0.0);
        assert!(probe.color.x > probe.color.y);
        assert!(probe.color.x >= 0.3 - 1e-6);
    }

    #[test]
    fn ambient_floor_applies_on_the_dark_side() {
        // Lit from behind, the visible side only gets the ambient term
        let mut settings = RenderSettings::default();
        settings.shading.light_direction = [-2.0, -3.5, -7.5];
        let shader = FrameShader::new(frame(10.0), &settings);

        let probe = shader.probe(Vec2::new(32.0, 18.0));
        assert!(probe.march.is_hit());
        assert_relative_eq!(probe.color.x, 0.3, epsilon = 1e-5);
        assert_relative_eq!(probe.color.y, 0.21, epsilon = 1e-5);
    }

    #[test]
    fn free_function_matches_frame_shader() {
        let settings = RenderSettings::default();
        let f = frame(20.0);
        let scene = SceneSnapshot::at(20.0);
        let shader = FrameShader::new(f, &settings);

        for frag in [Vec2::new(10.5, 3.5), Vec2::new(32.0, 18.0), Vec2::new(50.5, 30.5)] {
            assert_eq!(shade_fragment(frag, &f, &scene, &settings), shader.shade(frag));
        }
    }

    #[test]
    fn rgba_conversion_clamps_and_zeroes_nan() {
        assert_eq!(to_rgba8(Vec3::new(1.01, 0.5, -0.2)), [255, 128, 0, 255]);
        assert_eq!(to_rgba8(Vec3::new(f32::NAN, f32::INFINITY, 1.0)), [0, 0, 255, 255]);
        assert_eq!(to_rgba8(Vec3::new(0.01, 0.01, 0.02)), [3, 3, 5, 255]);
    }
}
