//! WGSL generation for the GPU renderer
//!
//! The shader body lives in `shaders/orrery.wgsl`; every number it needs
//! (orbit breakpoints, body sizes, color tables, march budget, camera pose) is
//! generated here from the same constants and settings the CPU path uses and
//! injected at a placeholder marker.

// String writing is infallible, so .unwrap() is safe here
#![allow(clippy::unwrap_used)]

use crate::settings::RenderSettings;
use glam::Vec3;
use orrery_core::material::{
    MOON_COLORS, MOON_DARKENING, PLANET_COLORS, RING_COLOR, SUN_CLASSIFY_RADIUS, SUN_COLOR,
};
use orrery_core::orbit::{
    CONTRACT_DURATION, CONTRACT_START, EXPAND_DURATION, IDLE_START, JITTER_AMPLITUDE, MAX_MOONS,
    MOON_COUNTS, PLANET_COUNT, RING_PLANET,
};
use orrery_core::scene::{
    FAR_SENTINEL, MOON_BLEND, MOON_GROUP_BLEND, PLANET_BLEND, RING_MAJOR_RADIUS,
    RING_MINOR_RADIUS, SUN_PLANET_BLEND, SUN_RADIUS,
};
use orrery_core::sdf::NORMAL_EPSILON;
use std::fmt::Write;

const CONSTANTS_MARKER: &str = "// ORRERY_CONSTANTS_PLACEHOLDER";

/// Get the base shader code (everything except the generated constants)
pub fn get_base_shader() -> &'static str {
    include_str!("shaders/orrery.wgsl")
}

/// WGSL float literal. `Debug` always keeps a `.` or an exponent.
fn float(v: f32) -> String {
    format!("{v:?}")
}

fn int(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn vec3(v: Vec3) -> String {
    format!("vec3<f32>({}, {}, {})", float(v.x), float(v.y), float(v.z))
}

fn write_f32(code: &mut String, name: &str, v: f32) {
    writeln!(code, "const {name}: f32 = {};", float(v)).unwrap();
}

fn write_i32(code: &mut String, name: &str, v: usize) {
    writeln!(code, "const {name}: i32 = {};", int(v)).unwrap();
}

fn write_vec3(code: &mut String, name: &str, v: Vec3) {
    writeln!(code, "const {name}: vec3<f32> = {};", vec3(v)).unwrap();
}

/// Tables indexed with runtime values go in the private address space
fn write_table(code: &mut String, name: &str, ty: &str, items: &[String]) {
    writeln!(
        code,
        "var<private> {name}: array<{ty}, {len}> = array<{ty}, {len}>({});",
        items.join(", "),
        len = items.len()
    )
    .unwrap();
}

/// Generate the constants block for `settings`
pub fn generate_constants(settings: &RenderSettings) -> String {
    let mut code = String::new();

    writeln!(code, "// Generated by orrery-render").unwrap();
    writeln!(code).unwrap();

    writeln!(code, "// Bodies").unwrap();
    write_i32(&mut code, "PLANET_COUNT", PLANET_COUNT);
    write_i32(&mut code, "MAX_MOONS", MAX_MOONS);
    write_i32(&mut code, "RING_PLANET", RING_PLANET);
    write_table(
        &mut code,
        "MOON_COUNTS",
        "i32",
        &MOON_COUNTS.map(|n| int(n).to_string()),
    );
    write_f32(&mut code, "SUN_RADIUS", SUN_RADIUS);
    write_f32(&mut code, "RING_MAJOR_RADIUS", RING_MAJOR_RADIUS);
    write_f32(&mut code, "RING_MINOR_RADIUS", RING_MINOR_RADIUS);
    writeln!(code).unwrap();

    writeln!(code, "// Animation").unwrap();
    write_f32(&mut code, "EXPAND_DURATION", EXPAND_DURATION);
    write_f32(&mut code, "CONTRACT_START", CONTRACT_START);
    write_f32(&mut code, "CONTRACT_DURATION", CONTRACT_DURATION);
    write_f32(&mut code, "IDLE_START", IDLE_START);
    write_f32(&mut code, "JITTER_AMPLITUDE", JITTER_AMPLITUDE);
    writeln!(code).unwrap();

    writeln!(code, "// Blending").unwrap();
    write_f32(&mut code, "PLANET_BLEND", PLANET_BLEND);
    write_f32(&mut code, "MOON_BLEND", MOON_BLEND);
    write_f32(&mut code, "SUN_PLANET_BLEND", SUN_PLANET_BLEND);
    write_f32(&mut code, "MOON_GROUP_BLEND", MOON_GROUP_BLEND);
    write_f32(&mut code, "FAR_SENTINEL", FAR_SENTINEL);
    write_f32(&mut code, "NORMAL_EPSILON", NORMAL_EPSILON);
    writeln!(code).unwrap();

    writeln!(code, "// Materials").unwrap();
    write_f32(&mut code, "SUN_CLASSIFY_RADIUS", SUN_CLASSIFY_RADIUS);
    write_vec3(&mut code, "SUN_COLOR", SUN_COLOR);
    write_vec3(&mut code, "RING_COLOR", RING_COLOR);
    write_table(&mut code, "PLANET_COLORS", "vec3<f32>", &PLANET_COLORS.map(vec3));
    write_table(&mut code, "MOON_COLORS", "vec3<f32>", &MOON_COLORS.map(vec3));
    write_table(&mut code, "MOON_DARKENING", "f32", &MOON_DARKENING.map(float));
    writeln!(code).unwrap();

    let march = &settings.march;
    writeln!(code, "// Marching").unwrap();
    writeln!(
        code,
        "const MAX_STEPS: i32 = {};",
        i32::try_from(march.max_steps).unwrap_or(i32::MAX)
    )
    .unwrap();
    write_f32(&mut code, "MAX_DISTANCE", march.max_distance);
    write_f32(&mut code, "SURFACE_EPSILON", march.surface_epsilon);
    write_f32(&mut code, "RELAXATION", march.relaxation);
    writeln!(code).unwrap();

    let shading = &settings.shading;
    writeln!(code, "// Shading").unwrap();
    write_vec3(&mut code, "LIGHT_DIRECTION", shading.light());
    write_f32(&mut code, "AMBIENT", shading.ambient);
    write_vec3(&mut code, "BACKGROUND", shading.background());
    write_f32(&mut code, "STAR_THRESHOLD", shading.star_threshold);
    writeln!(code).unwrap();

    let camera = &settings.camera;
    writeln!(code, "// Camera").unwrap();
    write_vec3(&mut code, "CAMERA_EYE", Vec3::from(camera.eye));
    write_vec3(&mut code, "CAMERA_TARGET", Vec3::from(camera.target));
    write_vec3(&mut code, "CAMERA_UP", Vec3::from(camera.up));

    code
}

/// Replace the placeholder marker in `base_shader` with `constants`
pub fn inject_constants(base_shader: &str, constants: &str) -> String {
    if let Some(pos) = base_shader.find(CONSTANTS_MARKER) {
        let mut result = String::with_capacity(base_shader.len() + constants.len());
        result.push_str(&base_shader[..pos]);
        result.push_str(constants);
        result.push_str(&base_shader[pos + CONSTANTS_MARKER.len()..]);
        result
    } else {
        // Fallback: just prepend if marker not found
        format!("{}\n{}", constants, base_shader)
    }
}

/// Build the complete shader for `settings`
pub fn build_shader(settings: &RenderSettings) -> String {
    inject_constants(get_base_shader(), &generate_constants(settings))
}
