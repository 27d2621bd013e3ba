//! Parse and validate the generated WGSL with naga

// Tests are allowed to use expect/unwrap for cleaner error messages
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use orrery_render::shader_gen::get_base_shader;
use orrery_render::{MarchSettings, RenderSettings, ShadingSettings, build_shader};

fn validate_wgsl(source: &str) -> naga::Module {
    let module = match naga::front::wgsl::parse_str(source) {
        Ok(m) => m,
        Err(e) => panic!("WGSL parsing error:\n{}", e.emit_to_string(source)),
    };

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );

    if let Err(e) = validator.validate(&module) {
        panic!("WGSL validation error:\n{}", e.emit_to_string(source));
    }

    module
}

#[test]
fn default_shader_validates() {
    let module = validate_wgsl(&build_shader(&RenderSettings::default()));

    let entry_points: Vec<_> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert!(entry_points.contains(&"vs_main"));
    assert!(entry_points.contains(&"fs_main"));
}

#[test]
fn custom_settings_shader_validates() {
    let settings = RenderSettings {
        march: MarchSettings {
            max_steps: 128,
            max_distance: 100.0,
            surface_epsilon: 1e-4,
            relaxation: 1.0,
        },
        shading: ShadingSettings {
            light_direction: [0.0, 0.0, 0.0],
            ambient: 0.0,
            ..Default::default()
        },
        ..Default::default()
    };
    validate_wgsl(&build_shader(&settings));
}

#[test]
fn base_shader_needs_generated_constants() {
    assert!(naga::front::wgsl::parse_str(get_base_shader()).is_err());
}
