//! Orrery Render - raymarching renderers for the orrery scene
//!
//! Two renderers share one per-pixel contract: a pixel's color is a pure
//! function of its fragment coordinate and the frame's [`FrameInputs`].
//!
//! ## Features
//!
//! - CPU sphere tracer and shader, parallel over scanlines with rayon
//! - WGSL port of the same pipeline, with constants generated from Rust
//! - Headless GPU rendering to image buffers
//! - Real-time preview window
//!
//! ## Example
//!
//! ```rust,no_run
//! use orrery_render::{CpuRenderer, RenderSettings};
//!
//! let renderer = CpuRenderer::new(RenderSettings::default());
//! let image = renderer.render(640, 360, 10.0)?;
//! image.save("orrery.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod camera;
pub mod cpu;
pub mod error;
pub mod fps;
pub mod frame;
pub mod march;
pub mod raymarcher;
pub mod settings;
pub mod shade;
pub mod shader_gen;
pub mod window;

// Re-export wgpu for users who need texture formats, etc.
pub use wgpu;

pub use camera::Camera;
pub use cpu::CpuRenderer;
pub use error::{RenderError, Result};
pub use fps::FpsCounter;
pub use frame::FrameInputs;
pub use march::{MarchResult, march};
pub use raymarcher::{HEADLESS_FORMAT, Raymarcher, Uniforms, init_headless, init_with_surface};
pub use settings::{CameraSettings, MarchSettings, RenderSettings, ShadingSettings};
pub use shade::{FrameShader, PixelProbe, SurfaceSample, shade_fragment, star_mask, to_rgba8};
pub use shader_gen::build_shader;
pub use window::{WindowConfig, controls_help, run_preview};
