//! Multi-threaded CPU renderer

use crate::error::{RenderError, Result};
use crate::frame::FrameInputs;
use crate::settings::RenderSettings;
use crate::shade::{FrameShader, to_rgba8};
use image::RgbaImage;
use rayon::prelude::*;

/// Renders whole frames on the CPU.
///
/// Pixels are independent, so scanlines are shaded in parallel with rayon;
/// the result does not depend on the thread count.
#[derive(Debug, Clone, Default)]
pub struct CpuRenderer {
    settings: RenderSettings,
}

impl CpuRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Render a `width` x `height` frame at `time`
    pub fn render(&self, width: u32, height: u32, time: f32) -> Result<RgbaImage> {
        let frame = FrameInputs::new(width, height, time)?;
        self.render_frame(&frame)
    }

    /// Render a frame from explicit inputs. Image row 0 is the top of the
    /// screen.
    pub fn render_frame(&self, frame: &FrameInputs) -> Result<RgbaImage> {
        let width = frame.resolution.x as u32;
        let height = frame.resolution.y as u32;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }

        let start = std::time::Instant::now();
        let shader = FrameShader::new(*frame, &self.settings);
        let row_bytes = width as usize * 4;
        let mut pixels = vec![0u8; row_bytes * height as usize];

        pixels
            .par_chunks_exact_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                    let frag = frame.pixel_center(x as u32, y as u32);
                    pixel.copy_from_slice(&to_rgba8(shader.shade(frag)));
                }
            });

        tracing::debug!(
            width,
            height,
            time = frame.time,
            elapsed_ms = start.elapsed().as_secs_f32() * 1000.0,
            "Rendered frame on CPU"
        );

        RgbaImage::from_raw(width, height, pixels).ok_or(RenderError::ImageSize { width, height })
    }
}
