//! Per-frame inputs
//!
//! Everything a pixel may depend on besides its own coordinate. The window
//! shell and the CLI build one of these per frame and pass it down; nothing in
//! the pipeline reads clocks or input devices itself.

use crate::error::{RenderError, Result};
use glam::Vec2;

/// Inputs shared by every pixel of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    /// Frame size in pixels
    pub resolution: Vec2,
    /// Seconds since program start
    pub time: f32,
    /// Last cursor position in pixels, origin bottom-left. Not used by the
    /// current scene.
    pub pointer: Vec2,
}

impl FrameInputs {
    /// Inputs for a `width` x `height` frame at `time`, pointer at the origin
    pub fn new(width: u32, height: u32, time: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }

        Ok(Self {
            resolution: Vec2::new(width as f32, height as f32),
            time,
            pointer: Vec2::ZERO,
        })
    }

    pub fn with_pointer(mut self, pointer: Vec2) -> Self {
        self.pointer = pointer;
        self
    }

    /// Aspect-corrected screen coordinate of a fragment.
    ///
    /// `frag_coord` uses the GL convention (origin bottom-left, pixel centers
    /// at `+0.5`). The result spans `[-1, 1]` vertically and
    /// `[-aspect, aspect]` horizontally.
    pub fn uv(&self, frag_coord: Vec2) -> Vec2 {
        (2.0 * frag_coord - self.resolution) / self.resolution.y
    }

    /// Fragment coordinate of the center of image pixel `(x, y)`, where image
    /// row 0 is the top of the screen
    pub fn pixel_center(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(x as f32 + 0.5, self.resolution.y - y as f32 - 0.5)
    }
}
