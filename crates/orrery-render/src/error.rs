//! Error types for rendering

use thiserror::Error;

/// Errors raised while setting up or driving a renderer.
///
/// Per-pixel evaluation never fails; everything here comes from the frame
/// size, the GPU, or the image buffer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid resolution {width}x{height}: both dimensions must be non-zero")]
    InvalidResolution { width: u32, height: u32 },

    #[error("no suitable GPU adapter: {0}")]
    AdapterNotFound(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("failed to create window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("invalid setting {field}: {value} is not a finite number")]
    NonFiniteSetting { field: &'static str, value: f32 },

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("failed to read back frame: {0}")]
    BufferMap(String),

    #[error("frame buffer does not match {width}x{height}")]
    ImageSize { width: u32, height: u32 },
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;
