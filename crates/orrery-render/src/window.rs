//! Window management with winit for real-time preview

use crate::fps::FpsCounter;
use crate::frame::FrameInputs;
use crate::raymarcher::{Raymarcher, init_with_surface};
use crate::settings::RenderSettings;
use glam::Vec2;
use orrery_core::orbit::OrbitPhase;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

/// Configuration for the preview window
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Cursor position with the origin moved to the bottom-left corner
fn flip_cursor(position: PhysicalPosition<f64>, height: u32) -> Vec2 {
    Vec2::new(position.x as f32, height as f32 - position.y as f32)
}

/// Application state for the preview window
struct PreviewApp<'a> {
    config: WindowConfig,
    settings: RenderSettings,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'a>>,
    surface_config: Option<wgpu::SurfaceConfiguration>,
    device: Option<Arc<wgpu::Device>>,
    raymarcher: Option<Raymarcher>,
    pointer: Vec2,
    phase: Option<OrbitPhase>,
    fps: FpsCounter,
    start_time: Instant,
    instance: wgpu::Instance,
}

impl PreviewApp<'_> {
    fn new(config: WindowConfig, settings: RenderSettings) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        Self {
            config,
            settings,
            window: None,
            surface: None,
            surface_config: None,
            device: None,
            raymarcher: None,
            pointer: Vec2::ZERO,
            phase: None,
            fps: FpsCounter::new(),
            start_time: Instant::now(),
            instance,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        // Minimized windows report zero; keep the last configuration
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        if let (Some(config), Some(surface), Some(device)) =
            (&mut self.surface_config, &self.surface, &self.device)
        {
            config.width = new_size.width;
            config.height = new_size.height;
            surface.configure(device, config);
            tracing::debug!(width = new_size.width, height = new_size.height, "Resized surface");
        }
    }

    fn log_phase(&mut self, time: f32) {
        let phase = OrbitPhase::at(time);
        if self.phase != Some(phase) {
            tracing::info!(%phase, time, "Orbit phase changed");
            self.phase = Some(phase);
        }
    }

    fn render(&mut self) {
        let (Some(surface), Some(raymarcher), Some(config), Some(device)) = (
            &self.surface,
            &self.raymarcher,
            &self.surface_config,
            &self.device,
        ) else {
            return;
        };

        let output = match surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Drop this frame and reconfigure
                surface.configure(device, config);
                return;
            }
            Err(e) => {
                tracing::warn!("Surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let time = self.start_time.elapsed().as_secs_f32();
        let frame = FrameInputs {
            resolution: Vec2::new(config.width as f32, config.height as f32),
            time,
            pointer: self.pointer,
        };
        raymarcher.update_uniforms(&frame);
        raymarcher.render(&view);
        output.present();

        let now = Instant::now();
        self.fps.tick_at(now);
        if self.fps.should_report(now) {
            tracing::info!(
                fps = self.fps.fps(),
                frame_ms = self.fps.frame_time_ms(),
                "{}",
                self.fps.display_string()
            );
        }
        self.log_phase(time);
    }
}

impl ApplicationHandler for PreviewApp<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let surface = match self.instance.create_surface(window.clone()) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Failed to create surface: {e}");
                event_loop.exit();
                return;
            }
        };

        let (device, queue, format) =
            match pollster::block_on(init_with_surface(&self.instance, &surface)) {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!("Failed to initialize GPU: {e}");
                    event_loop.exit();
                    return;
                }
            };

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let raymarcher = Raymarcher::new(device.clone(), queue, format, &self.settings);
        tracing::info!(
            width = surface_config.width,
            height = surface_config.height,
            ?format,
            "Preview window ready"
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.surface_config = Some(surface_config);
        self.device = Some(device);
        self.raymarcher = Some(raymarcher);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size);
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(config) = &self.surface_config {
                    self.pointer = flip_cursor(position, config.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape)
                {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run the preview window until it is closed
pub fn run_preview(config: WindowConfig, settings: RenderSettings) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PreviewApp::new(config, settings);
    event_loop.run_app(&mut app)?;

    Ok(())
}

/// Preview controls help text
pub fn controls_help() -> &'static str {
    r#"
Preview Controls:
  Escape - Close preview
"#
}
