//! Orrery CLI - render, probe and preview the ray-marched solar system

mod settings;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use orrery_core::orbit::OrbitPhase;
use orrery_render::{
    CpuRenderer, FrameInputs, FrameShader, HEADLESS_FORMAT, Raymarcher, RenderSettings,
    WindowConfig, init_headless, to_rgba8,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Ray-marched procedural solar system", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (JSON). Defaults to {config_dir}/orrery/settings.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Multi-threaded CPU renderer
    Cpu,
    /// Headless WGPU renderer
    Gpu,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single frame to an image file
    Render {
        /// Seconds since animation start
        #[arg(short, long, default_value = "10.0")]
        time: f32,

        /// Image width
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Image height
        #[arg(long, default_value = "720")]
        height: u32,

        /// Output image file (.png)
        #[arg(short, long, default_value = "orrery.png")]
        output: PathBuf,

        /// Renderer to use
        #[arg(long, value_enum, default_value = "cpu")]
        backend: Backend,
    },

    /// Render a range of frames on the CPU
    Sequence {
        /// First frame time
        #[arg(long, default_value = "0.0")]
        start: f32,

        /// Last frame time (inclusive)
        #[arg(long, default_value = "60.0")]
        end: f32,

        /// Frames per second of animation time
        #[arg(long, default_value = "24.0")]
        fps: f32,

        /// Image width
        #[arg(long, default_value = "640")]
        width: u32,

        /// Image height
        #[arg(long, default_value = "360")]
        height: u32,

        /// Directory for frame_00000.png, frame_00001.png, ...
        #[arg(short, long, default_value = "frames")]
        output_dir: PathBuf,
    },

    /// Trace one pixel and print what it hits
    Probe {
        /// Pixel column (0 = left)
        #[arg(short, long)]
        x: u32,

        /// Pixel row (0 = top)
        #[arg(short, long)]
        y: u32,

        /// Seconds since animation start
        #[arg(short, long, default_value = "10.0")]
        time: f32,

        /// Frame width
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Frame height
        #[arg(long, default_value = "720")]
        height: u32,
    },

    /// Open a real-time preview window
    Preview {
        /// Window width
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Window height
        #[arg(long, default_value = "720")]
        height: u32,

        /// Window title
        #[arg(long, default_value = "Orrery")]
        title: String,
    },

    /// Write the default settings file
    InitConfig {
        /// Where to write it (defaults to the user config directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitConfig { path } => {
            run_init_config(path.or(cli.config))?;
        }
        command => {
            let settings = settings::load_settings(cli.config.as_deref())?;
            run_command(command, settings)?;
        }
    }

    Ok(())
}

fn run_command(command: Commands, settings: RenderSettings) -> Result<()> {
    match command {
        Commands::Render {
            time,
            width,
            height,
            output,
            backend,
        } => run_render(settings, time, width, height, &output, backend),
        Commands::Sequence {
            start,
            end,
            fps,
            width,
            height,
            output_dir,
        } => run_sequence(settings, start, end, fps, width, height, &output_dir),
        Commands::Probe {
            x,
            y,
            time,
            width,
            height,
        } => run_probe(&settings, x, y, time, width, height),
        Commands::Preview {
            width,
            height,
            title,
        } => {
            println!("{}", orrery_render::controls_help());
            orrery_render::run_preview(
                WindowConfig {
                    title,
                    width,
                    height,
                },
                settings,
            )
        }
        Commands::InitConfig { path } => run_init_config(path),
    }
}

fn run_render(
    settings: RenderSettings,
    time: f32,
    width: u32,
    height: u32,
    output: &Path,
    backend: Backend,
) -> Result<()> {
    let frame = FrameInputs::new(width, height, time)?;
    tracing::info!(
        width,
        height,
        time,
        phase = %OrbitPhase::at(time),
        ?backend,
        "Rendering frame"
    );

    let image = match backend {
        Backend::Cpu => CpuRenderer::new(settings).render_frame(&frame)?,
        Backend::Gpu => {
            let (device, queue) =
                pollster::block_on(init_headless()).context("Failed to initialize GPU")?;
            let raymarcher = Raymarcher::new(device, queue, HEADLESS_FORMAT, &settings);
            raymarcher.render_to_image(&frame)?
        }
    };

    image
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Saved {}", output.display());

    Ok(())
}

/// Upper bound on frames rendered by one `sequence` run
const MAX_SEQUENCE_FRAMES: u32 = 100_000;

/// Frame times from `start` to `end` inclusive, `1 / fps` apart
fn sequence_times(
    start: f32,
    end: f32,
    fps: f32,
) -> Result<impl ExactSizeIterator<Item = f32>> {
    if !(fps.is_finite() && fps > 0.0) {
        bail!("--fps must be a positive number, got {fps}");
    }
    if !start.is_finite() || !end.is_finite() || end < start {
        bail!("--end ({end}) must not be before --start ({start})");
    }

    let intervals = ((f64::from(end) - f64::from(start)) * f64::from(fps)).floor();
    if intervals >= f64::from(MAX_SEQUENCE_FRAMES) {
        bail!(
            "{start}..{end} at {fps} fps is more than {MAX_SEQUENCE_FRAMES} frames; \
             shorten the range or lower --fps"
        );
    }

    let count = intervals as u32 + 1;
    Ok((0..count).map(move |i| start + i as f32 / fps))
}

fn frame_file_name(index: usize) -> String {
    format!("frame_{index:05}.png")
}

fn run_sequence(
    settings: RenderSettings,
    start: f32,
    end: f32,
    fps: f32,
    width: u32,
    height: u32,
    output_dir: &Path,
) -> Result<()> {
    let times = sequence_times(start, end, fps)?;
    let frames = times.len();
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let renderer = CpuRenderer::new(settings);
    let mut phase = None;
    tracing::info!(frames, start, end, fps, "Rendering sequence");

    for (index, time) in times.enumerate() {
        let current = OrbitPhase::at(time);
        if phase != Some(current) {
            tracing::info!(phase = %current, time, "Orbit phase changed");
            phase = Some(current);
        }

        let image = renderer.render(width, height, time)?;
        let path = output_dir.join(frame_file_name(index));
        image
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(index, time, path = %path.display(), "Saved frame");
    }

    println!("Saved {frames} frames to {}", output_dir.display());
    Ok(())
}

fn run_probe(
    settings: &RenderSettings,
    x: u32,
    y: u32,
    time: f32,
    width: u32,
    height: u32,
) -> Result<()> {
    if x >= width || y >= height {
        bail!("Pixel ({x}, {y}) is outside the {width}x{height} frame");
    }

    let frame = FrameInputs::new(width, height, time)?;
    let shader = FrameShader::new(frame, settings);
    let probe = shader.probe(frame.pixel_center(x, y));

    println!("pixel      ({x}, {y}) of {width}x{height}");
    println!("time       {time} ({})", OrbitPhase::at(time));
    println!("uv         ({:.4}, {:.4})", probe.uv.x, probe.uv.y);
    println!(
        "direction  ({:.4}, {:.4}, {:.4})",
        probe.direction.x, probe.direction.y, probe.direction.z
    );
    println!(
        "march      {} after {} steps, {:.4} units",
        if probe.march.is_hit() { "hit" } else { "miss" },
        probe.march.steps(),
        probe.march.distance()
    );

    if let Some(surface) = probe.surface {
        println!(
            "point      ({:.4}, {:.4}, {:.4})",
            surface.point.x, surface.point.y, surface.point.z
        );
        println!("body       {}", surface.body);
        println!(
            "normal     ({:.4}, {:.4}, {:.4})",
            surface.normal.x, surface.normal.y, surface.normal.z
        );
    }

    let rgba = to_rgba8(probe.color);
    println!(
        "color      ({:.4}, {:.4}, {:.4}) = #{:02x}{:02x}{:02x}",
        probe.color.x, probe.color.y, probe.color.z, rgba[0], rgba[1], rgba[2]
    );

    Ok(())
}

fn run_init_config(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => settings::default_path()?,
    };

    if path.exists() {
        bail!("{} already exists", path.display());
    }

    settings::save_settings(&RenderSettings::default(), &path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}
