use crate::config::{ConfigError, PaintConfig};
use crate::init_config::InitConfig;
use crate::renderer::RasterSurface;
use anyhow::Context;
use std::time::Instant;

pub mod frame_loop;
pub mod scheduler;

pub use frame_loop::{FrameLoop, Visibility};
pub use scheduler::{FrameRequest, FrameScheduler, IntervalScheduler, ManualScheduler};

/// Build the loop the host would build: no surface when the device shows
/// the static backdrop instead of the canvas.
pub fn build_loop(
    width: f32,
    height: f32,
    config: PaintConfig,
) -> Result<FrameLoop<RasterSurface, IntervalScheduler>, ConfigError> {
    let surface = if config.profile.uses_static_fallback(width) {
        log::info!("narrow {:?} host ({}px): static backdrop", config.profile, width);
        None
    } else {
        Some(RasterSurface::new(width.round() as usize, height.round() as usize))
    };
    let scheduler = IntervalScheduler::new(config.frame_rate);
    FrameLoop::new(surface, scheduler, config)
}

/// Headless runner over `paint_drops.toml` in the working directory.
pub fn run() -> anyhow::Result<()> {
    let init = InitConfig::load_default().context("loading start-up configuration")?;
    run_with(&init)?;
    Ok(())
}

/// Paces the loop on a software surface for the configured number of frames
/// and logs a summary. Returns the number of frames rendered.
pub fn run_with(init: &InitConfig) -> anyhow::Result<u64> {
    let config = init.paint_config().context("resolving paint configuration")?;
    let (width, height) = init.surface_size().context("resolving surface size")?;
    let frames = init.headless_frames();

    log::info!(
        "paint drops: {:?} profile, {} drops, {}x{}, {} frames at {} fps",
        config.profile,
        config.capacity,
        width,
        height,
        frames,
        config.frame_rate
    );

    let mut frame_loop = build_loop(width, height, config).context("building frame loop")?;
    if !frame_loop.is_enabled() {
        return Ok(0);
    }

    let started = Instant::now();
    frame_loop.start();
    while frame_loop.frames_rendered() < frames as u64 {
        let Some(request) = frame_loop.scheduler_mut().wait_frame() else {
            break;
        };
        frame_loop.on_frame(request);

        #[cfg(feature = "profiling")]
        {
            if frame_loop.frames_rendered() % 120 == 0 {
                crate::PROFILER.lock().log_and_clear();
            }
        }
    }
    frame_loop.pause();

    let elapsed = started.elapsed();
    if let Some(sim) = frame_loop.simulation() {
        let stats = sim.stats();
        let (falling, spreading) = sim.phase_counts();
        log::info!(
            "{} frames in {:.2?} ({:.1} fps); recycled {} (spread {}, off-surface {}); {} falling, {} spreading",
            stats.frames,
            elapsed,
            stats.frames as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
            stats.recycled(),
            stats.spread_exhausted,
            stats.off_surface,
            falling,
            spreading
        );
    }
    if let Some(surface) = frame_loop.surface() {
        log::info!("surface coverage {:.1}%", surface.lit_fraction() * 100.0);
    }
    Ok(frame_loop.frames_rendered())
}
