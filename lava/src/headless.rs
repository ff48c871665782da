//! Render without a window: simulated time, software backend, PNG out.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use render::{snapshot, CpuBackend, FrameOutcome, HeadlessHost, LavaBackground, ManualClock};

use crate::cli::Cli;

/// Pump `cli.frames` frames, `1 / cli.fps` seconds apart starting at
/// `cli.time`, and save the last one. Returns the path written.
///
/// # Errors
///
/// Invalid frame rate or start time, a failed frame, or a failed write.
pub fn run(cli: &Cli) -> Result<PathBuf> {
    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        bail!("--fps must be a positive number, got {}", cli.fps);
    }
    if !cli.time.is_finite() {
        bail!("--time must be finite, got {}", cli.time);
    }
    let step = 1.0 / cli.fps;
    if !step.is_finite() {
        bail!("--fps {} is too small to step by", cli.fps);
    }

    let clock = ManualClock::new();
    let host = HeadlessHost::new(cli.width, cli.height);
    let mut background = LavaBackground::new(host, clock.clone());
    background
        .mount(|resolution| Ok(CpuBackend::new(resolution)))
        .context("failed to mount headless background")?;

    clock.advance_secs(cli.time);
    for i in 0..cli.frames {
        if i > 0 {
            clock.advance_secs(step);
        }
        let Some(ticket) = background.host_mut().next_frame() else {
            bail!("render loop stopped after {i} frames");
        };
        match background.on_frame(ticket)? {
            FrameOutcome::Drawn { time, frame } => tracing::debug!(frame, time, "drew frame"),
            outcome => tracing::warn!(?outcome, "frame not drawn"),
        }
    }

    let frame = background
        .backend()
        .and_then(CpuBackend::frame)
        .context("no frame was drawn")?;
    let path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| snapshot::default_path(Path::new(".")));
    snapshot::save(frame, &path)?;

    tracing::info!(
        frames = background.frames(),
        time = background.time(),
        "headless render finished"
    );
    background.unmount()?;
    Ok(path)
}
