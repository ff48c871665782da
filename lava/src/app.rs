//! # Windowed Viewer
//!
//! Mounts the lava background into a winit window and routes window events
//! to it: resizes to [`LavaBackground::on_resize`], redraws to
//! [`LavaBackground::on_frame`]. Closing the window or pressing Escape
//! unmounts before the event loop exits. `P` saves a CPU-rendered PNG of the
//! current frame to the working directory.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use render::{snapshot, GpuBackend, LavaBackground, SystemClock, WindowHost};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::cli::Cli;
use crate::watcher::{self, ShaderWatcher};

type Background = LavaBackground<WindowHost, GpuBackend, SystemClock>;

/// Open the window and run until it is closed.
///
/// # Errors
///
/// Window, GPU or watcher setup failures, and event loop errors.
pub fn run(cli: &Cli) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Lava")
            .with_inner_size(PhysicalSize::new(cli.width, cli.height))
            .build(&event_loop)
            .context("failed to create window")?,
    );

    let shader_watcher = cli.watch_shader.as_deref().map(watcher::start).transpose()?;

    let mut background: Background =
        LavaBackground::new(WindowHost::new(Arc::clone(&window)), SystemClock::new());
    background
        .mount(|resolution| GpuBackend::new(Arc::clone(&window), resolution))
        .context("failed to mount lava background")?;

    event_loop
        .run(move |event, elwt| {
            let Event::WindowEvent { event, window_id } = event else {
                return;
            };
            if window_id != window.id() {
                return;
            }
            match event {
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(KeyCode::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } => {
                    shutdown(&mut background);
                    elwt.exit();
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(KeyCode::KeyP),
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                } => save_snapshot(&background),
                WindowEvent::Resized(_) => {
                    if let Err(e) = background.on_resize() {
                        tracing::warn!("resize failed: {e}");
                    }
                }
                WindowEvent::RedrawRequested => {
                    if let Some(watcher) = &shader_watcher {
                        apply_shader_update(&mut background, watcher);
                    }
                    let Some(ticket) = background.host_mut().take_frame() else {
                        return;
                    };
                    if let Err(e) = background.on_frame(ticket) {
                        tracing::error!("lava background stopped: {e}");
                        elwt.exit();
                    }
                }
                _ => {}
            }
        })
        .context("event loop failed")?;
    Ok(())
}

fn shutdown(background: &mut Background) {
    if let Err(e) = background.unmount() {
        tracing::warn!("{e}");
    }
}

fn apply_shader_update(background: &mut Background, watcher: &ShaderWatcher) {
    let Some(source) = watcher.latest() else {
        return;
    };
    let Some(backend) = background.backend_mut() else {
        return;
    };
    if let Err(e) = backend.reload_shader(&source) {
        tracing::warn!(
            "keeping previous shader, {} rejected:\n{e}",
            watcher.path().display()
        );
    }
}

fn save_snapshot(background: &Background) {
    let Some(resolution) = background.resolution() else {
        return;
    };
    let frame = sdf::render(background.time(), &resolution);
    let path = snapshot::default_path(Path::new("."));
    if let Err(e) = snapshot::save(&frame, &path) {
        tracing::warn!("{e}");
    }
}
