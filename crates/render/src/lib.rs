//! # Lava render
//!
//! Mounts the lava scene from [`sdf`] into a host container and keeps it
//! animated. [`LavaBackground`] owns the lifecycle: it sizes a
//! [`FrameBackend`] to the container, drives a [`RenderLoop`] off the host's
//! frame callbacks and tears everything down on unmount.
//!
//! Backends:
//! - [`GpuBackend`]: wgpu surface on a winit window, running `lava.wgsl`.
//! - [`CpuBackend`]: the rayon rasteriser from [`sdf::raster`], used headless.

pub mod backend;
pub mod clock;
pub mod error;
pub mod gpu;
pub mod gpu_types;
pub mod host;
pub mod lifecycle;
pub mod pipeline;
pub mod render_loop;
pub mod snapshot;
pub mod window;

pub use backend::{CpuBackend, FrameBackend};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::RenderError;
pub use gpu::GpuBackend;
pub use host::{FrameTicket, HeadlessHost, Host, ListenerId};
pub use lifecycle::{LavaBackground, Phase};
pub use render_loop::{FrameOutcome, LoopState, RenderLoop};
pub use window::WindowHost;
