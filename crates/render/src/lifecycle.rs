//! Mount, resize and teardown of the lava background.

use sdf::Resolution;

use crate::backend::FrameBackend;
use crate::clock::Clock;
use crate::error::RenderError;
use crate::host::{FrameTicket, Host, ListenerId};
use crate::render_loop::{FrameOutcome, LoopState, RenderLoop};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    Mounted,
    Disposed,
}

/// Owns the host, the GPU resource set and the render loop of one background.
///
/// The backend is never lent out past a method call, and after
/// [`LavaBackground::unmount`] it is gone.
pub struct LavaBackground<H: Host, B: FrameBackend, C: Clock> {
    host: H,
    backend: Option<B>,
    render_loop: RenderLoop<C>,
    resolution: Option<Resolution>,
    listener: Option<ListenerId>,
    phase: Phase,
}

impl<H: Host, B: FrameBackend, C: Clock> LavaBackground<H, B, C> {
    #[must_use]
    pub fn new(host: H, clock: C) -> Self {
        Self {
            host,
            backend: None,
            render_loop: RenderLoop::new(clock),
            resolution: None,
            listener: None,
            phase: Phase::Unmounted,
        }
    }

    /// Allocate the backend with `create`, size it to the container, start
    /// listening for resizes and start the render loop.
    ///
    /// Failure is final for this instance: whatever was allocated is
    /// released and the background is disposed.
    ///
    /// # Errors
    ///
    /// The error from `create` or from the initial resize, or
    /// [`RenderError::AlreadyMounted`] / [`RenderError::AlreadyDisposed`].
    pub fn mount<F>(&mut self, create: F) -> Result<(), RenderError>
    where
        F: FnOnce(&Resolution) -> Result<B, RenderError>,
    {
        match self.phase {
            Phase::Mounted => return Err(RenderError::AlreadyMounted),
            Phase::Disposed => return Err(RenderError::AlreadyDisposed),
            Phase::Unmounted => {}
        }

        let (width, height) = self.host.container_size();
        let resolution = Resolution::new(width, height);
        tracing::info!(width, height, "mounting lava background");

        let mut backend = match create(&resolution) {
            Ok(backend) => backend,
            Err(e) => {
                tracing::error!("failed to create renderer: {e}");
                self.render_loop.stop(&mut self.host);
                self.phase = Phase::Disposed;
                return Err(e);
            }
        };

        if let Err(e) = backend.resize(&resolution) {
            tracing::error!("failed to apply initial resolution: {e}");
            self.backend = Some(backend);
            self.teardown();
            return Err(e);
        }
        self.backend = Some(backend);
        self.resolution = Some(resolution);
        self.listener = Some(self.host.add_resize_listener());

        if let Err(e) = self.render_loop.start(&mut self.host) {
            self.teardown();
            return Err(e);
        }
        self.phase = Phase::Mounted;
        Ok(())
    }

    /// The container changed size. Ignored unless mounted.
    ///
    /// # Errors
    ///
    /// The backend's resize error; the new resolution is kept regardless.
    pub fn on_resize(&mut self) -> Result<(), RenderError> {
        if self.phase != Phase::Mounted || self.listener.is_none() {
            tracing::debug!(phase = ?self.phase, "ignoring resize");
            return Ok(());
        }
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        let (width, height) = self.host.container_size();
        let resolution = Resolution::new(width, height);
        if self.resolution == Some(resolution) {
            return Ok(());
        }
        tracing::debug!(width, height, aspect = ?resolution.aspect, "resized");
        self.resolution = Some(resolution);
        backend.resize(&resolution)
    }

    /// Run the frame callback for `ticket`.
    ///
    /// # Errors
    ///
    /// A fatal draw error. The background has been unmounted by the time it
    /// is returned.
    pub fn on_frame(&mut self, ticket: FrameTicket) -> Result<FrameOutcome, RenderError> {
        if self.phase != Phase::Mounted {
            return Ok(FrameOutcome::Ignored);
        }
        let Some(backend) = self.backend.as_mut() else {
            return Ok(FrameOutcome::Ignored);
        };

        match self.render_loop.tick(ticket, &mut self.host, backend) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                if let Err(teardown) = self.unmount() {
                    tracing::warn!("{teardown}");
                }
                Err(e)
            }
        }
    }

    /// Remove the resize listener, stop the loop, detach the output and
    /// release the backend. Every step runs even if an earlier one fails.
    ///
    /// Idempotent, and safe on a background that was never mounted.
    ///
    /// # Errors
    ///
    /// [`RenderError::Teardown`] listing every step that failed.
    pub fn unmount(&mut self) -> Result<(), RenderError> {
        if self.phase == Phase::Disposed {
            return Ok(());
        }
        let failures = self.teardown();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(RenderError::Teardown(failures))
        }
    }

    fn teardown(&mut self) -> Vec<String> {
        let mut failures = Vec::new();

        if let Some(id) = self.listener.take() {
            self.host.remove_resize_listener(id);
        }
        self.render_loop.stop(&mut self.host);

        if let Some(mut backend) = self.backend.take() {
            if let Err(e) = backend.detach() {
                tracing::warn!("detaching surface failed: {e}");
                failures.push(format!("detach: {e}"));
            }
            if let Err(e) = backend.release() {
                tracing::warn!("releasing GPU resources failed: {e}");
                failures.push(format!("release: {e}"));
            }
        }

        if self.phase != Phase::Disposed {
            tracing::info!(frames = self.render_loop.frames(), "lava background unmounted");
        }
        self.phase = Phase::Disposed;
        failures
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn loop_state(&self) -> LoopState {
        self.render_loop.state()
    }

    #[must_use]
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Simulated seconds at the last drawn frame.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.render_loop.time()
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }
}

impl<H: Host, B: FrameBackend, C: Clock> Drop for LavaBackground<H, B, C> {
    fn drop(&mut self) {
        if let Err(e) = self.unmount() {
            tracing::warn!("{e}");
        }
    }
}
