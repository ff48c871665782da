//! Frame scheduling state machine.
//!
//! `Uninitialized -> Running -> Disposed`. While running exactly one frame
//! callback is armed at a time; it is re-armed only after the current draw
//! has returned. Stopping cancels the armed callback before anything else
//! can be released, and a disposed loop never re-arms.

use crate::backend::FrameBackend;
use crate::clock::Clock;
use crate::error::RenderError;
use crate::host::{FrameTicket, Host};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// One draw was issued at `time` seconds.
    Drawn { time: f32, frame: u64 },
    /// The draw failed without invalidating the backend; the loop re-armed.
    Skipped,
    /// Stale ticket, or the loop is not running. Nothing was drawn.
    Ignored,
}

pub struct RenderLoop<C: Clock> {
    clock: C,
    state: LoopState,
    started_at: std::time::Duration,
    pending: Option<FrameTicket>,
    time: f32,
    frames: u64,
}

impl<C: Clock> RenderLoop<C> {
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: LoopState::Uninitialized,
            started_at: std::time::Duration::ZERO,
            pending: None,
            time: 0.0,
            frames: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Seconds since start as of the last frame.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }

    /// Record the start time and arm the first frame.
    ///
    /// # Errors
    ///
    /// [`RenderError::AlreadyDisposed`] once the loop has been stopped.
    pub fn start<H: Host>(&mut self, host: &mut H) -> Result<(), RenderError> {
        match self.state {
            LoopState::Uninitialized => {
                self.started_at = self.clock.now();
                self.state = LoopState::Running;
                self.pending = Some(host.request_frame());
                tracing::info!("render loop started");
                Ok(())
            }
            LoopState::Running => Ok(()),
            LoopState::Disposed => Err(RenderError::AlreadyDisposed),
        }
    }

    /// Run the frame armed under `ticket`.
    ///
    /// # Errors
    ///
    /// A fatal backend error; the loop is stopped before it is returned.
    pub fn tick<H: Host, B: FrameBackend>(
        &mut self,
        ticket: FrameTicket,
        host: &mut H,
        backend: &mut B,
    ) -> Result<FrameOutcome, RenderError> {
        if self.state != LoopState::Running || self.pending != Some(ticket) {
            tracing::trace!(?ticket, state = ?self.state, "ignoring frame callback");
            return Ok(FrameOutcome::Ignored);
        }
        self.pending = None;

        let elapsed = self.clock.now().saturating_sub(self.started_at).as_secs_f32();
        self.time = self.time.max(elapsed);

        let outcome = match backend.draw(self.time) {
            Ok(()) => {
                self.frames += 1;
                if self.frames % 600 == 0 {
                    tracing::debug!(frames = self.frames, time = self.time, "render loop alive");
                }
                FrameOutcome::Drawn {
                    time: self.time,
                    frame: self.frames,
                }
            }
            Err(e) if e.is_fatal() => {
                tracing::error!("fatal error drawing frame: {e}");
                self.stop(host);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("{e}");
                FrameOutcome::Skipped
            }
        };

        self.pending = Some(host.request_frame());
        Ok(outcome)
    }

    /// Cancel the armed frame and dispose. Safe to call repeatedly.
    pub fn stop<H: Host>(&mut self, host: &mut H) {
        if let Some(ticket) = self.pending.take() {
            host.cancel_frame(ticket);
        }
        if self.state != LoopState::Disposed {
            tracing::info!(frames = self.frames, "render loop stopped");
            self.state = LoopState::Disposed;
        }
    }
}
