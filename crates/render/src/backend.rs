//! The GPU resource set behind a [`crate::LavaBackground`].

use sdf::{Frame, Resolution};

use crate::error::RenderError;

/// Drawing resources owned exclusively by the lifecycle manager.
///
/// `detach` and `release` are each called at most once, in that order, during
/// teardown. Nothing is drawn afterwards.
pub trait FrameBackend {
    /// Adopt a new viewport size.
    ///
    /// # Errors
    ///
    /// Backend specific; the lifecycle manager reports it to the caller.
    fn resize(&mut self, resolution: &Resolution) -> Result<(), RenderError>;

    /// Draw one frame at `time` seconds.
    ///
    /// # Errors
    ///
    /// [`RenderError::is_fatal`] decides whether the loop survives the error.
    fn draw(&mut self, time: f32) -> Result<(), RenderError>;

    /// Remove the output from the container.
    ///
    /// # Errors
    ///
    /// Backend specific; teardown continues regardless.
    fn detach(&mut self) -> Result<(), RenderError>;

    /// Free geometry, program and buffers.
    ///
    /// # Errors
    ///
    /// Backend specific; teardown continues regardless.
    fn release(&mut self) -> Result<(), RenderError>;
}

/// Software backend rasterising with [`sdf::render`].
#[derive(Debug)]
pub struct CpuBackend {
    resolution: Resolution,
    frame: Option<Frame>,
    draws: u64,
    attached: bool,
    released: bool,
}

impl CpuBackend {
    #[must_use]
    pub fn new(resolution: &Resolution) -> Self {
        Self {
            resolution: *resolution,
            frame: None,
            draws: 0,
            attached: true,
            released: false,
        }
    }

    /// Most recently drawn frame.
    #[must_use]
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn draws(&self) -> u64 {
        self.draws
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl FrameBackend for CpuBackend {
    fn resize(&mut self, resolution: &Resolution) -> Result<(), RenderError> {
        if self.released {
            return Err(RenderError::Released);
        }
        self.resolution = *resolution;
        Ok(())
    }

    fn draw(&mut self, time: f32) -> Result<(), RenderError> {
        if self.released {
            return Err(RenderError::Released);
        }
        if !self.attached {
            return Err(RenderError::Detached);
        }
        self.frame = Some(sdf::render(time, &self.resolution));
        self.draws += 1;
        Ok(())
    }

    fn detach(&mut self) -> Result<(), RenderError> {
        self.attached = false;
        Ok(())
    }

    fn release(&mut self) -> Result<(), RenderError> {
        self.frame = None;
        self.released = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_follows_resolution() {
        let mut backend = CpuBackend::new(&Resolution::new(8, 4));
        backend.draw(0.0).unwrap();
        backend.resize(&Resolution::new(4, 8)).unwrap();
        backend.draw(0.5).unwrap();
        let frame = backend.frame().unwrap();
        assert_eq!((frame.width, frame.height), (4, 8));
        assert_eq!(backend.draws(), 2);
    }

    #[test]
    fn detached_backend_refuses_to_draw() {
        let mut backend = CpuBackend::new(&Resolution::new(2, 2));
        backend.detach().unwrap();
        assert!(matches!(backend.draw(0.0), Err(RenderError::Detached)));
    }

    #[test]
    fn released_backend_drops_its_frame() {
        let mut backend = CpuBackend::new(&Resolution::new(2, 2));
        backend.draw(0.0).unwrap();
        backend.release().unwrap();
        assert!(backend.frame().is_none());
        assert!(backend.is_released());
        assert!(matches!(backend.draw(0.0), Err(RenderError::Released)));
        assert!(matches!(backend.resize(&Resolution::new(1, 1)), Err(RenderError::Released)));
    }
}
