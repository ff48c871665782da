use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create rendering context: {0}")]
    Context(String),
    #[error("shader rejected: {0}")]
    Shader(String),
    #[error("frame skipped: {0}")]
    Surface(String),
    #[error("GPU out of memory")]
    OutOfMemory,
    #[error("drawing surface detached")]
    Detached,
    #[error("GPU resources already released")]
    Released,
    #[error("snapshot failed: {0}")]
    Snapshot(String),
    #[error("teardown failed in {} step(s): {}", .0.len(), .0.join("; "))]
    Teardown(Vec<String>),
    #[error("background already mounted")]
    AlreadyMounted,
    #[error("background already disposed")]
    AlreadyDisposed,
}

impl RenderError {
    /// Errors after which the render loop must not continue.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RenderError::OutOfMemory | RenderError::Detached | RenderError::Released
        )
    }
}
