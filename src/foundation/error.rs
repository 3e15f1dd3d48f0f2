/// Convenience result type used across the renderer.
pub type RenderResult<T> = Result<T, RenderError>;

/// Top-level error taxonomy used by renderer APIs.
///
/// Geometry that falls outside the frustum or the buffer is dropped silently and never
/// shows up here; only caller mistakes and pool failures do.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// A draw call received the wrong number of vertices.
    #[error("usage fault: expected {expected} vertices, got {got}")]
    UsageFault {
        /// Number of vertices the call requires.
        expected: usize,
        /// Number of vertices the caller passed.
        got: usize,
    },

    /// Invalid construction parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// A job dispatched on the worker pool panicked.
    #[error("worker job panicked: {0}")]
    JobPanicked(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenderError {
    /// Build a [`RenderError::UsageFault`] value.
    pub fn usage(expected: usize, got: usize) -> Self {
        Self::UsageFault { expected, got }
    }

    /// Build a [`RenderError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RenderError::JobPanicked`] value.
    pub fn job_panicked(msg: impl Into<String>) -> Self {
        Self::JobPanicked(msg.into())
    }

    /// Build a [`RenderError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
