/// Convenience result type used across the crate.
pub type TilewipeResult<T> = Result<T, TilewipeError>;

/// Errors raised outside the numeric core.
///
/// Blending and tile evaluation never fail; only configuration, worker pool setup and
/// frame hand-off to a sink can.
#[derive(thiserror::Error, Debug)]
pub enum TilewipeError {
    /// Rejected configuration (fps, canvas size, worker count, timing).
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure while scheduling or running render workers.
    #[error("render error: {0}")]
    Render(String),

    /// Failure while handing a finished frame to a sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TilewipeError {
    /// Build a [`TilewipeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TilewipeError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TilewipeError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
