use std::sync::{Mutex, PoisonError};

use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::TilewipeResult;
use crate::render::frame::FrameBuffer;

/// Run parameters given to a [`FrameSink`] before any frame arrives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinkConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Frames per second of the run.
    pub fps: Fps,
    /// Frames the sink will receive.
    pub frame_count: u64,
}

/// Consumer of finished frames.
///
/// Ordering contract: `write_frame` may be called concurrently from several workers and in any
/// order; `idx` is the only link between a buffer and its position in the run. `begin` runs
/// once before the first frame and `end` once after the last.
pub trait FrameSink: Sync {
    /// Called once before any frame is written.
    fn begin(&self, _cfg: &SinkConfig) -> TilewipeResult<()> {
        Ok(())
    }

    /// Take ownership of the finished frame `idx`.
    fn write_frame(&self, idx: FrameIndex, frame: FrameBuffer) -> TilewipeResult<()>;

    /// Called once after every frame has been written.
    fn end(&self) -> TilewipeResult<()> {
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Mutex<Option<SinkConfig>>,
    frames: Mutex<Vec<(FrameIndex, FrameBuffer)>>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        *self.cfg.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of frames received so far.
    pub fn len(&self) -> usize {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Return `true` when no frame has been received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the sink, returning frames sorted by index.
    pub fn into_frames(self) -> Vec<(FrameIndex, FrameBuffer)> {
        let mut frames = self
            .frames
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        frames.sort_by_key(|(idx, _)| *idx);
        frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&self, cfg: &SinkConfig) -> TilewipeResult<()> {
        *self.cfg.lock().unwrap_or_else(PoisonError::into_inner) = Some(*cfg);
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }

    fn write_frame(&self, idx: FrameIndex, frame: FrameBuffer) -> TilewipeResult<()> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((idx, frame));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
