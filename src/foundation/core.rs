use crate::foundation::error::{TilewipeError, TilewipeResult};

/// Absolute 0-based frame index within a run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames per second. Always finite and strictly positive once constructed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fps(f64);

impl Fps {
    /// Create a validated FPS value.
    pub fn new(fps: f64) -> TilewipeResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(TilewipeError::validation(format!(
                "fps must be finite and > 0, got {fps}"
            )));
        }
        Ok(Self(fps))
    }

    /// Raw frames-per-second value.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Timeline position of `frame` in seconds.
    pub fn frame_to_secs(self, frame: FrameIndex) -> f64 {
        frame.0 as f64 / self.0
    }
}

impl TryFrom<f64> for Fps {
    type Error = TilewipeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Fps> for f64 {
    fn from(value: Fps) -> Self {
        value.0
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas; both sides must be non-zero.
    pub fn new(width: u32, height: u32) -> TilewipeResult<Self> {
        if width == 0 || height == 0 {
            return Err(TilewipeError::validation(format!(
                "canvas must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Immutable per-frame parameters handed to a renderer.
///
/// One is built per frame and owned by the worker rendering it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// Frame being rendered.
    pub frame: FrameIndex,
    /// Frames per second of the run.
    pub fps: Fps,
    /// Elapsed time in seconds, `frame / fps`.
    pub time: f64,
    /// Total run duration in seconds, fixed for the whole run.
    pub duration: f64,
    /// Output size.
    pub canvas: Canvas,
}

impl FrameContext {
    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }
}

/// Run-level parameters: fps, canvas and the duration fixed once at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    fps: Fps,
    canvas: Canvas,
    duration: f64,
}

impl Timeline {
    /// Create a timeline. `duration` is in seconds and must be finite and non-negative.
    pub fn new(fps: Fps, canvas: Canvas, duration: f64) -> TilewipeResult<Self> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(TilewipeError::validation(format!(
                "duration must be finite and >= 0, got {duration}"
            )));
        }
        Ok(Self {
            fps,
            canvas,
            duration,
        })
    }

    /// Frames per second.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Output size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of frames in the run: every frame index `f` with `f < fps * duration`.
    pub fn frame_count(&self) -> u64 {
        (self.fps.as_f64() * self.duration).ceil().max(0.0) as u64
    }

    /// Build the immutable context for `frame`.
    pub fn context(&self, frame: FrameIndex) -> FrameContext {
        FrameContext {
            frame,
            fps: self.fps,
            time: self.fps.frame_to_secs(frame),
            duration: self.duration,
            canvas: self.canvas,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
