use std::path::{Path, PathBuf};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TilewipeError, TilewipeResult};
use crate::render::frame::FrameBuffer;

/// File name for frame `idx`: `prefix` followed by the index zero-padded to six digits.
///
/// ```
/// use tilewipe::{FrameIndex, frame_file_name};
/// assert_eq!(frame_file_name("out_", FrameIndex(7)), "out_000007.png");
/// ```
pub fn frame_file_name(prefix: &str, idx: FrameIndex) -> String {
    format!("{prefix}{:06}.png", idx.0)
}

/// Writes each frame to its own RGBA PNG under one directory.
///
/// Files are independent, so workers may write them in any order.
#[derive(Clone, Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
}

impl PngSequenceSink {
    /// Sink writing `<dir>/<prefix>NNNNNN.png`.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path frame `idx` is written to.
    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(frame_file_name(&self.prefix, idx))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&self, cfg: &SinkConfig) -> TilewipeResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        tracing::debug!(
            dir = %self.dir.display(),
            frames = cfg.frame_count,
            "writing png sequence"
        );
        Ok(())
    }

    fn write_frame(&self, idx: FrameIndex, frame: FrameBuffer) -> TilewipeResult<()> {
        let path = self.path_for(idx);
        image::save_buffer_with_format(
            &path,
            &frame.to_rgba8(),
            frame.width(),
            frame.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| TilewipeError::encode(format!("write png '{}': {e}", path.display())))?;
        tracing::trace!(path = %path.display(), "frame written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
