//! Run configuration: output size, frame rate, worker count and the look of the transition.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::animation::tiles::{OpacityProfile, TileTiming};
use crate::blend::modes::BlendMode;
use crate::color::ColorSample;
use crate::encode::png::PngSequenceSink;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{TilewipeError, TilewipeResult};
use crate::render::compositor::TileTransitionOpts;
use crate::render::gradient::{GradientRamp, RampPreset};

/// Everything needed to render one run, loadable from JSON.
///
/// Missing fields take their defaults, so `{}` is a valid config describing a 30 fps
/// 1920x1080 render into `png/out_NNNNNN.png`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Frames per second.
    pub fps: f64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Frames rendered concurrently.
    pub workers: usize,
    /// Directory the PNG sequence is written to.
    pub out_dir: PathBuf,
    /// File name prefix for every frame.
    pub file_prefix: String,
    /// Color every pixel starts from before tiles are blended on.
    pub background: ColorSample,
    /// Blend mode used for each tile.
    pub blend: BlendMode,
    /// Tile color ramp.
    pub ramp: RampPreset,
    /// Opacity falloff inside a tile.
    pub profile: OpacityProfile,
    /// Grid and timing constants.
    pub timing: TileTiming,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fps: 30.0,
            width: 1920,
            height: 1080,
            workers: 8,
            out_dir: PathBuf::from("png"),
            file_prefix: "out_".to_string(),
            background: ColorSample::TRANSPARENT,
            blend: BlendMode::Screen,
            ramp: RampPreset::Sunset,
            profile: OpacityProfile::Round,
            timing: TileTiming::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a config from a JSON reader. The result is not validated.
    pub fn from_reader<R: std::io::Read>(r: R) -> TilewipeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TilewipeError::validation(format!("parse config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk. The result is not validated.
    pub fn from_path(path: impl AsRef<Path>) -> TilewipeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TilewipeError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field that rendering depends on.
    pub fn validate(&self) -> TilewipeResult<()> {
        self.fps()?;
        let canvas = self.canvas()?;
        if self.workers == 0 {
            return Err(TilewipeError::validation("workers must be >= 1"));
        }
        if self.file_prefix.contains(['/', '\\']) {
            return Err(TilewipeError::validation(format!(
                "file_prefix must not contain path separators, got '{}'",
                self.file_prefix
            )));
        }
        self.timing.validate()?;
        if canvas.height < self.timing.vertical_count {
            return Err(TilewipeError::validation(format!(
                "height {} is smaller than vertical_count {}",
                canvas.height, self.timing.vertical_count
            )));
        }
        Ok(())
    }

    /// Validated frame rate.
    pub fn fps(&self) -> TilewipeResult<Fps> {
        Fps::new(self.fps)
    }

    /// Validated output size.
    pub fn canvas(&self) -> TilewipeResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// Renderer options described by this config.
    pub fn transition_opts(&self) -> TileTransitionOpts {
        TileTransitionOpts {
            timing: self.timing,
            blend: self.blend,
            ramp: GradientRamp::from(self.ramp),
            profile: self.profile,
            background: self.background,
        }
    }

    /// PNG sink writing into [`RenderConfig::out_dir`].
    pub fn sink(&self) -> PngSequenceSink {
        PngSequenceSink::new(&self.out_dir, &self.file_prefix)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
