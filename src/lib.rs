//! Tilewipe renders a staggered square-tile screen transition as a PNG image sequence.
//!
//! The screen is divided into a grid of square tiles. Each tile pops in after a delay
//! proportional to `row + col`, growing and unrotating while its opacity rises, holds fully
//! covered, then plays the same animation in reverse. Tile colors come from a gradient ramp
//! laid along the canvas diagonal and are blended onto the frame with a configurable
//! Porter-Duff style [`BlendMode`].
//!
//! The public API is layered:
//!
//! - [`ColorSample`] and [`composite`] / [`BlendMode`]: the pixel blend algebra
//! - [`TileAnimation`]: pure per-pixel, per-tile, per-time evaluation
//! - [`TileTransition`]: a [`FrameRenderer`] that fills a [`FrameBuffer`]
//! - [`RenderScheduler`]: renders a [`Timeline`] into any [`FrameSink`] on a worker pool
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod blend;
pub(crate) mod color;
/// Run configuration.
pub mod config;
/// Frame sinks.
pub mod encode;
/// Rendering: frame buffers, compositor and scheduler.
pub mod render;

pub use crate::foundation::core::{Canvas, Fps, FrameContext, FrameIndex, Timeline};
pub use crate::foundation::error::{TilewipeError, TilewipeResult};
pub use crate::foundation::math::{lerp, lerp_multi, saturate};

pub use crate::animation::shape::{EdgeMode, circle_hit, rectangle_hit};
pub use crate::animation::tiles::{
    OpacityProfile, TileAnimation, TileSample, TileState, TileTiming,
};
pub use crate::blend::algebra::{ChannelBlend, composite, composite_with};
pub use crate::blend::modes::BlendMode;
pub use crate::color::{
    ColorSample, NormalizedColor, Rgb, byte_from_unit, coverage_from_byte, unit_from_byte,
};
pub use crate::config::RenderConfig;
pub use crate::encode::png::{PngSequenceSink, frame_file_name};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::compositor::{FrameRenderer, TileTransition, TileTransitionOpts};
pub use crate::render::frame::FrameBuffer;
pub use crate::render::gradient::{GradientRamp, RampPreset};
pub use crate::render::scheduler::{Progress, RenderScheduler, RenderStats};
