use crate::animation::tiles::{OpacityProfile, TileAnimation, TileState, TileTiming};
use crate::blend::modes::BlendMode;
use crate::color::{ColorSample, byte_from_unit};
use crate::foundation::core::{Canvas, Fps, FrameContext, Timeline};
use crate::foundation::error::TilewipeResult;
use crate::render::frame::FrameBuffer;
use crate::render::gradient::GradientRamp;

/// Something that can fill one frame from its [`FrameContext`].
///
/// Implementations must be pure with respect to the context: the scheduler calls
/// [`FrameRenderer::render_frame`] concurrently from several workers.
pub trait FrameRenderer: Sync {
    /// Run duration in seconds for `canvas`. Called once per run.
    fn duration_secs(&self, canvas: Canvas) -> TilewipeResult<f64>;

    /// Color every new frame buffer starts from.
    fn background(&self) -> ColorSample {
        ColorSample::TRANSPARENT
    }

    /// Composite onto an already initialized buffer.
    fn render_into(&self, ctx: &FrameContext, frame: &mut FrameBuffer) -> TilewipeResult<()>;

    /// Allocate a buffer filled with [`FrameRenderer::background`] and render into it.
    fn render_frame(&self, ctx: &FrameContext) -> TilewipeResult<FrameBuffer> {
        let mut frame = FrameBuffer::filled(ctx.canvas, self.background());
        self.render_into(ctx, &mut frame)?;
        Ok(frame)
    }

    /// Build the run timeline, fixing the duration once.
    fn timeline(&self, fps: Fps, canvas: Canvas) -> TilewipeResult<Timeline> {
        Timeline::new(fps, canvas, self.duration_secs(canvas)?)
    }
}

/// Look of the tile transition.
#[derive(Clone, Debug, PartialEq)]
pub struct TileTransitionOpts {
    /// Grid and timing constants.
    pub timing: TileTiming,
    /// Mode used to blend each tile onto the accumulator.
    pub blend: BlendMode,
    /// Tile colors, keyed on the canvas diagonal.
    pub ramp: GradientRamp,
    /// Opacity falloff inside a tile.
    pub profile: OpacityProfile,
    /// Accumulator seed for every pixel.
    pub background: ColorSample,
}

impl Default for TileTransitionOpts {
    fn default() -> Self {
        Self {
            timing: TileTiming::default(),
            blend: BlendMode::Screen,
            ramp: GradientRamp::sunset(),
            profile: OpacityProfile::Round,
            background: ColorSample::TRANSPARENT,
        }
    }
}

/// Staggered square-tile transition.
///
/// Each pixel starts at the background color and every visible tile covering it is blended on
/// in row-major tile order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileTransition {
    opts: TileTransitionOpts,
}

impl TileTransition {
    /// Create a transition renderer.
    pub fn new(opts: TileTransitionOpts) -> Self {
        Self { opts }
    }

    /// Options this renderer was built with.
    pub fn opts(&self) -> &TileTransitionOpts {
        &self.opts
    }

    /// Grid for the frame described by `ctx`.
    pub fn animation(&self, ctx: &FrameContext) -> TilewipeResult<TileAnimation> {
        TileAnimation::new(ctx.canvas, self.opts.timing)
    }

    /// Final color of pixel `(x, y)` starting from `dst`, independent of any other pixel.
    pub fn shade_pixel(
        &self,
        ctx: &FrameContext,
        x: u32,
        y: u32,
        dst: ColorSample,
    ) -> TilewipeResult<ColorSample> {
        let anim = self.animation(ctx)?;
        let tiles = anim.visible_tiles(ctx.time);
        Ok(self.shade(&anim, &tiles, ctx, x, y, dst))
    }

    fn shade(
        &self,
        anim: &TileAnimation,
        tiles: &[TileState],
        ctx: &FrameContext,
        x: u32,
        y: u32,
        dst: ColorSample,
    ) -> ColorSample {
        let mut acc = dst;
        let mut color = None;
        for tile in tiles {
            let Some(hit) = anim.sample(tile, x, y, self.opts.profile) else {
                continue;
            };
            let [r, g, b] = *color.get_or_insert_with(|| {
                let key = GradientRamp::diagonal_key(ctx.width(), ctx.height(), x, y);
                self.opts.ramp.sample(key)
            });
            let src = ColorSample::new(r, g, b, byte_from_unit(hit.opacity as f32));
            acc = self.opts.blend.apply(acc, src);
        }
        acc
    }
}

impl FrameRenderer for TileTransition {
    fn duration_secs(&self, canvas: Canvas) -> TilewipeResult<f64> {
        Ok(TileAnimation::new(canvas, self.opts.timing)?.duration())
    }

    fn background(&self) -> ColorSample {
        self.opts.background
    }

    #[tracing::instrument(level = "trace", skip_all, fields(frame = ctx.frame.0))]
    fn render_into(&self, ctx: &FrameContext, frame: &mut FrameBuffer) -> TilewipeResult<()> {
        let anim = self.animation(ctx)?;
        let tiles = anim.visible_tiles(ctx.time);
        if tiles.is_empty() {
            return Ok(());
        }

        for (y, row) in (0u32..).zip(frame.rows_mut()) {
            for (x, px) in (0u32..).zip(row.iter_mut()) {
                *px = self.shade(&anim, &tiles, ctx, x, y, *px);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
