use kurbo::{Point, Vec2};

use crate::animation::shape::{EdgeMode, rectangle_hit};
use crate::foundation::core::Canvas;
use crate::foundation::error::{TilewipeError, TilewipeResult};
use crate::foundation::math::saturate_f64;

/// Fraction a tile shrinks by while hidden (`scale = 1 - (1 - p) * SHRINK`).
const SHRINK: f64 = 0.4;
/// Rotation of a hidden tile, in turns (`rotation = (1 - p) * TWIST`).
const TWIST: f64 = 0.2;

/// Timing and grid constants of the transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TileTiming {
    /// Tiles stacked vertically; the tile edge is `height / vertical_count` pixels.
    pub vertical_count: u32,
    /// Seconds a single tile takes to appear (and to disappear).
    pub fade_in: f64,
    /// Seconds between consecutive stagger ids.
    pub stagger_delay: f64,
    /// Seconds the fully covered state is held before the reverse phase.
    pub hold_mid: f64,
}

impl Default for TileTiming {
    fn default() -> Self {
        Self {
            vertical_count: 9,
            fade_in: 0.4,
            stagger_delay: 0.06,
            hold_mid: 0.2,
        }
    }
}

impl TileTiming {
    /// Reject timings that would produce an empty grid or divide by zero.
    pub fn validate(&self) -> TilewipeResult<()> {
        if self.vertical_count == 0 {
            return Err(TilewipeError::validation("vertical_count must be >= 1"));
        }
        if !(self.fade_in.is_finite() && self.fade_in > 0.0) {
            return Err(TilewipeError::validation("fade_in must be finite and > 0"));
        }
        for (name, v) in [
            ("stagger_delay", self.stagger_delay),
            ("hold_mid", self.hold_mid),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(TilewipeError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Animation state of one tile at one instant. Only exists while the tile is visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileState {
    /// Grid row.
    pub row: u32,
    /// Grid column.
    pub col: u32,
    /// Animation progress in `(0, 1]`.
    pub progress: f64,
    /// Size relative to a full tile.
    pub scale: f64,
    /// Rotation in turns.
    pub rotation: f64,
}

impl TileState {
    fn new(row: u32, col: u32, progress: f64) -> Self {
        let hidden = 1.0 - progress;
        Self {
            row,
            col,
            progress,
            scale: 1.0 - hidden * SHRINK,
            rotation: hidden * TWIST,
        }
    }
}

/// How opacity falls off from the tile center.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum OpacityProfile {
    /// Radial falloff, `(lx² + ly²)^0.3`.
    #[default]
    Round,
    /// Chebyshev falloff, `max(|lx|, |ly|)^0.4`.
    Square,
}

impl OpacityProfile {
    fn falloff(self, local: Point) -> f64 {
        match self {
            Self::Round => (local.x * local.x + local.y * local.y).powf(0.3),
            Self::Square => local.x.abs().max(local.y.abs()).powf(0.4),
        }
    }
}

/// A pixel that landed inside a visible tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSample {
    /// Local coordinate inside the tile, both axes in `[-1, 1)`.
    pub local: Point,
    /// Progress of the tile that was hit.
    pub progress: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

/// The tile grid for one canvas plus its timing: a pure function of pixel, tile and time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileAnimation {
    timing: TileTiming,
    tile_size: f64,
    rows: u32,
    cols: u32,
}

impl TileAnimation {
    /// Lay out the grid for `canvas`.
    ///
    /// The tile edge is the integer `height / vertical_count`; columns cover the full width.
    pub fn new(canvas: Canvas, timing: TileTiming) -> TilewipeResult<Self> {
        timing.validate()?;
        let tile_px = canvas.height / timing.vertical_count;
        if tile_px == 0 {
            return Err(TilewipeError::validation(format!(
                "canvas height {} is smaller than vertical_count {}",
                canvas.height, timing.vertical_count
            )));
        }
        let tile_size = f64::from(tile_px);
        let cols = (f64::from(canvas.width) / tile_size).ceil() as u32;
        Ok(Self {
            timing,
            tile_size,
            rows: timing.vertical_count,
            cols,
        })
    }

    /// Timing constants.
    pub fn timing(&self) -> TileTiming {
        self.timing
    }

    /// Tile edge in pixels.
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Rows in the grid.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Columns in the grid.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Stagger id of a tile: `row + col`.
    pub fn stagger(row: u32, col: u32) -> u32 {
        row + col
    }

    /// Time until the last tile has fully appeared.
    pub fn appear_span(&self) -> f64 {
        f64::from(self.rows + self.cols - 2) * self.timing.stagger_delay + self.timing.fade_in
    }

    /// Total duration: appear, hold, disappear.
    pub fn duration(&self) -> f64 {
        2.0 * self.appear_span() + self.timing.hold_mid
    }

    /// Progress of a tile with `stagger` at time `t`; `0` means hidden.
    ///
    /// Exactly `0` from [`TileAnimation::duration`] on, for every tile.
    pub fn progress(&self, stagger: u32, t: f64) -> f64 {
        // The last stagger's reverse term can round to just under 1 at the end.
        if t >= self.duration() {
            return 0.0;
        }
        let TileTiming {
            fade_in,
            stagger_delay,
            hold_mid,
            ..
        } = self.timing;
        let offset = f64::from(stagger) * stagger_delay;
        let appear = saturate_f64((t - offset) / fade_in);
        let reverse = saturate_f64((t - (self.appear_span() + hold_mid) - offset) / fade_in);
        appear.min(1.0 - reverse)
    }

    /// State of tile `(row, col)` at `t`, or `None` while it is hidden.
    pub fn tile_state(&self, row: u32, col: u32, t: f64) -> Option<TileState> {
        let progress = self.progress(Self::stagger(row, col), t);
        (progress != 0.0).then(|| TileState::new(row, col, progress))
    }

    /// Every visible tile at `t`, row-major.
    pub fn visible_tiles(&self, t: f64) -> Vec<TileState> {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .filter_map(|(row, col)| self.tile_state(row, col, t))
            .collect()
    }

    /// Center of tile `(row, col)` in pixel space.
    pub fn center(&self, row: u32, col: u32) -> Point {
        Point::new(
            (f64::from(col) + 0.5) * self.tile_size,
            (f64::from(row) + 0.5) * self.tile_size,
        )
    }

    /// Hit-test pixel `(x, y)` against a visible tile and compute its opacity.
    pub fn sample(
        &self,
        state: &TileState,
        x: u32,
        y: u32,
        profile: OpacityProfile,
    ) -> Option<TileSample> {
        let offset = Point::new(f64::from(x), f64::from(y)) - self.center(state.row, state.col);
        let half = self.tile_size / 2.0 * state.scale;

        // A rotated square never reaches past its circumscribed circle.
        let reach = half * 1.5;
        if offset.x.abs() > reach || offset.y.abs() > reach {
            return None;
        }

        let local = rectangle_hit(
            offset,
            Vec2::new(half, half),
            state.rotation,
            EdgeMode::HalfOpen,
        )?;
        let fade = saturate_f64(2.0 * (1.0 - state.progress));
        let opacity = saturate_f64((1.0 - profile.falloff(local) * fade) * state.progress);
        Some(TileSample {
            local,
            progress: state.progress,
            opacity,
        })
    }

    /// Evaluate tile `(row, col)` for pixel `(x, y)` at `t` in one call.
    pub fn evaluate(
        &self,
        row: u32,
        col: u32,
        x: u32,
        y: u32,
        t: f64,
        profile: OpacityProfile,
    ) -> Option<TileSample> {
        let state = self.tile_state(row, col, t)?;
        self.sample(&state, x, y, profile)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tiles.rs"]
mod tests;
