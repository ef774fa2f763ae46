use std::fmt;
use std::str::FromStr;

use crate::blend::algebra::{ChannelBlend, composite};
use crate::color::ColorSample;
use crate::foundation::error::TilewipeError;

/// Named blend modes, each a fixed `(Fd, Fs, channel fn)` triple over [`composite`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Source over destination.
    Normal,
    /// Componentwise product.
    Multiply,
    /// Inverse of multiply over inverted inputs.
    #[default]
    Screen,
    /// Source-over coverage with a saturating channel sum.
    Add,
    /// Both coverages kept in full, source color.
    AdditiveNormal,
    /// Both coverages kept in full, saturating channel sum.
    AdditiveAdd,
    /// Each side only where the other is absent.
    Xor,
}

impl BlendMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Add,
        Self::AdditiveNormal,
        Self::AdditiveAdd,
        Self::Xor,
    ];

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Add => "add",
            Self::AdditiveNormal => "additive-normal",
            Self::AdditiveAdd => "additive-add",
            Self::Xor => "xor",
        }
    }

    /// Coverage factors `(Fd, Fs)` for compositing `src` over `dst`.
    pub fn coverage(self, dst: ColorSample, src: ColorSample) -> (f32, f32) {
        let inv_src = 1.0 - src.coverage();
        match self {
            Self::Normal | Self::Multiply | Self::Screen | Self::Add => (inv_src, 1.0),
            Self::AdditiveNormal | Self::AdditiveAdd => (1.0, 1.0),
            Self::Xor => (inv_src, 1.0 - dst.coverage()),
        }
    }

    /// Channel function used by this mode.
    pub fn channel(self) -> ChannelBlend {
        match self {
            Self::Normal | Self::AdditiveNormal | Self::Xor => ChannelBlend::Source,
            Self::Multiply | Self::Screen => ChannelBlend::Multiply,
            Self::Add | Self::AdditiveAdd => ChannelBlend::Add,
        }
    }

    /// Blend `src` onto `dst`.
    ///
    /// `Screen` runs multiply on inverted inputs and inverts the result, so a degenerate
    /// (fully transparent) result comes back as transparent white.
    pub fn apply(self, dst: ColorSample, src: ColorSample) -> ColorSample {
        let (fd, fs) = self.coverage(dst, src);
        match self {
            Self::Screen => {
                composite(dst.invert(), src.invert(), fd, fs, self.channel()).invert()
            }
            _ => composite(dst, src, fd, fs, self.channel()),
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = TilewipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| TilewipeError::validation(format!("unknown blend mode '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/modes.rs"]
mod tests;
