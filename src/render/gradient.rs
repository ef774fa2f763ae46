use crate::foundation::math::{dot, lerp_multi};

/// Named gradient presets selectable from configuration.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RampPreset {
    /// Eight stops from pale cream through magenta to deep navy.
    #[default]
    Sunset,
    /// Two stops from lavender to pink.
    Pastel,
}

/// Evenly spaced RGB color stops sampled along the canvas diagonal.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientRamp {
    channels: [Vec<f32>; 3],
    reversed: bool,
}

impl GradientRamp {
    /// Build a ramp from RGB stops. With `reversed`, the key `k` samples at `1 - k`.
    pub fn new(stops: &[[u8; 3]], reversed: bool) -> Self {
        let channels =
            std::array::from_fn(|c| stops.iter().map(|s| f32::from(s[c])).collect::<Vec<_>>());
        Self { channels, reversed }
    }

    /// The default eight-stop ramp; the bottom-right corner gets the first stop.
    pub fn sunset() -> Self {
        Self::new(
            &[
                [219, 220, 215],
                [221, 220, 215],
                [226, 201, 204],
                [231, 98, 125],
                [184, 35, 90],
                [128, 19, 87],
                [61, 22, 53],
                [28, 26, 39],
            ],
            true,
        )
    }

    /// Two-stop lavender-to-pink ramp.
    pub fn pastel() -> Self {
        Self::new(&[[201, 147, 255], [255, 143, 162]], false)
    }

    /// Color at key `k` in `[0, 1]`, channels truncated to bytes.
    pub fn sample(&self, k: f32) -> [u8; 3] {
        let mix = if self.reversed { 1.0 - k } else { k };
        self.channels.each_ref().map(|c| lerp_multi(c, mix) as u8)
    }

    /// Projection of pixel `(x, y)` onto the `(width, height)` diagonal, `0` at the origin and
    /// `1` at the far corner.
    pub fn diagonal_key(width: u32, height: u32, x: u32, y: u32) -> f32 {
        let diagonal = [width as f32, height as f32];
        dot(diagonal, [x as f32, y as f32]) / dot(diagonal, diagonal)
    }
}

impl From<RampPreset> for GradientRamp {
    fn from(preset: RampPreset) -> Self {
        match preset {
            RampPreset::Sunset => Self::sunset(),
            RampPreset::Pastel => Self::pastel(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
