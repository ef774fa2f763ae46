//! 8-bit straight-alpha color samples and their normalized float form.

/// Convert a color byte to the unit interval, sampling the middle of its quantization bucket.
///
/// `byte_from_unit(unit_from_byte(b)) == b` for every byte.
pub fn unit_from_byte(x: u8) -> f32 {
    (0.5 + f32::from(x)) / 255.0
}

/// Scale a unit value to a byte, truncating and clamping into `[0, 255]`.
pub fn byte_from_unit(x: f32) -> u8 {
    (x * 255.0).clamp(0.0, 255.0) as u8
}

/// Alpha byte as coverage in `[0, 1]` (no bucket offset: 0 is fully transparent, 255 opaque).
pub fn coverage_from_byte(a: u8) -> f32 {
    f32::from(a) / 255.0
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ColorSample {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl ColorSample {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Build a sample from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque sample.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Channels as `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Inverse of [`ColorSample::to_array`].
    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }

    /// Negate the color channels (`255 - c`); alpha passes through.
    pub const fn invert(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b, self.a)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Alpha as coverage in `[0, 1]`.
    pub fn coverage(self) -> f32 {
        coverage_from_byte(self.a)
    }

    /// Normalized float form of this sample.
    pub fn normalized(self) -> NormalizedColor {
        NormalizedColor {
            rgb: [
                unit_from_byte(self.r),
                unit_from_byte(self.g),
                unit_from_byte(self.b),
            ],
            alpha: self.coverage(),
        }
    }
}

impl From<[u8; 4]> for ColorSample {
    fn from(value: [u8; 4]) -> Self {
        Self::from_array(value)
    }
}

impl From<ColorSample> for [u8; 4] {
    fn from(value: ColorSample) -> Self {
        value.to_array()
    }
}

/// Float RGB triple as consumed by channel blend functions.
pub type Rgb = [f32; 3];

/// Color in `[0, 1]` floats with straight coverage alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedColor {
    /// Red, green, blue.
    pub rgb: Rgb,
    /// Coverage alpha.
    pub alpha: f32,
}

impl NormalizedColor {
    /// Quantize back to bytes; out-of-range values clamp.
    pub fn to_sample(self) -> ColorSample {
        ColorSample::new(
            byte_from_unit(self.rgb[0]),
            byte_from_unit(self.rgb[1]),
            byte_from_unit(self.rgb[2]),
            byte_from_unit(self.alpha),
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/color/sample.rs"]
mod tests;
