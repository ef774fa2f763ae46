use crate::color::{ColorSample, NormalizedColor, Rgb};
use crate::foundation::math::saturate;

/// Per-channel blend function applied to `(dst, src)` normalized colors.
///
/// Selected at runtime; every [`BlendMode`](crate::BlendMode) maps to one of these plus a pair
/// of coverage factors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelBlend {
    /// Source color unchanged.
    Source,
    /// Componentwise `dst * src`.
    Multiply,
    /// Componentwise `clamp01(dst + src)`.
    Add,
}

impl ChannelBlend {
    /// Evaluate the channel function.
    pub fn apply(self, dst: Rgb, src: Rgb) -> Rgb {
        match self {
            Self::Source => src,
            Self::Multiply => [dst[0] * src[0], dst[1] * src[1], dst[2] * src[2]],
            Self::Add => [
                saturate(dst[0] + src[0]),
                saturate(dst[1] + src[1]),
                saturate(dst[2] + src[2]),
            ],
        }
    }
}

/// Composite `src` onto `dst` with coverage factors `fd`/`fs` and channel function `blend`.
///
/// See [`composite_with`] for the formula.
pub fn composite(
    dst: ColorSample,
    src: ColorSample,
    fd: f32,
    fs: f32,
    blend: ChannelBlend,
) -> ColorSample {
    composite_with(dst, src, fd, fs, |d, s| blend.apply(d, s))
}

/// Generalized Porter-Duff composite with an arbitrary channel function.
///
/// With `Ad`/`As` the coverages and `Cd`/`Cs` the normalized colors:
///
/// - `alpha = clamp01(Ad*fd + As*fs)`; below one byte step the result is transparent black
/// - `b = blend(Cd, Cs)`
/// - `Ctmp = Ad*b + (1 - Ad)*Cs`
/// - `C = (Ad*fd*Cd + As*fs*Ctmp) / alpha`
///
/// The factors are not required to lie in `[0, 1]` or to sum to one; every channel is clamped
/// when quantized back to bytes.
pub fn composite_with<F>(
    dst: ColorSample,
    src: ColorSample,
    fd: f32,
    fs: f32,
    blend: F,
) -> ColorSample
where
    F: Fn(Rgb, Rgb) -> Rgb,
{
    let d = dst.normalized();
    let s = src.normalized();
    let (ad, as_) = (d.alpha, s.alpha);

    let alpha = saturate(ad * fd + as_ * fs);
    if alpha * 255.0 < 1.0 {
        return ColorSample::TRANSPARENT;
    }

    let b = blend(d.rgb, s.rgb);
    let rgb: Rgb = std::array::from_fn(|i| {
        let tmp = ad * b[i] + (1.0 - ad) * s.rgb[i];
        (ad * fd * d.rgb[i] + as_ * fs * tmp) / alpha
    });

    NormalizedColor { rgb, alpha }.to_sample()
}

#[cfg(test)]
#[path = "../../tests/unit/blend/algebra.rs"]
mod tests;
