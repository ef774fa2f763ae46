/// Clamp into `[0, 1]`.
pub fn saturate(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// `f64` variant of [`saturate`], used on the timeline side.
pub fn saturate_f64(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Linear interpolation from `a` to `b`; `mix` is clamped into `[0, 1]` first.
pub fn lerp(a: f32, b: f32, mix: f32) -> f32 {
    (b - a) * saturate(mix) + a
}

/// Piecewise-linear interpolation across evenly spaced `stops`.
///
/// `mix = 0` lands on the first stop and `mix = 1` on the last one. Fewer than two stops
/// degenerate to the single stop (or `0.0` when empty).
pub fn lerp_multi(stops: &[f32], mix: f32) -> f32 {
    match stops {
        [] => 0.0,
        [only] => *only,
        _ => {
            let last = stops.len() - 1;
            let scaled = saturate(mix) * last as f32;
            let section = scaled as usize;
            if section < last {
                lerp(stops[section], stops[section + 1], scaled - section as f32)
            } else {
                stops[last]
            }
        }
    }
}

/// 2D dot product.
pub fn dot(a: [f32; 2], b: [f32; 2]) -> f32 {
    a[0] * b[0] + a[1] * b[1]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
