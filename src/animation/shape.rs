use kurbo::{Affine, Point, Vec2};

/// Which edges of the `[-1, 1]` square count as inside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeMode {
    /// `[-1, 1)` on both axes, so abutting tiles never share a pixel.
    #[default]
    HalfOpen,
    /// `[-1, 1]` on both axes, for isolated shapes.
    Closed,
}

impl EdgeMode {
    fn contains(self, v: f64) -> bool {
        match self {
            Self::HalfOpen => (-1.0..1.0).contains(&v),
            Self::Closed => (-1.0..=1.0).contains(&v),
        }
    }
}

/// Hit-test a rotated rectangle.
///
/// `offset` is the pixel position relative to the rectangle center, `half_extent` the half
/// width/height and `turns` the rotation as a fraction of a full turn. On a hit, returns the
/// local coordinate with both axes in `[-1, 1]`.
pub fn rectangle_hit(
    offset: Vec2,
    half_extent: Vec2,
    turns: f64,
    edges: EdgeMode,
) -> Option<Point> {
    let rotated = Affine::rotate(turns * std::f64::consts::TAU) * offset.to_point();
    let local = Point::new(rotated.x / half_extent.x, rotated.y / half_extent.y);
    (edges.contains(local.x) && edges.contains(local.y)).then_some(local)
}

/// Hit-test a circle of `radius` centered at the origin.
///
/// On a hit, returns the squared normalized distance `(dx² + dy²) / r²` in `[0, 1]`.
pub fn circle_hit(offset: Vec2, radius: f64) -> Option<f64> {
    let d = offset.hypot2() / (radius * radius);
    (d <= 1.0).then_some(d)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/shape.rs"]
mod tests;
