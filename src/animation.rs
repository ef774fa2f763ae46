//! Staggered tile timing and the per-pixel tile hit test.

pub(crate) mod shape;
pub(crate) mod tiles;
