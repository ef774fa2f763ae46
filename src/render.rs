//! Frame buffers, the tile compositor and the parallel frame scheduler.

/// Renderer trait and the tile transition.
pub mod compositor;
/// Owned RGBA frame buffers.
pub mod frame;
/// Diagonal color ramps.
pub mod gradient;
/// Batched multi-worker rendering.
pub mod scheduler;
