use crate::color::ColorSample;
use crate::foundation::core::Canvas;

/// A rendered frame: `width * height` straight-alpha samples, row-major.
///
/// Allocated fresh for every frame and moved into the sink once filled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    canvas: Canvas,
    pixels: Vec<ColorSample>,
}

impl FrameBuffer {
    /// A buffer with every pixel set to `color`.
    pub fn filled(canvas: Canvas, color: ColorSample) -> Self {
        Self {
            canvas,
            pixels: vec![color; canvas.area()],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Pixel at `(x, y)`; `None` outside the frame.
    pub fn get(&self, x: u32, y: u32) -> Option<ColorSample> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[ColorSample] {
        &self.pixels
    }

    /// Mutable rows, top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [ColorSample]> {
        self.pixels.chunks_exact_mut(self.canvas.width as usize)
    }

    /// Tightly packed RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.canvas.width && y < self.canvas.height)
            .then(|| y as usize * self.canvas.width as usize + x as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
