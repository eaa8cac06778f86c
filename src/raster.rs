// The raster buffer strokes land in.
// Visual expectation: whatever is in `pixels` is what the window shows (scaled by zoom)
// and what ends up in drawing.png.

use crate::types::{Color, Extent};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    pub width: usize,     // columns
    pub height: usize,    // rows
    pub pixels: Vec<u32>, // each entry is 0xAARRGGBB; minifb ignores the top byte
}

impl RasterBuffer {
    /// Zero-area buffer: the surface is not ready to draw yet.
    pub fn empty() -> Self {
        Self { width: 0, height: 0, pixels: Vec::new() }
    }

    /// A fresh buffer completely covered with `fill`.
    pub fn filled(width: usize, height: usize, fill: Color) -> Self {
        Self { width, height, pixels: vec![fill.to_argb(); width * height] }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.width as i64, self.height as i64)
    }

    /// Paint every pixel with one color.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color::from_argb(self.pixels[y * self.width + x]))
    }

    /// Put a pixel if (x,y) is inside bounds; silently ignore it otherwise.
    #[inline]
    pub fn put_pixel(&mut self, x: i64, y: i64, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    /// Copy `src` onto self with its top-left at (0,0), clipped to both bounds.
    pub fn copy_from_origin(&mut self, src: &RasterBuffer) {
        let cols = self.width.min(src.width);
        let rows = self.height.min(src.height);
        for y in 0..rows {
            let dst_row = y * self.width;
            let src_row = y * src.width;
            self.pixels[dst_row..dst_row + cols].copy_from_slice(&src.pixels[src_row..src_row + cols]);
        }
    }

    /// Build the replacement buffer for a resize: background everywhere, then the old
    /// content restored at the same coordinates. `self` is left untouched.
    pub fn resized(&self, width: usize, height: usize, background: Color) -> RasterBuffer {
        let mut next = RasterBuffer::filled(width, height, background);
        next.copy_from_origin(self);
        next
    }
}
