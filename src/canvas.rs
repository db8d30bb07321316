//! Logical pixel buffer and rasterization
//!
//! A [`Canvas`] is the small square grid a creature is drawn into before it is
//! upscaled. Each cell is either a color or empty. Writes outside the grid are
//! silently dropped and reads outside it return empty, so drawing routines can
//! paint shapes that spill past the edges without bounds checks of their own.

use image::{Rgba, RgbaImage};

/// Working resolution of every creature.
pub const RESOLUTION: u32 = 32;

/// Largest upscale factor [`Canvas::rasterize`] will apply.
pub const MAX_SCALE: u32 = 32;

/// Transparent color used for empty cells
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Square grid of optional colors, owned by one synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    resolution: u32,
    cells: Vec<Option<Rgba<u8>>>,
}

impl Canvas {
    /// Create an empty canvas of `resolution × resolution` cells.
    pub fn new(resolution: u32) -> Self {
        Self { resolution, cells: vec![None; (resolution * resolution) as usize] }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let r = self.resolution as i32;
        if x >= 0 && x < r && y >= 0 && y < r {
            Some((y * r + x) as usize)
        } else {
            None
        }
    }

    /// Write a cell. Out-of-range coordinates are a no-op.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Some(color);
        }
    }

    /// Read a cell; `None` for empty cells and for out-of-range coordinates.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        self.index(x, y).and_then(|i| self.cells[i])
    }

    /// Write a cell at fractional coordinates, flooring both axes.
    ///
    /// Shape membership is tested on the unrounded coordinates; only the write
    /// is aligned to the grid.
    pub fn plot(&mut self, x: f64, y: f64, color: Rgba<u8>) {
        self.set_pixel(x.floor() as i32, y.floor() as i32, color);
    }

    /// Number of non-empty cells.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether a cell has an empty 4-neighbor (or sits on the canvas edge).
    pub fn touches_empty(&self, x: i32, y: i32) -> bool {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .iter()
            .any(|(dx, dy)| self.get_pixel(x + dx, y + dy).is_none())
    }

    /// Rasterize into an image at an integer upscale.
    ///
    /// The scale is [`scale_for`]`(target_px, resolution)`, capped at
    /// [`MAX_SCALE`]; every cell becomes
    /// a solid `scale × scale` block and empty cells stay fully transparent.
    /// The result is always square and depends only on the cell contents.
    pub fn rasterize(&self, target_px: u32) -> RgbaImage {
        let scale = scale_for(target_px, self.resolution).min(MAX_SCALE);
        let side = self.resolution * scale;
        let mut image = RgbaImage::from_pixel(side, side, TRANSPARENT);

        for cy in 0..self.resolution {
            for cx in 0..self.resolution {
                let Some(color) = self.cells[(cy * self.resolution + cx) as usize] else {
                    continue;
                };
                for py in cy * scale..(cy + 1) * scale {
                    for px in cx * scale..(cx + 1) * scale {
                        image.put_pixel(px, py, color);
                    }
                }
            }
        }

        image
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(RESOLUTION)
    }
}

/// Integer upscale factor: `max(1, ceil(target_px / resolution))`.
///
/// ```
/// use pixmon::canvas::scale_for;
///
/// assert_eq!(scale_for(32, 32), 1);
/// assert_eq!(scale_for(64, 32), 2);
/// assert_eq!(scale_for(100, 32), 4);
/// assert_eq!(scale_for(0, 32), 1);
/// ```
pub fn scale_for(target_px: u32, resolution: u32) -> u32 {
    target_px.div_ceil(resolution.max(1)).max(1)
}
