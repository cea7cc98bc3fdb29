// StitchSampler: walk a `step x step` grid over an RGBA buffer and keep the dark cells.
// Visual: each kept cell later becomes one X mark in the color found at its corner.

use crate::types::{Raster, Rgb, Stitch};

/// Grid origins visited for a `width x height` raster, row-major (y outer, x inner).
/// A zero step is treated as 1.
pub fn grid_cells(width: u32, height: u32, step: u32) -> impl Iterator<Item = (u32, u32)> {
    let step = step.max(1) as usize;
    (0..height)
        .step_by(step)
        .flat_map(move |y| (0..width).step_by(step).map(move |x| (x, y)))
}

/// Lazy sampler over a raw RGBA buffer. Yields qualifying cells in scan order.
pub struct Cells<'a> {
    pixels: &'a [u8],
    width: u32,
    threshold: f32,
    grid: Box<dyn Iterator<Item = (u32, u32)> + 'a>,
}

impl<'a> Cells<'a> {
    /// A buffer shorter than `4*width*height` has not been populated yet;
    /// it yields nothing rather than failing.
    pub fn new(pixels: &'a [u8], width: u32, height: u32, step: u32, threshold: u32) -> Self {
        let expected = 4 * width as usize * height as usize;
        let grid: Box<dyn Iterator<Item = (u32, u32)> + 'a> = if pixels.len() < expected {
            Box::new(std::iter::empty::<(u32, u32)>())
        } else {
            Box::new(grid_cells(width, height, step))
        };
        Self { pixels, width, threshold: threshold as f32, grid }
    }

    #[inline]
    fn color_at(&self, x: u32, y: u32) -> Rgb {
        let idx = 4 * (y as usize * self.width as usize + x as usize);
        Rgb::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }
}

impl Iterator for Cells<'_> {
    type Item = Stitch;

    fn next(&mut self) -> Option<Stitch> {
        loop {
            let (x, y) = self.grid.next()?;
            // Only the top-left pixel of the cell is read; no area average.
            let color = self.color_at(x, y);
            if color.brightness() < self.threshold {
                return Some(Stitch { x, y, color });
            }
        }
    }
}

/// Qualifying cells of a raster, lazily.
pub fn cells(raster: &Raster, step: u32, threshold: u32) -> Cells<'_> {
    Cells::new(raster.as_raw(), raster.width(), raster.height(), step, threshold)
}

/// Sample a raw RGBA buffer into a scan-ordered stitch list.
pub fn sample_rgba(pixels: &[u8], width: u32, height: u32, step: u32, threshold: u32) -> Vec<Stitch> {
    Cells::new(pixels, width, height, step, threshold).collect()
}

/// Sample a raster into a scan-ordered stitch list.
pub fn sample(raster: &Raster, step: u32, threshold: u32) -> Vec<Stitch> {
    cells(raster, step, threshold).collect()
}
