// Core types shared by the sampler, the renderer and both orchestrators.

use image::RgbaImage;

/// Source raster for sampling: RGBA8, addressable as `4*(y*width+x) + {r,g,b,a}`.
/// Stills and camera frames both arrive in this form; the core never writes to it.
pub type Raster = RgbaImage;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the canvas is on screen (pixels)
    pub height: usize,     // how tall the canvas is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A black canvas of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Fill every pixel with one color (the per-frame `background(0)`).
    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Read one pixel back; `None` outside the canvas.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// 8-bit RGB color captured from the source raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0x00RRGGBB, the framebuffer layout.
    #[inline]
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unweighted mean of the three channels, 0.0..=255.0.
    #[inline]
    pub fn brightness(self) -> f32 {
        (self.r as f32 + self.g as f32 + self.b as f32) / 3.0
    }
}

/// One qualifying grid cell: its top-left corner in source pixels and the color there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stitch {
    pub x: u32,
    pub y: u32,
    pub color: Rgb,
}
