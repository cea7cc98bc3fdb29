// Canvas -> PNG, for the headless `frame` command.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::types::FrameBuffer;

/// Unpack 0x00RRGGBB pixels into an RGB image.
pub fn to_rgb_image(fb: &FrameBuffer) -> RgbImage {
    RgbImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let p = fb.pixels[y as usize * fb.width + x as usize];
        Rgb([(p >> 16) as u8, (p >> 8) as u8, p as u8])
    })
}

pub fn save_png(fb: &FrameBuffer, path: &Path) -> Result<()> {
    to_rgb_image(fb)
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| Error::export(format!("{}: {e}", path.display())))
}
