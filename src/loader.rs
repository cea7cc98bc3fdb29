// Decodes stills off the render thread; the render loop polls once per frame, so a
// finished load only becomes visible at the next frame boundary.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use image::imageops::{self, FilterType};
use image::DynamicImage;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Raster;

/// Resize to `height` keeping the aspect ratio (width floored, at least 1).
pub fn fit_to_height(img: &DynamicImage, height: u32) -> Raster {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    if height == 0 || h == 0 || h == height {
        return rgba;
    }
    let width = (w as u64 * height as u64 / h as u64).max(1) as u32;
    imageops::resize(&rgba, width, height, FilterType::Triangle)
}

/// Decode `path` and fit it to the canvas height.
pub fn load_fitted(path: &Path, height: u32) -> Result<Raster> {
    let img = image::open(path)
        .map_err(|e| Error::image_load(format!("{}: {e}", path.display())))?;
    Ok(fit_to_height(&img, height))
}

pub type Loaded = (PathBuf, Result<Raster>);

/// One in-flight decode at a time; a new request supersedes the old one.
#[derive(Default)]
pub struct ImageLoader {
    pending: Option<Receiver<Loaded>>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start decoding `path` on a worker thread.
    pub fn request(&mut self, path: PathBuf, fit_height: u32) {
        let (tx, rx) = mpsc::channel();
        debug!(path = %path.display(), "image load requested");
        thread::spawn(move || {
            let result = load_fitted(&path, fit_height);
            // The receiver is gone when a newer request replaced this one.
            let _ = tx.send((path, result));
        });
        self.pending = Some(rx);
    }

    /// Non-blocking check for a finished load.
    pub fn poll(&mut self) -> Option<Loaded> {
        let rx = self.pending.as_ref()?;
        match rx.try_recv() {
            Ok(loaded) => {
                self.pending = None;
                Some(loaded)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                None
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
