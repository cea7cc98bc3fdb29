//! Stitch field effect: renders a still image or a live camera feed as X-shaped
//! "stitch" marks, one per dark grid cell.
//!
//! The image path samples once per load and reveals the shuffled stitches a few at a
//! time ([`reveal::ImageReveal`]); the video path re-samples every frame
//! ([`live::stitch_frame`]). Both draw through the [`render::Canvas`] trait.

pub mod draw;
pub mod error;
pub mod export;
pub mod live;
pub mod loader;
pub mod params;
pub mod render;
pub mod reveal;
pub mod rng;
pub mod sampler;
pub mod session;
pub mod types;

pub use error::{Error, Result};
pub use params::Params;
pub use render::{Canvas, FrameCanvas, StitchRenderer, Transform};
pub use reveal::ImageReveal;
pub use types::{FrameBuffer, Raster, Rgb, Stitch};
