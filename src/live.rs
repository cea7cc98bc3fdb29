// Video path: sample and draw fused, every frame, with no list kept between frames.
// Visual: the live picture is re-stitched in scan order, scaled to the canvas height.

use tracing::debug;

use crate::error::Result;
use crate::params::Params;
use crate::render::{Canvas, StitchRenderer, Transform};
use crate::sampler;
use crate::types::Raster;

/// What the live path stitches this frame, and whether new frames are pulled.
#[derive(Default)]
pub struct LiveSource {
    paused: bool,
    last: Option<Raster>,
}

impl LiveSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// True when this frame should pull from the camera.
    pub fn wants_frame(&self) -> bool {
        !self.paused
    }

    /// Take this frame's fetch result and return the frame to stitch.
    /// While paused the held frame stays and `fetched` is ignored; a failed or
    /// missing fetch leaves nothing to draw this frame.
    pub fn next(&mut self, fetched: Option<Result<Raster>>) -> Option<&Raster> {
        if !self.paused {
            self.last = match fetched {
                Some(Ok(frame)) => Some(frame),
                Some(Err(e)) => {
                    debug!("skipping frame: {e}");
                    None
                }
                None => None,
            };
        }
        self.last.as_ref()
    }

    pub fn current(&self) -> Option<&Raster> {
        self.last.as_ref()
    }

    /// Forget the held frame and resume pulling.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Stitch one decoded frame onto the canvas. `None` (no frame decoded yet) and
/// empty frames draw nothing. Returns marks drawn.
pub fn stitch_frame<C: Canvas>(
    frame: Option<&Raster>,
    canvas: &mut C,
    params: &Params,
    canvas_size: (u32, u32),
) -> usize {
    let Some(frame) = frame else {
        return 0;
    };
    if frame.width() == 0 || frame.height() == 0 {
        return 0;
    }
    let (cw, ch) = canvas_size;
    let transform = Transform::fit_height(cw, ch, frame.width(), frame.height());
    let renderer = StitchRenderer::new(params.step, transform);
    renderer.draw_all(canvas, sampler::cells(frame, params.step, params.threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;
    use image::Rgba;

    #[derive(Default)]
    struct Lines(Vec<(f32, f32, f32, f32)>);

    impl Canvas for Lines {
        fn stroke(&mut self, _: Rgb, _: f32) {}
        fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
            self.0.push((x1, y1, x2, y2));
        }
    }

    fn black(w: u32, h: u32) -> Raster {
        Raster::from_pixel(w, h, Rgba([0, 0, 0, 255]))
    }

    #[test]
    fn paused_source_keeps_the_last_frame() {
        let mut src = LiveSource::new();
        assert_eq!(src.next(Some(Ok(black(4, 2)))).map(|f| f.dimensions()), Some((4, 2)));
        assert!(src.toggle_pause());
        assert!(!src.wants_frame());
        // Whatever arrives while paused is ignored.
        let held = src.next(Some(Ok(black(8, 8)))).map(|f| f.dimensions());
        assert_eq!(held, Some((4, 2)));
        assert_eq!(src.next(None).map(|f| f.dimensions()), Some((4, 2)));
    }

    #[test]
    fn failed_fetch_skips_the_frame() {
        let mut src = LiveSource::new();
        src.next(Some(Ok(black(4, 2))));
        let err = crate::Error::CameraFrame("timeout".into());
        assert!(src.next(Some(Err(err))).is_none());
        assert!(src.next(Some(Ok(black(2, 2)))).is_some());
    }

    #[test]
    fn unpause_resumes_pulling() {
        let mut src = LiveSource::new();
        src.next(Some(Ok(black(4, 2))));
        src.toggle_pause();
        assert!(!src.toggle_pause());
        assert!(src.wants_frame());
        assert_eq!(src.next(Some(Ok(black(6, 6)))).map(|f| f.dimensions()), Some((6, 6)));
    }

    #[test]
    fn reset_clears_pause_and_frame() {
        let mut src = LiveSource::new();
        src.next(Some(Ok(black(4, 2))));
        src.toggle_pause();
        src.reset();
        assert!(!src.is_paused());
        assert!(src.current().is_none());
    }

    #[test]
    fn missing_frame_draws_nothing() {
        let mut c = Lines::default();
        assert_eq!(stitch_frame(None, &mut c, &Params::default(), (600, 600)), 0);
        let empty = Raster::new(0, 0);
        assert_eq!(stitch_frame(Some(&empty), &mut c, &Params::default(), (600, 600)), 0);
        assert!(c.0.is_empty());
    }

    #[test]
    fn draws_in_scan_order_scaled_to_height() {
        // 16x8 black frame on a 64x64 canvas.
        let frame = Raster::from_pixel(16, 8, Rgba([0, 0, 0, 255]));
        let params = Params { step: 8, ..Params::default() };
        let mut c = Lines::default();
        assert_eq!(stitch_frame(Some(&frame), &mut c, &params, (64, 64)), 2);
        // scale = 64 / 8 = 8, dx = (64 - 16 * 8) / 2 = -32
        assert_eq!(c.0[0], (-32.0, 0.0, 32.0, 64.0));
        assert_eq!(c.0[2], (32.0, 0.0, 96.0, 64.0));
    }
}
