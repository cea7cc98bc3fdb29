// Which source is active and what one render frame does with it.
// Exactly one of the image reveal or the live camera drives the canvas at a time.

use crate::error::Result;
use crate::live::{self, LiveSource};
use crate::params::Params;
use crate::render::Canvas;
use crate::reveal::ImageReveal;
use crate::types::Raster;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Image,
    Live,
}

pub struct Session {
    mode: Mode,
    reveal: ImageReveal,
    live: LiveSource,
}

impl Session {
    pub fn new(mode: Mode, seed: u32) -> Self {
        Self { mode, reveal: ImageReveal::new(seed), live: LiveSource::new() }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn reveal(&self) -> &ImageReveal {
        &self.reveal
    }

    pub fn live(&self) -> &LiveSource {
        &self.live
    }

    /// A decoded image replaces whatever was showing. Call at a frame boundary.
    pub fn image_loaded(&mut self, raster: Raster, params: &Params) {
        self.reveal.load(raster, params);
        self.live.reset();
        self.mode = Mode::Image;
    }

    /// Switch to the camera, dropping the image and starting unpaused.
    pub fn use_live(&mut self) {
        self.reveal.clear();
        self.live.reset();
        self.mode = Mode::Live;
    }

    /// Re-sample the current image. Only meaningful in image mode.
    pub fn restart(&mut self, params: &Params) -> bool {
        self.mode == Mode::Image && self.reveal.restart(params)
    }

    /// Pause or resume the camera. `None` when no camera is active.
    pub fn toggle_pause(&mut self) -> Option<bool> {
        match self.mode {
            Mode::Live => Some(self.live.toggle_pause()),
            Mode::Image => None,
        }
    }

    /// Render one frame. `fetch` pulls a camera frame and is only called in live
    /// mode while unpaused. Returns marks drawn.
    pub fn frame<C, F>(&mut self, canvas: &mut C, params: &Params, canvas_size: (u32, u32), fetch: F) -> usize
    where
        C: Canvas,
        F: FnOnce() -> Option<Result<Raster>>,
    {
        match self.mode {
            Mode::Image => self.reveal.frame(canvas, params, canvas_size),
            Mode::Live => {
                let fetched = if self.live.wants_frame() { fetch() } else { None };
                let frame = self.live.next(fetched);
                live::stitch_frame(frame, canvas, params, canvas_size)
            }
        }
    }

    /// Short HUD label for the active source.
    pub fn status(&self) -> String {
        match self.mode {
            Mode::Image if !self.reveal.is_loaded() => "LOADING".to_string(),
            Mode::Image => format!("IMAGE {:>3}%", (self.reveal.reveal() * 100.0).round() as u32),
            Mode::Live if self.live.is_paused() => "LIVE PAUSED".to_string(),
            Mode::Live => "LIVE".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::Rgb;
    use image::Rgba;

    struct Count;

    impl Canvas for Count {
        fn stroke(&mut self, _: Rgb, _: f32) {}
        fn line(&mut self, _: f32, _: f32, _: f32, _: f32) {}
    }

    fn black(w: u32, h: u32) -> Raster {
        Raster::from_pixel(w, h, Rgba([0, 0, 0, 255]))
    }

    fn no_fetch() -> Option<Result<Raster>> {
        panic!("camera pulled when it should not be")
    }

    const CANVAS: (u32, u32) = (64, 64);

    #[test]
    fn pause_restitches_the_held_frame() {
        let p = Params::default();
        let mut s = Session::new(Mode::Live, 1);
        assert_eq!(s.frame(&mut Count, &p, CANVAS, || Some(Ok(black(16, 16)))), 4);
        assert_eq!(s.toggle_pause(), Some(true));
        assert_eq!(s.frame(&mut Count, &p, CANVAS, no_fetch), 4);
        assert_eq!(s.frame(&mut Count, &p, CANVAS, no_fetch), 4);
        assert_eq!(s.status(), "LIVE PAUSED");
    }

    #[test]
    fn failed_camera_frame_draws_nothing_then_recovers() {
        let p = Params::default();
        let mut s = Session::new(Mode::Live, 1);
        s.frame(&mut Count, &p, CANVAS, || Some(Ok(black(16, 16))));
        let failed = s.frame(&mut Count, &p, CANVAS, || Some(Err(Error::CameraFrame("busy".into()))));
        assert_eq!(failed, 0);
        assert_eq!(s.frame(&mut Count, &p, CANVAS, || Some(Ok(black(16, 16)))), 4);
    }

    #[test]
    fn unpause_pulls_again() {
        let p = Params::default();
        let mut s = Session::new(Mode::Live, 1);
        s.frame(&mut Count, &p, CANVAS, || Some(Ok(black(16, 16))));
        s.toggle_pause();
        assert_eq!(s.toggle_pause(), Some(false));
        assert_eq!(s.frame(&mut Count, &p, CANVAS, || Some(Ok(black(32, 16)))), 8);
    }

    #[test]
    fn pause_is_ignored_without_a_camera() {
        let p = Params::default();
        let mut s = Session::new(Mode::Image, 1);
        assert_eq!(s.toggle_pause(), None);
        s.use_live();
        assert!(!s.live().is_paused());
        assert_eq!(s.frame(&mut Count, &p, CANVAS, || Some(Ok(black(16, 16)))), 4);
    }

    #[test]
    fn load_switches_to_image_and_drops_the_live_frame() {
        let p = Params { speed: 100, ..Params::default() };
        let mut s = Session::new(Mode::Live, 1);
        s.frame(&mut Count, &p, CANVAS, || Some(Ok(black(16, 16))));
        s.toggle_pause();

        s.image_loaded(black(16, 16), &p);
        assert_eq!(s.mode(), Mode::Image);
        assert!(s.live().current().is_none());
        assert!(!s.live().is_paused());
        // The first image frame draws the empty prefix and never touches the camera.
        assert_eq!(s.frame(&mut Count, &p, CANVAS, no_fetch), 0);
        for _ in 0..12 {
            s.frame(&mut Count, &p, CANVAS, no_fetch);
        }
        assert_eq!(s.frame(&mut Count, &p, CANVAS, no_fetch), 4);
        assert_eq!(s.status(), "IMAGE 100%");
    }

    #[test]
    fn restart_needs_a_loaded_image() {
        let p = Params::default();
        let mut s = Session::new(Mode::Image, 1);
        assert_eq!(s.status(), "LOADING");
        assert!(!s.restart(&p));
        s.image_loaded(black(16, 16), &p);
        assert!(s.restart(&p));
        s.use_live();
        assert!(!s.restart(&p));
        assert_eq!(s.reveal().stitches().len(), 0);
    }
}
