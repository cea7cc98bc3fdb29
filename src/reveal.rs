// Image path: sample once per load, shuffle, then draw a growing prefix every frame.
// Visual: stitches pop in at random positions until the whole picture is stitched.

use tracing::info;

use crate::params::Params;
use crate::render::{Canvas, StitchRenderer, Transform};
use crate::rng::{shuffle, Rng32};
use crate::sampler;
use crate::types::{Raster, Stitch};

/// Everything that exists while an image is being revealed.
pub struct Revealing {
    raster: Raster,
    stitches: Vec<Stitch>,
    /// Grid step at load time; marks keep this size until the next load.
    grid_step: u32,
    reveal: f64,
}

pub enum RevealState {
    /// No sample list yet.
    Building,
    Revealing(Revealing),
}

pub struct ImageReveal {
    state: RevealState,
    rng: Rng32,
}

impl ImageReveal {
    pub fn new(seed: u32) -> Self {
        Self { state: RevealState::Building, rng: Rng32::from_seed(seed) }
    }

    /// Load event: rebuild the list from `raster` with the current step and
    /// threshold, shuffle it and restart the reveal at 0. Replaces any previous image.
    pub fn load(&mut self, raster: Raster, params: &Params) {
        self.state = RevealState::Building;
        let mut stitches = sampler::sample(&raster, params.step, params.threshold);
        shuffle(&mut stitches, &mut self.rng);
        info!(
            width = raster.width(),
            height = raster.height(),
            step = params.step,
            threshold = params.threshold,
            stitches = stitches.len(),
            "image sampled"
        );
        self.state = RevealState::Revealing(Revealing {
            raster,
            stitches,
            grid_step: params.step,
            reveal: 0.0,
        });
    }

    /// Re-run the load event on the current image with fresh parameters.
    /// Returns false when no image is loaded.
    pub fn restart(&mut self, params: &Params) -> bool {
        match std::mem::replace(&mut self.state, RevealState::Building) {
            RevealState::Revealing(r) => {
                self.load(r.raster, params);
                true
            }
            RevealState::Building => false,
        }
    }

    /// Drop the current image (switching to the live source).
    pub fn clear(&mut self) {
        self.state = RevealState::Building;
    }

    /// One render frame: draw the visible prefix centered on the canvas, then
    /// advance the reveal by the current speed. Returns marks drawn.
    pub fn frame<C: Canvas>(&mut self, canvas: &mut C, params: &Params, canvas_size: (u32, u32)) -> usize {
        let RevealState::Revealing(r) = &mut self.state else {
            return 0;
        };
        let (cw, ch) = canvas_size;
        let transform = Transform::centered(cw, ch, r.raster.width(), r.raster.height());
        let drawn = StitchRenderer::new(r.grid_step, transform).draw_prefix(canvas, &r.stitches, r.reveal);
        r.reveal = advance(r.reveal, params.reveal_speed());
        drawn
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, RevealState::Revealing(_))
    }

    /// Current reveal fraction; 0 when nothing is loaded.
    pub fn reveal(&self) -> f64 {
        match &self.state {
            RevealState::Revealing(r) => r.reveal,
            RevealState::Building => 0.0,
        }
    }

    /// The shuffled list, in draw order.
    pub fn stitches(&self) -> &[Stitch] {
        match &self.state {
            RevealState::Revealing(r) => &r.stitches,
            RevealState::Building => &[],
        }
    }

    pub fn grid_step(&self) -> Option<u32> {
        match &self.state {
            RevealState::Revealing(r) => Some(r.grid_step),
            RevealState::Building => None,
        }
    }
}

/// `reveal + speed`, held inside [0,1] whatever the speed.
pub fn advance(reveal: f64, speed: f64) -> f64 {
    let next = reveal + speed;
    if next.is_nan() { reveal } else { next.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_clamps_both_ways() {
        assert_eq!(advance(0.99, 0.5), 1.0);
        assert_eq!(advance(0.01, -0.5), 0.0);
        assert_eq!(advance(1.0, 0.01), 1.0);
        assert_eq!(advance(0.3, f64::NAN), 0.3);
        assert_eq!(advance(0.3, f64::INFINITY), 1.0);
    }

    #[test]
    fn unloaded_frame_is_a_no_op() {
        struct Panics;
        impl Canvas for Panics {
            fn stroke(&mut self, _: crate::types::Rgb, _: f32) { panic!("stroke") }
            fn line(&mut self, _: f32, _: f32, _: f32, _: f32) { panic!("line") }
        }
        let mut r = ImageReveal::new(1);
        assert_eq!(r.frame(&mut Panics, &Params::default(), (600, 600)), 0);
        assert!(!r.restart(&Params::default()));
        assert_eq!(r.reveal(), 0.0);
    }
}
