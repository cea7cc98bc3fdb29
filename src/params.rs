// Control parameters: the three "sliders" read fresh every frame.

use std::ops::RangeInclusive;

/// Grid step slider range, in source pixels.
pub const STEP_RANGE: RangeInclusive<u32> = 4..=20;
/// Brightness threshold slider range.
pub const THRESHOLD_RANGE: RangeInclusive<u32> = 50..=255;
/// Reveal speed slider range; the per-frame increment is `slider / 1000`.
pub const SPEED_RANGE: RangeInclusive<u32> = 1..=100;

pub const DEFAULT_STEP: u32 = 8;
pub const DEFAULT_THRESHOLD: u32 = 230;
pub const DEFAULT_SPEED: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    /// Side length of a sampling cell and of a drawn mark.
    pub step: u32,
    /// A cell qualifies iff its brightness is strictly below this.
    pub threshold: u32,
    /// Reveal speed in slider units (thousandths of the list per frame).
    pub speed: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self { step: DEFAULT_STEP, threshold: DEFAULT_THRESHOLD, speed: DEFAULT_SPEED }
    }
}

impl Params {
    /// Clamp every field into its slider range.
    pub fn clamped(self) -> Self {
        Self {
            step: clamp_to(self.step, &STEP_RANGE),
            threshold: clamp_to(self.threshold, &THRESHOLD_RANGE),
            speed: clamp_to(self.speed, &SPEED_RANGE),
        }
    }

    /// Fraction of the image's stitch list revealed per frame.
    pub fn reveal_speed(&self) -> f64 {
        self.speed as f64 / 1000.0
    }

    pub fn nudge_step(&mut self, delta: i32) {
        self.step = nudge(self.step, delta, &STEP_RANGE);
    }

    pub fn nudge_threshold(&mut self, delta: i32) {
        self.threshold = nudge(self.threshold, delta, &THRESHOLD_RANGE);
    }

    pub fn nudge_speed(&mut self, delta: i32) {
        self.speed = nudge(self.speed, delta, &SPEED_RANGE);
    }
}

fn clamp_to(v: u32, range: &RangeInclusive<u32>) -> u32 {
    v.clamp(*range.start(), *range.end())
}

fn nudge(v: u32, delta: i32, range: &RangeInclusive<u32>) -> u32 {
    let moved = (v as i64 + delta as i64).max(0) as u32;
    clamp_to(moved, range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_slider_positions() {
        let p = Params::default();
        assert_eq!((p.step, p.threshold, p.speed), (8, 230, 10));
        assert!((p.reveal_speed() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn clamped_pulls_into_ranges() {
        let p = Params { step: 0, threshold: 999, speed: 0 }.clamped();
        assert_eq!((p.step, p.threshold, p.speed), (4, 255, 1));
    }

    #[test]
    fn nudges_stop_at_the_ends() {
        let mut p = Params::default();
        p.nudge_step(100);
        assert_eq!(p.step, 20);
        p.nudge_threshold(-1000);
        assert_eq!(p.threshold, 50);
        p.nudge_speed(-3);
        assert_eq!(p.speed, 7);
    }
}
