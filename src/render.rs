// StitchRenderer: turns samples into X marks on any surface that can draw lines.
// Visual: every stitch is two crossing diagonals inscribed in its `step x step` cell.

use std::borrow::Borrow;

use crate::draw::stroke_line;
use crate::types::{FrameBuffer, Rgb, Stitch};

/// Stroke width of a stitch arm, in source pixels (scaled with the transform).
pub const STROKE_WEIGHT: f32 = 1.6;

/// Output surface: settable stroke, line primitive, no readback.
pub trait Canvas {
    fn stroke(&mut self, color: Rgb, weight: f32);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
}

/// Uniform scale then translate, mapping source pixels onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self { scale: 1.0, dx: 0.0, dy: 0.0 };

    /// Center a `src_w x src_h` raster on the canvas at 1:1.
    pub fn centered(canvas_w: u32, canvas_h: u32, src_w: u32, src_h: u32) -> Self {
        Self {
            scale: 1.0,
            dx: (canvas_w as f32 - src_w as f32) / 2.0,
            dy: (canvas_h as f32 - src_h as f32) / 2.0,
        }
    }

    /// Scale so the source fills the canvas height, centered horizontally.
    /// A zero-height source maps at scale 1.
    pub fn fit_height(canvas_w: u32, canvas_h: u32, src_w: u32, src_h: u32) -> Self {
        let scale = if src_h == 0 { 1.0 } else { canvas_h as f32 / src_h as f32 };
        Self {
            scale,
            dx: (canvas_w as f32 - src_w as f32 * scale) / 2.0,
            dy: 0.0,
        }
    }

    #[inline]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.dx, y * self.scale + self.dy)
    }
}

/// Software canvas over the window's framebuffer.
pub struct FrameCanvas<'a> {
    fb: &'a mut FrameBuffer,
    color: u32,
    weight: f32,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(fb: &'a mut FrameBuffer) -> Self {
        Self { fb, color: 0x00FF_FFFF, weight: 1.0 }
    }
}

impl Canvas for FrameCanvas<'_> {
    fn stroke(&mut self, color: Rgb, weight: f32) {
        self.color = color.to_u32();
        self.weight = weight;
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        stroke_line(self.fb, x1, y1, x2, y2, self.weight, self.color);
    }
}

/// Number of list entries visible at `fraction`: `floor(fraction * len)`,
/// with `fraction` clamped to [0,1].
pub fn prefix_len(len: usize, fraction: f64) -> usize {
    let f = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    ((f * len as f64).floor() as usize).min(len)
}

#[derive(Clone, Copy, Debug)]
pub struct StitchRenderer {
    /// Mark size in source pixels.
    pub step: u32,
    pub transform: Transform,
}

impl StitchRenderer {
    pub fn new(step: u32, transform: Transform) -> Self {
        Self { step, transform }
    }

    /// Draw one X in the stitch's color.
    pub fn draw_stitch<C: Canvas>(&self, canvas: &mut C, s: &Stitch) {
        let (x0, y0) = (s.x as f32, s.y as f32);
        let (x1, y1) = (x0 + self.step as f32, y0 + self.step as f32);
        let t = &self.transform;

        canvas.stroke(s.color, STROKE_WEIGHT * t.scale);
        let (ax, ay) = t.apply(x0, y0);
        let (bx, by) = t.apply(x1, y1);
        canvas.line(ax, ay, bx, by);
        let (cx, cy) = t.apply(x1, y0);
        let (dx, dy) = t.apply(x0, y1);
        canvas.line(cx, cy, dx, dy);
    }

    /// Draw every sample in iteration order; returns how many marks were drawn.
    pub fn draw_all<C, I>(&self, canvas: &mut C, samples: I) -> usize
    where
        C: Canvas,
        I: IntoIterator,
        I::Item: Borrow<Stitch>,
    {
        let mut drawn = 0;
        for s in samples {
            self.draw_stitch(canvas, s.borrow());
            drawn += 1;
        }
        drawn
    }

    /// Draw the first `floor(fraction * len)` samples.
    pub fn draw_prefix<C: Canvas>(&self, canvas: &mut C, samples: &[Stitch], fraction: f64) -> usize {
        let count = prefix_len(samples.len(), fraction);
        self.draw_all(canvas, &samples[..count])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        strokes: Vec<(Rgb, f32)>,
        lines: Vec<(f32, f32, f32, f32)>,
    }

    impl Canvas for Recorder {
        fn stroke(&mut self, color: Rgb, weight: f32) {
            self.strokes.push((color, weight));
        }
        fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
            self.lines.push((x1, y1, x2, y2));
        }
    }

    fn stitches(n: u32) -> Vec<Stitch> {
        (0..n).map(|i| Stitch { x: i * 8, y: 0, color: Rgb::new(1, 2, 3) }).collect()
    }

    #[test]
    fn stitch_is_two_diagonals_in_its_cell() {
        let mut rec = Recorder::default();
        let r = StitchRenderer::new(8, Transform::IDENTITY);
        r.draw_stitch(&mut rec, &Stitch { x: 16, y: 24, color: Rgb::new(9, 9, 9) });
        assert_eq!(rec.lines, vec![(16.0, 24.0, 24.0, 32.0), (24.0, 24.0, 16.0, 32.0)]);
        assert_eq!(rec.strokes, vec![(Rgb::new(9, 9, 9), STROKE_WEIGHT)]);
    }

    #[test]
    fn transform_scales_coordinates_and_weight() {
        let mut rec = Recorder::default();
        let t = Transform { scale: 2.0, dx: 10.0, dy: 0.0 };
        StitchRenderer::new(4, t).draw_stitch(&mut rec, &Stitch { x: 0, y: 0, color: Rgb::new(0, 0, 0) });
        assert_eq!(rec.lines[0], (10.0, 0.0, 18.0, 8.0));
        assert_eq!(rec.strokes[0].1, STROKE_WEIGHT * 2.0);
    }

    #[test]
    fn prefix_bounds() {
        let s = stitches(10);
        let r = StitchRenderer::new(8, Transform::IDENTITY);
        let mut rec = Recorder::default();
        assert_eq!(r.draw_prefix(&mut rec, &s, 0.0), 0);
        assert!(rec.lines.is_empty());
        assert_eq!(r.draw_prefix(&mut rec, &s, 1.0), 10);
        assert_eq!(rec.lines.len(), 20);
    }

    #[test]
    fn prefix_is_monotonic_in_fraction() {
        let mut last = 0;
        for i in 0..=200 {
            let n = prefix_len(37, i as f64 / 200.0);
            assert!(n >= last);
            last = n;
        }
        assert_eq!(last, 37);
    }

    #[test]
    fn prefix_floors_and_clamps() {
        assert_eq!(prefix_len(10, 0.19), 1);
        assert_eq!(prefix_len(10, -3.0), 0);
        assert_eq!(prefix_len(10, 7.0), 10);
        assert_eq!(prefix_len(10, f64::NAN), 0);
        assert_eq!(prefix_len(0, 1.0), 0);
    }

    #[test]
    fn fit_height_centers_horizontally() {
        let t = Transform::fit_height(600, 600, 640, 480);
        assert_eq!(t.scale, 1.25);
        assert_eq!(t.dx, (600.0 - 800.0) / 2.0);
        assert_eq!(t.dy, 0.0);
    }

    #[test]
    fn frame_canvas_paints_in_sample_color() {
        let mut fb = FrameBuffer::new(16, 16);
        let r = StitchRenderer::new(8, Transform::IDENTITY);
        r.draw_all(&mut FrameCanvas::new(&mut fb), [Stitch { x: 0, y: 0, color: Rgb::new(255, 0, 0) }]);
        assert_eq!(fb.get(4, 4), Some(0x00FF_0000));
        assert_eq!(fb.get(15, 0), Some(0));
    }
}
