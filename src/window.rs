// Window + keyboard controls.
// The keys stand in for the sliders and buttons of a settings panel:
//   Up/Down      stitch size          Right/Left  brightness threshold
//   = / -        reveal speed         Space       pause/resume the camera
//   R            restart the reveal   N           next image
//   V            switch to the camera Esc         quit

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use stitch_cam::{Error, FrameBuffer};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    StepUp,
    StepDown,
    ThresholdUp,
    ThresholdDown,
    SpeedUp,
    SpeedDown,
    TogglePause,
    Restart,
    NextImage,
    UseCamera,
}

/// Keys that repeat while held, and keys that fire once per press.
const HELD: [(Key, Action); 6] = [
    (Key::Up, Action::StepUp),
    (Key::Down, Action::StepDown),
    (Key::Right, Action::ThresholdUp),
    (Key::Left, Action::ThresholdDown),
    (Key::Equal, Action::SpeedUp),
    (Key::Minus, Action::SpeedDown),
];
const ONCE: [(Key, Action); 4] = [
    (Key::Space, Action::TogglePause),
    (Key::R, Action::Restart),
    (Key::N, Action::NextImage),
    (Key::V, Action::UseCamera),
];

impl Drawer {
    /// Create a window the size of the canvas, capped near 60 FPS.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Everything the user asked for since the last present.
    pub fn actions(&self) -> Vec<Action> {
        let held = HELD
            .iter()
            .filter(|(k, _)| self.window.is_key_pressed(*k, KeyRepeat::Yes));
        let once = ONCE
            .iter()
            .filter(|(k, _)| self.window.is_key_pressed(*k, KeyRepeat::No));
        held.chain(once).map(|&(_, a)| a).collect()
    }
}
