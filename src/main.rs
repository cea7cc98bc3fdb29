// What you SEE:
// • `run --image a.png --image b.jpg`: the first image stitches itself in, mark by mark.
//   N loads the next one, R restarts the reveal with the current settings.
// • `run` with no images (or V at any time): the live camera, re-stitched every frame.
// • `frame --image a.png --frames 60 --out out.png`: the same reveal, offscreen, saved as PNG.

mod camera;
mod window;

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{info, warn, Level};

use camera::CameraCapture;
use stitch_cam::draw::draw_text_5x7;
use stitch_cam::loader::{self, ImageLoader};
use stitch_cam::params::{DEFAULT_SPEED, DEFAULT_STEP, DEFAULT_THRESHOLD};
use stitch_cam::session::{Mode, Session};
use stitch_cam::{export, FrameBuffer, FrameCanvas, ImageReveal, Params};
use window::{Action, Drawer};

#[derive(Parser, Debug)]
#[command(name = "stitch-cam", version, about = "Stitch-field effect for stills and a live camera")]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a window and stitch images or the camera in real time.
    Run(RunArgs),
    /// Render an image reveal offscreen and write the last frame as PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct StitchArgs {
    /// Stitch size in pixels (4..=20).
    #[arg(long, default_value_t = DEFAULT_STEP)]
    step: u32,

    /// Cells darker than this qualify (50..=255).
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u32,

    /// Reveal speed in thousandths of the image per frame (1..=100).
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    speed: u32,

    /// Seed for the reveal order (random when omitted).
    #[arg(long)]
    seed: Option<u32>,

    /// Canvas size as WIDTHxHEIGHT.
    #[arg(long, default_value = "600x600", value_parser = parse_size)]
    canvas: (u32, u32),
}

impl StitchArgs {
    fn params(&self) -> Params {
        Params { step: self.step, threshold: self.threshold, speed: self.speed }.clamped()
    }

    fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    stitch: StitchArgs,

    /// Images to cycle through with N. Without any, the camera starts.
    #[arg(long)]
    image: Vec<PathBuf>,

    /// Camera index.
    #[arg(long, default_value_t = 0)]
    camera: u32,

    /// Requested camera width.
    #[arg(long, default_value_t = 640)]
    cam_width: u32,

    /// Requested camera height.
    #[arg(long, default_value_t = 480)]
    cam_height: u32,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    stitch: StitchArgs,

    /// Input image.
    #[arg(long)]
    image: PathBuf,

    /// Number of reveal frames to run before saving.
    #[arg(long, default_value_t = 100)]
    frames: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    if w == 0 || h == 0 {
        return Err("canvas must be at least 1x1".into());
    }
    Ok((w, h))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (cw, ch) = args.stitch.canvas;
    let params = args.stitch.params();

    let raster = loader::load_fitted(&args.image, ch)
        .with_context(|| format!("load '{}'", args.image.display()))?;

    let mut reveal = ImageReveal::new(args.stitch.seed());
    reveal.load(raster, &params);

    let mut screen = FrameBuffer::new(cw as usize, ch as usize);
    let mut drawn = 0;
    for _ in 0..args.frames {
        screen.clear(0);
        drawn = reveal.frame(&mut FrameCanvas::new(&mut screen), &params, (cw, ch));
    }

    export::save_png(&screen, &args.out)?;
    info!(
        out = %args.out.display(),
        frames = args.frames,
        drawn,
        total = reveal.stitches().len(),
        "frame written"
    );
    Ok(())
}

/* Per-frame order: inputs, then loads that finished since the last frame,
   then clear, stitch, HUD, present. */
fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let (cw, ch) = args.stitch.canvas;
    let mut params = args.stitch.params();

    let mut drawer = Drawer::new("Stitch Cam", cw as usize, ch as usize)?;
    let mut screen = FrameBuffer::new(cw as usize, ch as usize);

    let mut loader = ImageLoader::new();
    let mut image_idx = 0usize;

    let open_camera = || -> anyhow::Result<CameraCapture> {
        let cam = CameraCapture::new(args.camera, args.cam_width, args.cam_height)?;
        let (w, h) = cam.resolution();
        info!(index = args.camera, width = w, height = h, "camera open");
        Ok(cam)
    };

    let seed = args.stitch.seed();
    let (mut session, mut cam) = match args.image.first() {
        Some(path) => {
            loader.request(path.clone(), ch);
            (Session::new(Mode::Image, seed), None)
        }
        None => (
            Session::new(Mode::Live, seed),
            Some(open_camera().context("no --image given, opening camera")?),
        ),
    };

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Inputs */
        for action in drawer.actions() {
            match action {
                Action::StepUp => params.nudge_step(1),
                Action::StepDown => params.nudge_step(-1),
                Action::ThresholdUp => params.nudge_threshold(5),
                Action::ThresholdDown => params.nudge_threshold(-5),
                Action::SpeedUp => params.nudge_speed(1),
                Action::SpeedDown => params.nudge_speed(-1),
                Action::TogglePause => {
                    if let Some(paused) = session.toggle_pause() {
                        info!(paused, "camera pause toggled");
                    }
                }
                Action::Restart => {
                    if session.restart(&params) {
                        info!("reveal restarted");
                    }
                }
                Action::NextImage => {
                    if !args.image.is_empty() {
                        image_idx = (image_idx + 1) % args.image.len();
                        loader.request(args.image[image_idx].clone(), ch);
                    }
                }
                Action::UseCamera => {
                    if cam.is_none() {
                        match open_camera() {
                            Ok(c) => cam = Some(c),
                            Err(e) => warn!("camera unavailable: {e:#}"),
                        }
                    }
                    if cam.is_some() && session.mode() != Mode::Live {
                        session.use_live();
                        info!("mode: live");
                    }
                }
            }
        }

        /* 2) A finished load takes effect at this frame boundary. */
        if let Some((path, result)) = loader.poll() {
            match result {
                Ok(raster) => {
                    session.image_loaded(raster, &params);
                    cam = None;
                    info!(path = %path.display(), "mode: image");
                }
                Err(e) => warn!("{e}"),
            }
        }

        /* 3) Stitch */
        screen.clear(0);
        session.frame(&mut FrameCanvas::new(&mut screen), &params, (cw, ch), || {
            cam.as_mut().map(|c| c.next_frame())
        });

        /* 4) HUD */
        let status = session.status();
        let hud = format!(
            "{} | STEP {} THR {} SPD {} | {}",
            status, params.step, params.threshold, params.speed, hud_fps_text
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        /* 5) Present */
        drawer.present(&screen)?;

        /* 6) FPS (logged + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            info!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_size_accepts_wxh() {
        assert_eq!(parse_size("600x600"), Ok((600, 600)));
        assert_eq!(parse_size("320X200"), Ok((320, 200)));
        assert!(parse_size("600").is_err());
        assert!(parse_size("0x10").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn stitch_args_clamp_to_slider_ranges() {
        let cli = Cli::try_parse_from([
            "stitch-cam", "frame", "--image", "a.png", "--out", "b.png", "--step", "1", "--threshold", "999",
        ])
        .unwrap();
        let Command::Frame(args) = cli.cmd else { panic!("expected frame") };
        let p = args.stitch.params();
        assert_eq!((p.step, p.threshold, p.speed), (4, 255, 10));
    }
}
