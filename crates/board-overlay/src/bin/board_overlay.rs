use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use board_overlay::camera::{CameraSource, WindowPresenter};
use board_overlay::run::{run_loop, RunStats};
use board_overlay::session::{OverlaySession, SessionParams};

/// Live chessboard augmentation: watches the webcam and pastes an overlay
/// picture onto a detected chessboard. Press q (or Q) in the preview window
/// to quit.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Camera index to open.
    #[arg(long, default_value_t = 0)]
    camera: i32,

    /// Overlay image pasted onto the detected board.
    #[arg(long, default_value = "tiger.jpg")]
    overlay: PathBuf,

    /// Optional JSON file with session parameters; fields not present keep
    /// their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace.
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = board_overlay::core::init_with_level(args.log_level) {
        eprintln!("logger setup failed: {err}");
    }

    match run(&args) {
        Ok(stats) => {
            log::info!(
                "captured {} frames, presented {}, overlaid {}",
                stats.frames_captured,
                stats.frames_presented,
                stats.frames_overlaid
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("fatal: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                log::error!("caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<RunStats, Box<dyn Error>> {
    let params: SessionParams = match &args.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => SessionParams::default(),
    };

    let mut session = OverlaySession::load(params, &args.overlay)?;
    let mut source = CameraSource::open(args.camera)?;
    let mut presenter = WindowPresenter::open("Video")?;

    log::info!(
        "augmenting camera {} at {}x{}, overlay {}; press q in the window to quit",
        args.camera,
        params.frame_width,
        params.frame_height,
        args.overlay.display()
    );

    Ok(run_loop(&mut session, &mut source, &mut presenter)?)
}
