//! Frame source / presenter seams and the interactive loop.
//!
//! The loop itself is deliberately free of any camera or GUI code so it can
//! run against mocks; the OpenCV-backed implementations live in the
//! feature-gated [`crate::camera`] module.

use thiserror::Error;

use crate::core::RgbImage;
use crate::session::{AugmentStatus, OverlaySession};

/// Produces frames for the loop.
pub trait FrameSource {
    type Error: std::error::Error;

    /// Fetch the next frame. `Ok(None)` reports a transient failure (a
    /// dropped frame) that the loop skips; fatal conditions are `Err`.
    fn next_frame(&mut self) -> Result<Option<RgbImage>, Self::Error>;
}

/// Shows frames to the user and reports key presses.
pub trait Presenter {
    type Error: std::error::Error;

    /// Display one frame and poll for input, returning a pressed key if
    /// there was one.
    fn present(&mut self, frame: &RgbImage) -> Result<Option<char>, Self::Error>;
}

/// Counters reported when the loop finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames_captured: u64,
    pub frames_presented: u64,
    pub frames_overlaid: u64,
}

#[derive(Debug, Error)]
pub enum RunError<S: std::error::Error, P: std::error::Error> {
    #[error("frame capture failed: {0}")]
    Capture(#[source] S),

    #[error("frame presentation failed: {0}")]
    Present(#[source] P),
}

/// Drive capture -> augment -> present until the user presses `q` (or `Q`).
///
/// Dropped frames (`Ok(None)` from the source) are skipped; every captured
/// frame is presented, augmented or not.
pub fn run_loop<S: FrameSource, P: Presenter>(
    session: &mut OverlaySession,
    source: &mut S,
    presenter: &mut P,
) -> Result<RunStats, RunError<S::Error, P::Error>> {
    let mut stats = RunStats::default();

    loop {
        let Some(frame) = source.next_frame().map_err(RunError::Capture)? else {
            log::warn!("dropped a frame: capture produced nothing");
            continue;
        };
        stats.frames_captured += 1;

        let (shown, status) = session.process_frame(&frame.view());
        if status == AugmentStatus::Overlaid {
            stats.frames_overlaid += 1;
        }

        let key = presenter.present(&shown).map_err(RunError::Present)?;
        stats.frames_presented += 1;

        if let Some(key) = key {
            if key.eq_ignore_ascii_case(&'q') {
                log::info!("quit requested");
                break;
            }
        }
    }

    Ok(stats)
}
