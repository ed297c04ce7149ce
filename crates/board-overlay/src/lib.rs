//! Live chessboard augmentation.
//!
//! Every camera frame is resized to a working resolution and mirrored, then
//! searched for a chessboard of known size. When the full inner-corner grid
//! is visible, an overlay picture is warped onto the board through a
//! four-point homography and alpha-blended into the frame, so the picture
//! appears glued to the board as it moves.
//!
//! ## Quickstart (no camera required)
//!
//! ```no_run
//! use std::path::Path;
//!
//! use board_overlay::core::RgbImage;
//! use board_overlay::session::{OverlaySession, SessionParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = OverlaySession::load(SessionParams::default(), Path::new("tiger.jpg"))?;
//!
//! let photo = image::open("scene.jpg")?.to_rgb8();
//! let (w, h) = (photo.width() as usize, photo.height() as usize);
//! let frame = RgbImage::from_raw(w, h, photo.into_raw())?;
//!
//! let (augmented, status) = session.process_frame(&frame.view());
//! println!("{status:?}: {}x{} output", augmented.width, augmented.height);
//! # Ok(())
//! # }
//! ```
//!
//! The live loop (`run::run_loop`) and its OpenCV camera/window adapters are
//! behind the `camera` feature; see the `board-overlay` binary.
//!
//! ## API map
//! - [`core`]: image buffers, homography estimation, warping and blending.
//! - [`chessboard`]: inner-corner grid assembly and sub-pixel refinement.
//! - [`detect`]: ChESS corner detection glue (`chess-corners`).
//! - [`anchors`]: overlay-corner to board-corner correspondence.
//! - [`session`]: the per-frame pipeline as an owned session object.
//! - [`run`]: capture/present seams and the interactive loop.
//! - [`camera`] (feature `camera`): OpenCV webcam capture and preview.

pub use board_overlay_chessboard as chessboard;
pub use board_overlay_core as core;

pub mod anchors;
pub mod compositor;
pub mod detect;
pub mod run;
pub mod session;

#[cfg(feature = "camera")]
pub mod camera;

pub use anchors::{anchor_indices, anchor_points, overlay_corners};
pub use chessboard::BoardSpec;
pub use compositor::Compositor;
pub use run::{run_loop, FrameSource, Presenter, RunError, RunStats};
pub use session::{AugmentStatus, OverlaySession, SessionError, SessionParams};
