//! The overlay session owns every piece of per-frame state: the overlay
//! image and its mask, the detector stack and the compositing scratch
//! buffers. One session drives the whole resize -> mirror -> detect ->
//! warp -> blend pipeline.

use std::path::Path;

use chess_corners::ChessConfig;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::anchors::{anchor_points, overlay_corners};
use crate::chessboard::{
    BoardSpec, BoardSpecError, ChessboardDetector, ChessboardParams, GridGraphParams, SubpixParams,
};
use crate::compositor::Compositor;
use crate::core::{
    flip_horizontal, homography_from_4pt, resize_bilinear_rgb, rgb_to_gray_into, BufferError,
    GrayImage, RgbImage, RgbImageView,
};
use crate::detect::{default_chess_config, detect_board};

/// Session configuration. Every field has a default, so a JSON config may
/// override only the values it cares about.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionParams {
    /// Width of the working frame every capture is resized to.
    pub frame_width: usize,
    /// Height of the working frame.
    pub frame_height: usize,
    /// The chessboard to look for.
    pub board: BoardSpec,
    pub detector: ChessboardParams,
    pub grid_search: GridGraphParams,
    pub refine: SubpixParams,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            frame_width: 640,
            frame_height: 360,
            board: BoardSpec::default(),
            detector: ChessboardParams::default(),
            grid_search: GridGraphParams::default(),
            refine: SubpixParams::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to load the overlay image: {0}")]
    OverlayLoad(#[from] image::ImageError),

    #[error(transparent)]
    Board(#[from] BoardSpecError),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error("overlay image has zero size")]
    EmptyOverlay,

    #[error("working frame size must be nonzero")]
    EmptyFrame,
}

/// Outcome of augmenting one working frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AugmentStatus {
    /// The board was found and the overlay composited onto it.
    Overlaid,
    /// No complete board in this frame; the frame is untouched.
    BoardNotFound,
    /// A board was found but its corner mapping collapsed; the frame is
    /// untouched.
    DegenerateHomography,
}

pub struct OverlaySession {
    params: SessionParams,
    overlay: RgbImage,
    /// Solid opaque mask matching the overlay; warping it tracks which
    /// frame pixels the overlay covers.
    mask: GrayImage,
    overlay_quad: [Point2<f32>; 4],
    chess_cfg: ChessConfig,
    detector: ChessboardDetector,
    compositor: Compositor,
    gray: ::image::GrayImage,
}

impl OverlaySession {
    pub fn new(params: SessionParams, overlay: RgbImage) -> Result<Self, SessionError> {
        params.board.validate()?;
        if params.frame_width == 0 || params.frame_height == 0 {
            return Err(SessionError::EmptyFrame);
        }
        if overlay.width == 0 || overlay.height == 0 {
            return Err(SessionError::EmptyOverlay);
        }

        let detector = ChessboardDetector::new(params.board, params.detector)
            .with_grid_search(params.grid_search)
            .with_refinement(params.refine);
        let mask = GrayImage::new_filled(overlay.width, overlay.height, 255);
        let overlay_quad = overlay_corners(overlay.width, overlay.height);

        Ok(Self {
            compositor: Compositor::new(params.frame_width, params.frame_height),
            gray: ::image::GrayImage::new(params.frame_width as u32, params.frame_height as u32),
            chess_cfg: default_chess_config(),
            detector,
            overlay,
            mask,
            overlay_quad,
            params,
        })
    }

    /// Read the overlay image from disk and build a session around it.
    pub fn load(params: SessionParams, overlay_path: &Path) -> Result<Self, SessionError> {
        let rgb = image::open(overlay_path)?.to_rgb8();
        let (w, h) = (rgb.width() as usize, rgb.height() as usize);
        let overlay = RgbImage::from_raw(w, h, rgb.into_raw())?;
        Self::new(params, overlay)
    }

    /// Replace the ChESS corner detector settings.
    pub fn with_chess_config(mut self, cfg: ChessConfig) -> Self {
        self.chess_cfg = cfg;
        self
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    /// Bring a captured frame to working size and mirror it horizontally,
    /// selfie style.
    pub fn normalize(&self, frame: &RgbImageView<'_>) -> RgbImage {
        let mut out = resize_bilinear_rgb(frame, self.params.frame_width, self.params.frame_height);
        flip_horizontal(&mut out);
        out
    }

    /// Detect the board in a working-size frame and composite the overlay
    /// onto it in place. On anything short of success the frame is left
    /// exactly as it came in.
    pub fn augment(&mut self, frame: &mut RgbImage) -> AugmentStatus {
        rgb_to_gray_into(&frame.view(), &mut self.gray);

        let Some(detection) = detect_board(&self.gray, &self.chess_cfg, &self.detector) else {
            return AugmentStatus::BoardNotFound;
        };

        let anchors = anchor_points(&detection.corners, detection.inner_cols, detection.inner_rows);
        let Some(h) = homography_from_4pt(&self.overlay_quad, &anchors) else {
            log::debug!("board anchors produced a degenerate mapping, skipping frame");
            return AugmentStatus::DegenerateHomography;
        };

        if self
            .compositor
            .composite(frame, &self.overlay.view(), &self.mask.view(), &h)
        {
            AugmentStatus::Overlaid
        } else {
            log::debug!("homography is not invertible, skipping frame");
            AugmentStatus::DegenerateHomography
        }
    }

    /// Full per-frame pipeline: [`Self::normalize`] then [`Self::augment`].
    /// Returns the frame to present along with what happened to it.
    pub fn process_frame(&mut self, frame: &RgbImageView<'_>) -> (RgbImage, AugmentStatus) {
        let mut working = self.normalize(frame);
        let status = self.augment(&mut working);
        (working, status)
    }
}
