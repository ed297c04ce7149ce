//! ChESS corner detection glue for the `chess-corners` crate.

use chess_corners::{find_chess_corners_image, ChessConfig, CornerDescriptor, ThresholdMode};
use nalgebra::Point2;

use crate::chessboard::{ChessboardDetection, ChessboardDetector};
use crate::core::{Corner, GrayImageView};

/// Default `chess-corners` settings for the 640x360 working resolution.
///
/// Single-scale detection is plenty at this size and keeps the per-frame
/// cost low; the thresholds are the same ones the repo examples use.
pub fn default_chess_config() -> ChessConfig {
    let mut cfg = ChessConfig::single_scale();
    cfg.threshold_mode = ThresholdMode::Relative;
    cfg.threshold_value = 0.2;
    cfg.nms_radius = 2;
    cfg
}

/// Borrow an `image::GrayImage` as the lightweight core view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Detect raw ChESS corners and adapt them into [`Corner`] candidates.
pub fn detect_corners(img: &::image::GrayImage, cfg: &ChessConfig) -> Vec<Corner> {
    find_chess_corners_image(img, cfg)
        .unwrap_or_default()
        .iter()
        .map(adapt_chess_corner)
        .collect()
}

/// Run the chessboard pipeline end-to-end on one grayscale frame:
/// ChESS corners -> grid assembly -> sub-pixel refinement.
pub fn detect_board(
    img: &::image::GrayImage,
    cfg: &ChessConfig,
    detector: &ChessboardDetector,
) -> Option<ChessboardDetection> {
    let corners = detect_corners(img, cfg);
    detector.detect(&gray_view(img), &corners)
}

fn adapt_chess_corner(c: &CornerDescriptor) -> Corner {
    // `chess-corners` reports the two grid-line axes; their dark-sector
    // bisector is the board diagonal [`Corner::orientation`] expects,
    // folded into [0, π).
    let diagonal = (c.axes[0].angle + c.axes[1].angle) / 2.0;
    Corner {
        position: Point2::new(c.x, c.y),
        orientation: diagonal.rem_euclid(std::f32::consts::PI),
        strength: c.response,
    }
}
