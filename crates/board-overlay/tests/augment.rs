//! End-to-end pipeline tests against a rendered chessboard frame.
//!
//! The frame is drawn with the same geometry the session expects to find:
//! a 7x6-square board (40 px squares) on a white mount, set on a gray
//! background in a 640x360 frame. The 6x5 inner-corner lattice spans
//! (219.5, 99.5) .. (419.5, 259.5).

use approx::assert_abs_diff_eq;
use board_overlay::anchors::anchor_points;
use board_overlay::chessboard::{BoardSpec, ChessboardDetector, ChessboardParams};
use board_overlay::core::{rgb_to_gray_into, RgbImage};
use board_overlay::detect::{default_chess_config, detect_board};
use board_overlay::session::{AugmentStatus, OverlaySession, SessionParams};
use nalgebra::Point2;

fn fill_rect(img: &mut RgbImage, x0: usize, y0: usize, w: usize, h: usize, rgb: [u8; 3]) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let i = (y * img.width + x) * 3;
            img.data[i..i + 3].copy_from_slice(&rgb);
        }
    }
}

fn render_board_frame() -> RgbImage {
    let mut frame = RgbImage::new_filled(640, 360, [128, 128, 128]);
    // white mount with a 40 px margin around the board
    fill_rect(&mut frame, 140, 20, 360, 320, [255, 255, 255]);
    for sy in 0..6 {
        for sx in 0..7 {
            let rgb = if (sx + sy) % 2 == 0 {
                [30, 30, 30]
            } else {
                [220, 220, 220]
            };
            fill_rect(&mut frame, 180 + sx * 40, 60 + sy * 40, 40, 40, rgb);
        }
    }
    frame
}

#[test]
fn detected_anchors_land_on_the_true_lattice_corners() {
    let frame = render_board_frame();
    let mut gray = image::GrayImage::new(640, 360);
    rgb_to_gray_into(&frame.view(), &mut gray);

    let detector = ChessboardDetector::new(BoardSpec::default(), ChessboardParams::default());
    let detection = detect_board(&gray, &default_chess_config(), &detector)
        .expect("the rendered board should be detected");

    assert_eq!(detection.inner_cols, 6);
    assert_eq!(detection.inner_rows, 5);
    assert_eq!(detection.corners.len(), 30);

    let anchors = anchor_points(&detection.corners, 6, 5);
    let truth = [
        Point2::new(219.5f32, 99.5),
        Point2::new(419.5, 99.5),
        Point2::new(419.5, 259.5),
        Point2::new(219.5, 259.5),
    ];
    for (got, want) in anchors.iter().zip(&truth) {
        assert_abs_diff_eq!(got, want, epsilon = 1.5);
    }
}

#[test]
fn augment_pastes_the_overlay_onto_the_board() {
    let overlay = RgbImage::new_filled(200, 100, [255, 0, 255]);
    let mut session = OverlaySession::new(SessionParams::default(), overlay).unwrap();

    let mut frame = render_board_frame();
    let original = frame.clone();

    let status = session.augment(&mut frame);
    assert_eq!(status, AugmentStatus::Overlaid);

    // The solid overlay color fills the anchor quad interior exactly.
    for (x, y) in [(320, 180), (250, 130), (390, 230)] {
        assert_eq!(frame.pixel(x, y), [255, 0, 255], "at ({x},{y})");
    }
    // Away from the quad the frame is byte-for-byte untouched.
    for (x, y) in [(10, 10), (630, 350), (160, 40), (480, 320)] {
        assert_eq!(frame.pixel(x, y), original.pixel(x, y), "at ({x},{y})");
    }
}

#[test]
fn process_frame_survives_the_mirror() {
    let overlay = RgbImage::new_filled(120, 80, [0, 255, 0]);
    let mut session = OverlaySession::new(SessionParams::default(), overlay).unwrap();

    let frame = render_board_frame();
    let (shown, status) = session.process_frame(&frame.view());

    assert_eq!(status, AugmentStatus::Overlaid);
    assert_eq!((shown.width, shown.height), (640, 360));
    // the mirrored board still covers the frame center
    assert_eq!(shown.pixel(320, 180), [0, 255, 0]);
}
