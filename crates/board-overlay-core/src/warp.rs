//! Inverse-mapping perspective warp.
//!
//! Coordinates follow the usual image convention: integer (x, y) is the
//! center of that pixel, so an image of width w has pixel centers at
//! x = 0..w-1. For every output pixel, `h_src_from_dst` maps its (x, y)
//! into source coordinates and the source is sampled there; anything that
//! lands outside the source image is empty (zero).

use nalgebra::Point2;

use crate::homography::Homography;
use crate::image::{
    sample_bilinear_rgb, sample_bilinear_u8, GrayImage, GrayImageView, RgbImage, RgbImageView,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolation {
    /// Nearest-pixel lookup; keeps a binary mask binary.
    Nearest,
    /// Bilinear blend of the four surrounding pixels.
    Linear,
}

pub fn warp_perspective_gray(
    src: &GrayImageView<'_>,
    h_src_from_dst: &Homography,
    out_w: usize,
    out_h: usize,
    interp: Interpolation,
) -> GrayImage {
    let mut out = GrayImage::new_filled(out_w, out_h, 0);
    warp_perspective_gray_into(src, h_src_from_dst, interp, &mut out);
    out
}

pub fn warp_perspective_gray_into(
    src: &GrayImageView<'_>,
    h_src_from_dst: &Homography,
    interp: Interpolation,
    out: &mut GrayImage,
) {
    for y in 0..out.height {
        for x in 0..out.width {
            let p = h_src_from_dst.apply(Point2::new(x as f32, y as f32));
            out.data[y * out.width + x] = if !p.x.is_finite() || !p.y.is_finite() {
                // at or beyond the horizon of the transform
                0
            } else {
                match interp {
                    Interpolation::Nearest => nearest_gray(src, p.x, p.y),
                    Interpolation::Linear => sample_bilinear_u8(src, p.x, p.y),
                }
            };
        }
    }
}

pub fn warp_perspective_rgb(
    src: &RgbImageView<'_>,
    h_src_from_dst: &Homography,
    out_w: usize,
    out_h: usize,
    interp: Interpolation,
) -> RgbImage {
    let mut out = RgbImage::new_filled(out_w, out_h, [0, 0, 0]);
    warp_perspective_rgb_into(src, h_src_from_dst, interp, &mut out);
    out
}

pub fn warp_perspective_rgb_into(
    src: &RgbImageView<'_>,
    h_src_from_dst: &Homography,
    interp: Interpolation,
    out: &mut RgbImage,
) {
    for y in 0..out.height {
        for x in 0..out.width {
            let p = h_src_from_dst.apply(Point2::new(x as f32, y as f32));
            let px = if !p.x.is_finite() || !p.y.is_finite() {
                [0, 0, 0]
            } else {
                match interp {
                    Interpolation::Nearest => nearest_rgb(src, p.x, p.y),
                    Interpolation::Linear => sample_bilinear_rgb(src, p.x, p.y),
                }
            };
            let i = (y * out.width + x) * 3;
            out.data[i..i + 3].copy_from_slice(&px);
        }
    }
}

#[inline]
fn nearest_gray(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    let xi = x.round();
    let yi = y.round();
    if xi < 0.0 || yi < 0.0 || xi >= src.width as f32 || yi >= src.height as f32 {
        return 0;
    }
    src.data[yi as usize * src.width + xi as usize]
}

#[inline]
fn nearest_rgb(src: &RgbImageView<'_>, x: f32, y: f32) -> [u8; 3] {
    let xi = x.round();
    let yi = y.round();
    if xi < 0.0 || yi < 0.0 || xi >= src.width as f32 || yi >= src.height as f32 {
        return [0, 0, 0];
    }
    let i = (yi as usize * src.width + xi as usize) * 3;
    [src.data[i], src.data[i + 1], src.data[i + 2]]
}
