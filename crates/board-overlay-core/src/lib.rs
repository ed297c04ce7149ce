//! Core types and pixel-level utilities for the board overlay pipeline.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete corner detector, camera backend or encoded image
//! format; it works on plain row-major byte buffers.

mod blend;
mod corner;
mod homography;
mod image;
mod imgops;
mod logger;
mod warp;

pub use blend::composite_masked;
pub use corner::Corner;
pub use homography::{homography_from_4pt, Homography};
pub use image::{
    sample_bilinear, sample_bilinear_rgb, sample_bilinear_u8, BufferError, GrayImage,
    GrayImageView, RgbImage, RgbImageView,
};
pub use imgops::{flip_horizontal, resize_bilinear_rgb, resize_bilinear_rgb_into, rgb_to_gray_into};
pub use logger::init_with_level;
pub use warp::{
    warp_perspective_gray, warp_perspective_gray_into, warp_perspective_rgb,
    warp_perspective_rgb_into, Interpolation,
};
