//! Frame normalization primitives: stretch resize, horizontal mirror and
//! grayscale conversion.

use crate::image::{RgbImage, RgbImageView};

#[inline]
fn get_rgb_clamped(src: &RgbImageView<'_>, x: i32, y: i32) -> [u8; 3] {
    let x = x.clamp(0, src.width as i32 - 1) as usize;
    let y = y.clamp(0, src.height as i32 - 1) as usize;
    let i = (y * src.width + x) * 3;
    [src.data[i], src.data[i + 1], src.data[i + 2]]
}

/// Bilinear stretch resize (no aspect-ratio preservation). Samples are
/// clamped to the source edges, and a same-size resize is the identity.
pub fn resize_bilinear_rgb(src: &RgbImageView<'_>, out_w: usize, out_h: usize) -> RgbImage {
    let mut out = RgbImage::new_filled(out_w, out_h, [0, 0, 0]);
    resize_bilinear_rgb_into(src, &mut out);
    out
}

pub fn resize_bilinear_rgb_into(src: &RgbImageView<'_>, out: &mut RgbImage) {
    let sx = src.width as f32 / out.width as f32;
    let sy = src.height as f32 / out.height as f32;

    for y in 0..out.height {
        // pixel-center mapping keeps the image centered for any scale
        let srcy = (y as f32 + 0.5) * sy - 0.5;
        let y0 = srcy.floor() as i32;
        let fy = srcy - y0 as f32;
        for x in 0..out.width {
            let srcx = (x as f32 + 0.5) * sx - 0.5;
            let x0 = srcx.floor() as i32;
            let fx = srcx - x0 as f32;

            let p00 = get_rgb_clamped(src, x0, y0);
            let p10 = get_rgb_clamped(src, x0 + 1, y0);
            let p01 = get_rgb_clamped(src, x0, y0 + 1);
            let p11 = get_rgb_clamped(src, x0 + 1, y0 + 1);

            let o = (y * out.width + x) * 3;
            for c in 0..3 {
                let a = p00[c] as f32 + fx * (p10[c] as f32 - p00[c] as f32);
                let b = p01[c] as f32 + fx * (p11[c] as f32 - p01[c] as f32);
                out.data[o + c] = (a + fy * (b - a)).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Mirror along the vertical axis in place: column x swaps with column
/// width-1-x, every row.
pub fn flip_horizontal(img: &mut RgbImage) {
    let w = img.width;
    for y in 0..img.height {
        let row = &mut img.data[y * w * 3..(y + 1) * w * 3];
        for x in 0..w / 2 {
            let a = x * 3;
            let b = (w - 1 - x) * 3;
            for c in 0..3 {
                row.swap(a + c, b + c);
            }
        }
    }
}

/// Rec.601 luma, fixed point. `out` must hold exactly width*height bytes.
pub fn rgb_to_gray_into(src: &RgbImageView<'_>, out: &mut [u8]) {
    assert_eq!(out.len(), src.width * src.height, "gray buffer size mismatch");
    for (px, g) in src.data.chunks_exact(3).zip(out.iter_mut()) {
        let lum = 77 * px[0] as u32 + 150 * px[1] as u32 + 29 * px[2] as u32;
        *g = ((lum + 128) >> 8) as u8;
    }
}
