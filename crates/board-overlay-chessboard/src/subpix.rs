//! Sub-pixel corner refinement.
//!
//! At an ideal saddle corner, the image gradient at every window pixel `q`
//! is perpendicular to the vector from the true corner `p` to `q` (along an
//! edge the gradient crosses it, on a flat square it vanishes), so each
//! pixel contributes one linear constraint `grad(q)^T (q - p) = 0`. Summing
//! the constraints with a Gaussian window weight yields a 2x2 normal system
//! whose solution is the refined corner. The window re-centers on the
//! rounded estimate and the process repeats until the update falls below
//! `epsilon` or the iteration cap is hit.

use board_overlay_core::GrayImageView;
use nalgebra::Point2;

use crate::params::SubpixParams;

/// Refine each corner position in place against the grayscale frame.
pub fn refine_corners(gray: &GrayImageView<'_>, corners: &mut [Point2<f32>], params: &SubpixParams) {
    for corner in corners.iter_mut() {
        *corner = refine_corner(gray, *corner, params);
    }
}

fn refine_corner(
    gray: &GrayImageView<'_>,
    start: Point2<f32>,
    params: &SubpixParams,
) -> Point2<f32> {
    let hw = params.half_window as i32;
    let sigma = params.half_window as f64 / 2.0;
    let inv_two_sigma_sq = 1.0 / (2.0 * sigma * sigma);

    let mut current = start;
    for _ in 0..params.max_iterations {
        let cx = current.x.round() as i32;
        let cy = current.y.round() as i32;

        // Accumulate G = sum w g g^T and b = sum w g g^T q in f64.
        let mut gxx = 0.0f64;
        let mut gxy = 0.0f64;
        let mut gyy = 0.0f64;
        let mut bx = 0.0f64;
        let mut by = 0.0f64;

        for dy in -hw..=hw {
            for dx in -hw..=hw {
                let qx = cx + dx;
                let qy = cy + dy;
                // central differences need a one-pixel margin
                if qx < 1 || qy < 1 || qx >= gray.width as i32 - 1 || qy >= gray.height as i32 - 1
                {
                    continue;
                }

                let gx = (px(gray, qx + 1, qy) - px(gray, qx - 1, qy)) * 0.5;
                let gy = (px(gray, qx, qy + 1) - px(gray, qx, qy - 1)) * 0.5;
                let w = (-((dx * dx + dy * dy) as f64) * inv_two_sigma_sq).exp();

                let wxx = w * gx * gx;
                let wxy = w * gx * gy;
                let wyy = w * gy * gy;
                gxx += wxx;
                gxy += wxy;
                gyy += wyy;
                bx += wxx * qx as f64 + wxy * qy as f64;
                by += wxy * qx as f64 + wyy * qy as f64;
            }
        }

        let det = gxx * gyy - gxy * gxy;
        if det.abs() < 1e-12 {
            break; // flat or one-dimensional neighborhood, keep the estimate
        }

        let next = Point2::new(
            ((gyy * bx - gxy * by) / det) as f32,
            ((gxx * by - gxy * bx) / det) as f32,
        );
        let shift = (next - current).norm();
        current = next;
        if shift < params.epsilon {
            break;
        }
    }

    current
}

#[inline]
fn px(gray: &GrayImageView<'_>, x: i32, y: i32) -> f64 {
    gray.data[y as usize * gray.width + x as usize] as f64
}
