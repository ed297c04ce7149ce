//! Correspondence between overlay-image corners and detected board corners.

use nalgebra::Point2;

/// Indices of the four outer lattice corners in a row-major
/// `inner_cols x inner_rows` corner grid, in the order matching
/// [`overlay_corners`]: top-left, top-right, bottom-right, bottom-left.
///
/// Row-major layout puts lattice point `(col, row)` at index
/// `row * inner_cols + col`, so the extremes are:
///
/// | corner       | (col, row)                     | index                         |
/// |--------------|--------------------------------|-------------------------------|
/// | top-left     | `(0, 0)`                       | `0`                           |
/// | top-right    | `(inner_cols - 1, 0)`          | `inner_cols - 1`              |
/// | bottom-right | `(inner_cols - 1, inner_rows - 1)` | `inner_cols * inner_rows - 1` |
/// | bottom-left  | `(0, inner_rows - 1)`          | `inner_cols * (inner_rows - 1)` |
pub fn anchor_indices(inner_cols: usize, inner_rows: usize) -> [usize; 4] {
    [
        0,
        inner_cols - 1,
        inner_cols * inner_rows - 1,
        inner_cols * (inner_rows - 1),
    ]
}

/// The four outer corners of a detected row-major grid, in overlay order.
pub fn anchor_points(
    corners: &[Point2<f32>],
    inner_cols: usize,
    inner_rows: usize,
) -> [Point2<f32>; 4] {
    let idx = anchor_indices(inner_cols, inner_rows);
    [
        corners[idx[0]],
        corners[idx[1]],
        corners[idx[2]],
        corners[idx[3]],
    ]
}

/// Corners of a `width x height` overlay image: top-left, top-right,
/// bottom-right, bottom-left.
pub fn overlay_corners(width: usize, height: usize) -> [Point2<f32>; 4] {
    let w = width as f32;
    let h = height as f32;
    [
        Point2::new(0.0, 0.0),
        Point2::new(w, 0.0),
        Point2::new(w, h),
        Point2::new(0.0, h),
    ]
}
