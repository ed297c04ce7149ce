//! Canonical ordering of a detected corner lattice.
//!
//! Grid-graph traversal assigns integer `(i, j)` lattice coordinates whose
//! origin, axis directions and axis order all depend on which corner the
//! traversal started from. This module rewrites such an assignment into one
//! canonical row-major layout so that downstream consumers can rely on a
//! stable corner order across frames:
//!
//! * corner `0` is the extreme corner with the smallest `x + y`;
//! * rows have `inner_cols` entries and are emitted top to bottom;
//! * for square grids, where the axis order is ambiguous, rows run along
//!   the more horizontal lattice direction.

use board_overlay_core::Corner;
use nalgebra::Point2;

/// A complete chessboard inner-corner lattice in canonical row-major order.
#[derive(Clone, Debug)]
pub struct OrderedGrid {
    pub inner_cols: usize,
    pub inner_rows: usize,
    /// `inner_cols * inner_rows` corner positions, row-major.
    pub corners: Vec<Point2<f32>>,
}

#[derive(Clone, Copy)]
struct GridOrdering {
    transpose: bool,
    flip_rows: bool,
    flip_cols: bool,
}

/// Reorder a lattice-coordinate assignment into an [`OrderedGrid`].
///
/// `assignments` holds `(corner index, i, j)` tuples as produced by grid
/// traversal. Returns `None` unless the assignment forms exactly one
/// complete `inner_cols x inner_rows` lattice (in either axis order): holes,
/// duplicate cells and wrong dimensions all reject the candidate board.
pub fn canonical_grid(
    assignments: &[(usize, i32, i32)],
    corners: &[Corner],
    inner_cols: usize,
    inner_rows: usize,
) -> Option<OrderedGrid> {
    if inner_cols < 2 || inner_rows < 2 || assignments.is_empty() {
        return None;
    }

    let (mut min_i, mut max_i) = (i32::MAX, i32::MIN);
    let (mut min_j, mut max_j) = (i32::MAX, i32::MIN);
    for &(_, i, j) in assignments {
        min_i = min_i.min(i);
        max_i = max_i.max(i);
        min_j = min_j.min(j);
        max_j = max_j.max(j);
    }
    let width = (max_i - min_i + 1) as usize;
    let height = (max_j - min_j + 1) as usize;

    // Occupancy grid over the bounding box.
    let mut cells: Vec<Option<usize>> = vec![None; width * height];
    for &(node, i, j) in assignments {
        let col = (i - min_i) as usize;
        let row = (j - min_j) as usize;
        let cell = &mut cells[row * width + col];
        if cell.is_some() {
            return None; // two corners claimed the same lattice cell
        }
        *cell = Some(node);
    }
    let mut filled = Vec::with_capacity(cells.len());
    for cell in cells {
        filled.push(cell?); // hole in the lattice
    }

    // Enumerate the symmetries whose dimensions match the requested board.
    let mut candidates = Vec::with_capacity(8);
    for transpose in [false, true] {
        let fits = if transpose {
            width == inner_rows && height == inner_cols
        } else {
            width == inner_cols && height == inner_rows
        };
        if !fits {
            continue;
        }
        for flip_rows in [false, true] {
            for flip_cols in [false, true] {
                candidates.push(GridOrdering {
                    transpose,
                    flip_rows,
                    flip_cols,
                });
            }
        }
    }
    if candidates.is_empty() {
        return None; // bounding box does not match the board in either axis order
    }

    let raw_pos = |ord: GridOrdering, out_row: usize, out_col: usize| -> Point2<f32> {
        let r = if ord.flip_rows {
            inner_rows - 1 - out_row
        } else {
            out_row
        };
        let c = if ord.flip_cols {
            inner_cols - 1 - out_col
        } else {
            out_col
        };
        let (row, col) = if ord.transpose { (c, r) } else { (r, c) };
        corners[filled[row * width + col]].position
    };

    // Pick the ordering whose first corner has the smallest x + y; among
    // ties (square grids seen under both axis orders) prefer rows that run
    // along the more horizontal direction.
    let mut best: Option<(f32, bool, GridOrdering)> = None;
    for ord in candidates {
        let origin = raw_pos(ord, 0, 0);
        let along_row = raw_pos(ord, 0, 1) - origin;
        let origin_sum = origin.x + origin.y;
        let row_is_vertical = along_row.x.abs() < along_row.y.abs();

        let better = match &best {
            None => true,
            Some((sum, vertical, _)) => match origin_sum.total_cmp(sum) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Greater => false,
                std::cmp::Ordering::Equal => *vertical && !row_is_vertical,
            },
        };
        if better {
            best = Some((origin_sum, row_is_vertical, ord));
        }
    }
    let (_, _, ord) = best?;

    let mut out = Vec::with_capacity(inner_cols * inner_rows);
    for row in 0..inner_rows {
        for col in 0..inner_cols {
            out.push(raw_pos(ord, row, col));
        }
    }

    Some(OrderedGrid {
        inner_cols,
        inner_rows,
        corners: out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Image position of the lattice point in column `col`, row `row`.
    fn pos(col: usize, row: usize) -> Point2<f32> {
        Point2::new(20.0 * col as f32, 30.0 * row as f32)
    }

    /// 3x2 lattice of corners in row-major order.
    fn lattice_corners() -> Vec<Corner> {
        let mut corners = Vec::new();
        for row in 0..2 {
            for col in 0..3 {
                corners.push(Corner::new(pos(col, row), 0.0, 1.0));
            }
        }
        corners
    }

    fn assert_reading_order(grid: &OrderedGrid) {
        assert_eq!(grid.inner_cols, 3);
        assert_eq!(grid.inner_rows, 2);
        assert_eq!(grid.corners.len(), 6);
        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(grid.corners[row * 3 + col], pos(col, row));
            }
        }
    }

    #[test]
    fn permuted_assignments_come_out_in_reading_order() {
        let corners = lattice_corners();
        // arbitrary listing order, arbitrary coordinate offset
        let assignments = vec![
            (4, 8, 3),
            (0, 7, 2),
            (5, 9, 3),
            (2, 9, 2),
            (1, 8, 2),
            (3, 7, 3),
        ];

        let grid = canonical_grid(&assignments, &corners, 3, 2).unwrap();
        assert_reading_order(&grid);
    }

    #[test]
    fn mirrored_traversal_axes_are_flipped_back() {
        let corners = lattice_corners();
        // traversal that happened to count both axes in the negative direction
        let assignments: Vec<(usize, i32, i32)> = (0..6)
            .map(|n| (n, -((n % 3) as i32), -((n / 3) as i32)))
            .collect();

        let grid = canonical_grid(&assignments, &corners, 3, 2).unwrap();
        assert_reading_order(&grid);
    }

    #[test]
    fn swapped_traversal_axes_are_transposed_back() {
        let corners = lattice_corners();
        // traversal i runs along image rows, j along image columns
        let assignments: Vec<(usize, i32, i32)> = (0..6)
            .map(|n| (n, (n / 3) as i32, (n % 3) as i32))
            .collect();

        let grid = canonical_grid(&assignments, &corners, 3, 2).unwrap();
        assert_reading_order(&grid);
    }

    #[test]
    fn square_grid_rows_run_horizontally() {
        let corners = vec![
            Corner::new(Point2::new(0.0, 0.0), 0.0, 1.0),
            Corner::new(Point2::new(10.0, 0.0), 0.0, 1.0),
            Corner::new(Point2::new(0.0, 10.0), 0.0, 1.0),
            Corner::new(Point2::new(10.0, 10.0), 0.0, 1.0),
        ];
        // axis order is ambiguous for a 2x2 grid; hand in the transposed one
        let assignments = vec![(0, 0, 0), (1, 0, 1), (2, 1, 0), (3, 1, 1)];

        let grid = canonical_grid(&assignments, &corners, 2, 2).unwrap();
        assert_eq!(grid.corners[0], Point2::new(0.0, 0.0));
        assert_eq!(grid.corners[1], Point2::new(10.0, 0.0));
        assert_eq!(grid.corners[2], Point2::new(0.0, 10.0));
        assert_eq!(grid.corners[3], Point2::new(10.0, 10.0));
    }

    #[test]
    fn missing_corner_rejects_the_board() {
        let corners = lattice_corners();
        let assignments: Vec<(usize, i32, i32)> = (0..5)
            .map(|n| (n, (n % 3) as i32, (n / 3) as i32))
            .collect();

        assert!(canonical_grid(&assignments, &corners, 3, 2).is_none());
    }

    #[test]
    fn duplicate_cell_rejects_the_board() {
        let corners = lattice_corners();
        let mut assignments: Vec<(usize, i32, i32)> = (0..6)
            .map(|n| (n, (n % 3) as i32, (n / 3) as i32))
            .collect();
        assignments[5] = (5, 0, 0); // collides with corner 0

        assert!(canonical_grid(&assignments, &corners, 3, 2).is_none());
    }

    #[test]
    fn wrong_dimensions_reject_the_board() {
        let corners = lattice_corners();
        let assignments: Vec<(usize, i32, i32)> = (0..6)
            .map(|n| (n, (n % 3) as i32, (n / 3) as i32))
            .collect();

        assert!(canonical_grid(&assignments, &corners, 4, 2).is_none());
        assert!(canonical_grid(&assignments, &corners, 3, 3).is_none());
    }
}
