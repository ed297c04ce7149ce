use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardSpecError {
    #[error("a {cols}x{rows}-square board is too small: need at least 3x3 squares for a 2x2 inner-corner grid")]
    TooSmall { cols: u32, rows: u32 },
}

/// Physical board layout, counted in squares.
///
/// A board of C x R squares exposes (C-1) x (R-1) inner corners, the points
/// where four squares meet. The default mirrors the classic 7x6 board with a
/// 6x5 = 30 inner-corner grid.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BoardSpec {
    pub squares_cols: u32,
    pub squares_rows: u32,
}

impl BoardSpec {
    pub fn new(squares_cols: u32, squares_rows: u32) -> Result<Self, BoardSpecError> {
        let spec = Self {
            squares_cols,
            squares_rows,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Four distinct anchor corners require at least a 2x2 inner grid.
    pub fn validate(&self) -> Result<(), BoardSpecError> {
        if self.squares_cols < 3 || self.squares_rows < 3 {
            return Err(BoardSpecError::TooSmall {
                cols: self.squares_cols,
                rows: self.squares_rows,
            });
        }
        Ok(())
    }

    pub fn inner_cols(&self) -> u32 {
        self.squares_cols.saturating_sub(1)
    }

    pub fn inner_rows(&self) -> u32 {
        self.squares_rows.saturating_sub(1)
    }

    pub fn corner_count(&self) -> usize {
        self.inner_cols() as usize * self.inner_rows() as usize
    }
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self {
            squares_cols: 7,
            squares_rows: 6,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct GridGraphParams {
    pub min_spacing_pix: f32,
    pub max_spacing_pix: f32,
    pub k_neighbors: usize,
    pub orientation_tolerance_deg: f32,
}

impl Default for GridGraphParams {
    // spacing window sized for a board filling a 640x360 working frame
    fn default() -> Self {
        Self {
            min_spacing_pix: 8.0,
            max_spacing_pix: 120.0,
            k_neighbors: 8,
            orientation_tolerance_deg: 22.5,
        }
    }
}

/// Parameters specific to the chessboard detector.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ChessboardParams {
    /// Minimal corner strength to consider.
    pub min_strength: f32,
}

impl Default for ChessboardParams {
    fn default() -> Self {
        Self { min_strength: 0.0 }
    }
}

/// Termination criteria for sub-pixel corner refinement. Iteration stops when
/// either the iteration cap is reached or the corner moves less than
/// `epsilon` pixels, whichever comes first.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct SubpixParams {
    /// Half size of the search window; the full window is (2h+1) x (2h+1).
    pub half_window: usize,
    pub max_iterations: u32,
    pub epsilon: f32,
}

impl Default for SubpixParams {
    fn default() -> Self {
        Self {
            half_window: 11,
            max_iterations: 30,
            epsilon: 0.1,
        }
    }
}
