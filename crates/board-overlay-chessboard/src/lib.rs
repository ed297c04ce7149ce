//! Chessboard inner-corner detection for a board of known size, built on top
//! of `board-overlay-core`.
//!
//! ## Quickstart
//!
//! ```
//! use board_overlay_chessboard::{BoardSpec, ChessboardDetector, ChessboardParams};
//! use board_overlay_core::Corner;
//!
//! let board = BoardSpec::default(); // 7x6 squares -> 6x5 inner corners
//! let detector = ChessboardDetector::new(board, ChessboardParams::default());
//!
//! let corners: Vec<Corner> = Vec::new();
//! let result = detector.detect_from_corners(&corners);
//! println!("detected: {}", result.is_some());
//! ```
//!
//! Algorithm (graph-based, perspective-aware):
//! 1. Filter strong corner candidates.
//! 2. For each candidate, find up to 4 neighbors (right/left/up/down) based
//!    on: distance within the expected spacing window, roughly orthogonal
//!    diagonal orientations, and the connecting edge at ~45 degrees to both
//!    diagonals.
//! 3. Build a 4-connected grid graph from these neighbor relations.
//! 4. BFS each connected component, assigning integer coordinates (i, j).
//! 5. Accept a component only if it fills the expected inner grid exactly
//!    (every cell present, one candidate per cell, direct or transposed).
//! 6. Order the accepted grid row-major from a fixed corner (minimal x+y in
//!    image coordinates) and refine each corner to sub-pixel accuracy.

mod detector;
mod geom;
mod grid;
mod gridgraph;
mod params;
mod subpix;

pub use detector::{ChessboardDetection, ChessboardDetector};
pub use grid::OrderedGrid;
pub use params::{BoardSpec, BoardSpecError, ChessboardParams, GridGraphParams, SubpixParams};
pub use subpix::refine_corners;
