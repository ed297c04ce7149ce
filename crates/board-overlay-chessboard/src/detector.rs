use board_overlay_core::{Corner, GrayImageView};
use nalgebra::Point2;

use crate::grid::canonical_grid;
use crate::gridgraph::{assign_grid_coordinates, connected_components, GridGraph};
use crate::params::{BoardSpec, ChessboardParams, GridGraphParams, SubpixParams};
use crate::subpix::refine_corners;

/// A detected board: the full set of inner corners in canonical row-major
/// order (see [`crate::OrderedGrid`] for the ordering rules).
#[derive(Clone, Debug)]
pub struct ChessboardDetection {
    pub inner_cols: usize,
    pub inner_rows: usize,
    /// `inner_cols * inner_rows` corner positions, row-major.
    pub corners: Vec<Point2<f32>>,
}

/// Finds one complete chessboard of a known size among corner candidates.
pub struct ChessboardDetector {
    board: BoardSpec,
    params: ChessboardParams,
    graph_params: GridGraphParams,
    subpix_params: SubpixParams,
}

impl ChessboardDetector {
    pub fn new(board: BoardSpec, params: ChessboardParams) -> Self {
        Self {
            board,
            params,
            graph_params: GridGraphParams::default(),
            subpix_params: SubpixParams::default(),
        }
    }

    /// Replace the neighbor-search parameters.
    pub fn with_grid_search(mut self, graph_params: GridGraphParams) -> Self {
        self.graph_params = graph_params;
        self
    }

    /// Replace the refinement parameters used by [`Self::detect`].
    pub fn with_refinement(mut self, subpix_params: SubpixParams) -> Self {
        self.subpix_params = subpix_params;
        self
    }

    pub fn board(&self) -> BoardSpec {
        self.board
    }

    /// Assemble the board grid from corner candidates, without touching
    /// pixel data. Corner positions are reported as given.
    pub fn detect_from_corners(&self, corners: &[Corner]) -> Option<ChessboardDetection> {
        let inner_cols = self.board.inner_cols() as usize;
        let inner_rows = self.board.inner_rows() as usize;
        let expected = self.board.corner_count();

        let candidates: Vec<Corner> = corners
            .iter()
            .filter(|c| c.strength >= self.params.min_strength)
            .copied()
            .collect();
        log::debug!(
            "{} of {} corner candidates above strength {}",
            candidates.len(),
            corners.len(),
            self.params.min_strength
        );
        if candidates.len() < expected {
            return None;
        }

        let graph = GridGraph::new(&candidates, &self.graph_params);
        let mut components = connected_components(&graph);
        components.sort_by_key(|c| std::cmp::Reverse(c.len()));
        log::debug!(
            "{} connected components, largest has {} corners",
            components.len(),
            components.first().map_or(0, Vec::len)
        );

        for component in &components {
            if component.len() < expected {
                break; // sorted by size, nothing bigger follows
            }
            let assignments = assign_grid_coordinates(&graph, component);
            if let Some(grid) = canonical_grid(&assignments, &candidates, inner_cols, inner_rows) {
                log::debug!("accepted a {inner_cols}x{inner_rows} corner grid");
                return Some(ChessboardDetection {
                    inner_cols,
                    inner_rows,
                    corners: grid.corners,
                });
            }
        }

        None
    }

    /// Assemble the board grid, then refine each corner to sub-pixel
    /// accuracy against the grayscale frame.
    pub fn detect(
        &self,
        gray: &GrayImageView<'_>,
        corners: &[Corner],
    ) -> Option<ChessboardDetection> {
        let mut detection = self.detect_from_corners(corners)?;
        refine_corners(gray, &mut detection.corners, &self.subpix_params);
        Some(detection)
    }
}
