use nalgebra::Point2;

/// A chessboard corner candidate in image coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Corner {
    /// Sub-pixel position, image coordinates.
    pub position: Point2<f32>,
    /// Direction of one board diagonal through the corner, radians in [0, pi).
    pub orientation: f32,
    /// Detector response; larger is stronger.
    pub strength: f32,
}

impl Corner {
    pub fn new(position: Point2<f32>, orientation: f32, strength: f32) -> Self {
        Self {
            position,
            orientation,
            strength,
        }
    }
}
