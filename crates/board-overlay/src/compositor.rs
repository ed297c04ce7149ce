//! Warping the overlay into a frame and blending it in place.

use crate::core::{
    composite_masked, warp_perspective_gray_into, warp_perspective_rgb_into, GrayImage,
    GrayImageView, Homography, Interpolation, RgbImage, RgbImageView,
};

/// Reusable scratch buffers for compositing an overlay into frames of one
/// fixed size.
pub struct Compositor {
    warped_overlay: RgbImage,
    warped_mask: GrayImage,
}

impl Compositor {
    pub fn new(frame_width: usize, frame_height: usize) -> Self {
        Self {
            warped_overlay: RgbImage::new_filled(frame_width, frame_height, [0, 0, 0]),
            warped_mask: GrayImage::new_filled(frame_width, frame_height, 0),
        }
    }

    /// Warp `overlay` and its `mask` into the frame through
    /// `h_frame_from_overlay` and alpha-blend the result in place. The
    /// overlay is resampled bilinearly; the mask uses nearest-pixel lookup
    /// so a solid mask stays binary and the pasted region keeps a hard edge.
    ///
    /// Returns `false`, leaving the frame untouched, when the homography
    /// cannot be inverted.
    pub fn composite(
        &mut self,
        frame: &mut RgbImage,
        overlay: &RgbImageView<'_>,
        mask: &GrayImageView<'_>,
        h_frame_from_overlay: &Homography,
    ) -> bool {
        assert_eq!(
            (frame.width, frame.height),
            (self.warped_overlay.width, self.warped_overlay.height),
            "frame size differs from the compositor's"
        );

        // inverse mapping: every frame pixel looks up its overlay source
        let Some(h_overlay_from_frame) = h_frame_from_overlay.inverse() else {
            return false;
        };

        warp_perspective_rgb_into(
            overlay,
            &h_overlay_from_frame,
            Interpolation::Linear,
            &mut self.warped_overlay,
        );
        warp_perspective_gray_into(
            mask,
            &h_overlay_from_frame,
            Interpolation::Nearest,
            &mut self.warped_mask,
        );
        composite_masked(frame, &self.warped_overlay.view(), &self.warped_mask.view());
        true
    }
}
