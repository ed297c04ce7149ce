use crate::image::{GrayImageView, RgbImage, RgbImageView};

/// Per-pixel masked blend of `overlay` into `frame`:
/// `out = (frame * (255 - m) + overlay * m + 127) / 255` per channel.
///
/// A mask value of 255 replaces the frame pixel with the overlay pixel
/// exactly and 0 leaves the frame pixel untouched exactly; intermediate
/// values produce a proportional blend, so anti-aliased masks compose
/// cleanly. All three images must share the same dimensions.
pub fn composite_masked(frame: &mut RgbImage, overlay: &RgbImageView<'_>, mask: &GrayImageView<'_>) {
    assert_eq!(
        (frame.width, frame.height),
        (overlay.width, overlay.height),
        "overlay dimensions must match the frame"
    );
    assert_eq!(
        (frame.width, frame.height),
        (mask.width, mask.height),
        "mask dimensions must match the frame"
    );

    for (i, &m) in mask.data.iter().enumerate() {
        if m == 0 {
            continue;
        }
        let m = m as u32;
        let o = i * 3;
        for c in o..o + 3 {
            let f = frame.data[c] as u32;
            let v = overlay.data[c] as u32;
            frame.data[c] = ((f * (255 - m) + v * m + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayImage;

    fn noisy(w: usize, h: usize, seed: u8) -> RgbImage {
        let mut img = RgbImage::new_filled(w, h, [0, 0, 0]);
        for (i, b) in img.data.iter_mut().enumerate() {
            *b = ((i as u32 * 31 + seed as u32 * 17) % 256) as u8;
        }
        img
    }

    #[test]
    fn opaque_mask_replaces_exactly() {
        let mut frame = noisy(7, 5, 1);
        let overlay = noisy(7, 5, 2);
        let mask = GrayImage::new_filled(7, 5, 255);
        composite_masked(&mut frame, &overlay.view(), &mask.view());
        assert_eq!(frame.data, overlay.data);
    }

    #[test]
    fn empty_mask_preserves_exactly() {
        let original = noisy(7, 5, 3);
        let mut frame = original.clone();
        let overlay = noisy(7, 5, 4);
        let mask = GrayImage::new_filled(7, 5, 0);
        composite_masked(&mut frame, &overlay.view(), &mask.view());
        assert_eq!(frame.data, original.data);
    }

    #[test]
    fn partial_mask_blends_proportionally() {
        let mut frame = RgbImage::new_filled(1, 1, [0, 100, 255]);
        let overlay = RgbImage::new_filled(1, 1, [255, 100, 0]);
        let mask = GrayImage::new_filled(1, 1, 128);
        composite_masked(&mut frame, &overlay.view(), &mask.view());
        // (0*127 + 255*128 + 127) / 255 = 128, channel 1 unchanged, symmetric on blue
        assert_eq!(frame.pixel(0, 0), [128, 100, 127]);
    }

    #[test]
    #[should_panic(expected = "mask dimensions")]
    fn mismatched_mask_panics() {
        let mut frame = noisy(4, 4, 0);
        let overlay = noisy(4, 4, 1);
        let mask = GrayImage::new_filled(3, 4, 255);
        composite_masked(&mut frame, &overlay.view(), &mask.view());
    }
}
