//! Augment a single photo instead of a live camera feed.
//!
//! Runs the exact per-frame pipeline (resize, mirror, detect, composite)
//! on one input image and writes the result next to it.

use std::path::Path;

use board_overlay::core::RgbImage;
use board_overlay::session::{OverlaySession, SessionParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    board_overlay::core::init_with_level(log::LevelFilter::Info)?;

    let mut args = std::env::args().skip(1);
    let (Some(photo_path), Some(overlay_path)) = (args.next(), args.next()) else {
        eprintln!("Usage: augment_image <photo> <overlay> [output.png]");
        return Ok(());
    };
    let output_path = args.next().unwrap_or_else(|| "augmented.png".to_string());

    let mut session = OverlaySession::load(SessionParams::default(), Path::new(&overlay_path))?;

    let photo = image::open(&photo_path)?.to_rgb8();
    let (w, h) = (photo.width() as usize, photo.height() as usize);
    let frame = RgbImage::from_raw(w, h, photo.into_raw())?;

    // same path the live loop takes, mirror included
    let (augmented, status) = session.process_frame(&frame.view());
    log::info!("augmentation status: {status:?}");

    let out = image::RgbImage::from_raw(
        augmented.width as u32,
        augmented.height as u32,
        augmented.data,
    )
    .ok_or("output buffer has the wrong size")?;
    out.save(&output_path)?;
    log::info!("wrote {output_path}");

    Ok(())
}
