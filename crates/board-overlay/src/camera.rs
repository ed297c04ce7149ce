//! OpenCV-backed frame capture and preview window.
//!
//! This is the only module that touches OpenCV; everything else works on
//! the crate's own RGB buffers. OpenCV hands frames over in BGR order, so
//! both directions swap channels.

use opencv::core::{Mat, CV_8UC3};
use opencv::{highgui, prelude::*, videoio};
use thiserror::Error;

use crate::core::RgbImage;
use crate::run::{FrameSource, Presenter};

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera {index} failed to open")]
    OpenFailed { index: i32 },

    #[error("unusable camera frame: {0}")]
    BadFrame(String),

    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

/// Webcam capture through `opencv::videoio`.
pub struct CameraSource {
    capture: videoio::VideoCapture,
    frame: Mat,
}

impl CameraSource {
    /// Open camera `index` with the default backend.
    pub fn open(index: i32) -> Result<Self, CameraError> {
        let capture = videoio::VideoCapture::new(index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(CameraError::OpenFailed { index });
        }
        Ok(Self {
            capture,
            frame: Mat::default(),
        })
    }
}

impl FrameSource for CameraSource {
    type Error = CameraError;

    fn next_frame(&mut self) -> Result<Option<RgbImage>, CameraError> {
        // an empty grab is transient (camera warming up, dropped frame)
        if !self.capture.read(&mut self.frame)? || self.frame.empty() {
            return Ok(None);
        }
        mat_to_rgb(&self.frame).map(Some)
    }
}

/// Preview window through `opencv::highgui`.
pub struct WindowPresenter {
    window: String,
}

impl WindowPresenter {
    pub fn open(window: &str) -> Result<Self, CameraError> {
        highgui::named_window(window, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            window: window.to_string(),
        })
    }
}

impl Presenter for WindowPresenter {
    type Error = CameraError;

    fn present(&mut self, frame: &RgbImage) -> Result<Option<char>, CameraError> {
        let mat = rgb_to_mat(frame)?;
        highgui::imshow(&self.window, &mat)?;
        // wait_key doubles as the window's event pump; -1 means no key
        let key = highgui::wait_key(10)?;
        Ok(u32::try_from(key).ok().and_then(char::from_u32))
    }
}

impl Drop for WindowPresenter {
    fn drop(&mut self) {
        if let Err(err) = highgui::destroy_all_windows() {
            log::warn!("failed to destroy preview windows: {err}");
        }
    }
}

fn mat_to_rgb(mat: &Mat) -> Result<RgbImage, CameraError> {
    if mat.typ() != CV_8UC3 {
        return Err(CameraError::BadFrame(format!(
            "expected an 8-bit 3-channel frame, got mat type {}",
            mat.typ()
        )));
    }
    let size = mat.size()?;
    let (w, h) = (size.width as usize, size.height as usize);

    let mut rgb = mat.data_bytes()?.to_vec();
    for px in rgb.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
    RgbImage::from_raw(w, h, rgb).map_err(|e| CameraError::BadFrame(e.to_string()))
}

fn rgb_to_mat(frame: &RgbImage) -> Result<Mat, CameraError> {
    let mut bgr = frame.data.clone();
    for px in bgr.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
    let mat = Mat::from_slice(&bgr)?;
    let mat = mat.reshape(3, frame.height as i32)?;
    Ok(mat.try_clone()?)
}
