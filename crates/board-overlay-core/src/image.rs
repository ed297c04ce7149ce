use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("buffer of {got} bytes does not match {width}x{height} ({expected} bytes expected)")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug, PartialEq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn new_filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap an existing row-major buffer, checking its length.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, BufferError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major interleaved RGB, len = w*h*3
}

#[derive(Clone, Debug)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    pub fn new_filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap an existing row-major interleaved RGB buffer, checking its length.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, BufferError> {
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Pixel at (x, y). Panics when out of bounds; meant for assertions and
    /// small fixtures, not hot loops.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

#[inline]
pub(crate) fn get_gray(src: &GrayImageView<'_>, x: i32, y: i32) -> u8 {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return 0;
    }
    src.data[y as usize * src.width + x as usize]
}

#[inline]
pub(crate) fn get_rgb(src: &RgbImageView<'_>, x: i32, y: i32) -> [u8; 3] {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return [0, 0, 0];
    }
    let i = (y as usize * src.width + x as usize) * 3;
    [src.data[i], src.data[i + 1], src.data[i + 2]]
}

#[inline]
pub fn sample_bilinear(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_gray(src, x0, y0) as f32;
    let p10 = get_gray(src, x0 + 1, y0) as f32;
    let p01 = get_gray(src, x0, y0 + 1) as f32;
    let p11 = get_gray(src, x0 + 1, y0 + 1) as f32;

    let a = p00 + fx * (p10 - p00);
    let b = p01 + fx * (p11 - p01);
    a + fy * (b - a)
}

#[inline]
pub fn sample_bilinear_u8(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    sample_bilinear(src, x, y).round().clamp(0.0, 255.0) as u8
}

#[inline]
pub fn sample_bilinear_rgb(src: &RgbImageView<'_>, x: f32, y: f32) -> [u8; 3] {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_rgb(src, x0, y0);
    let p10 = get_rgb(src, x0 + 1, y0);
    let p01 = get_rgb(src, x0, y0 + 1);
    let p11 = get_rgb(src, x0 + 1, y0 + 1);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let a = p00[c] as f32 + fx * (p10[c] as f32 - p00[c] as f32);
        let b = p01[c] as f32 + fx * (p11[c] as f32 - p01[c] as f32);
        out[c] = (a + fy * (b - a)).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn from_raw_rejects_bad_lengths() {
        assert!(GrayImage::from_raw(4, 3, vec![0u8; 12]).is_ok());
        assert_eq!(
            GrayImage::from_raw(4, 3, vec![0u8; 11]),
            Err(BufferError::LengthMismatch {
                width: 4,
                height: 3,
                expected: 12,
                got: 11,
            })
        );
        assert!(RgbImage::from_raw(4, 3, vec![0u8; 36]).is_ok());
        assert!(RgbImage::from_raw(4, 3, vec![0u8; 12]).is_err());
    }

    #[test]
    fn bilinear_is_exact_at_integer_coordinates() {
        let img = GrayImage::from_raw(3, 2, vec![10, 20, 30, 40, 50, 60]).unwrap();
        let v = img.view();
        assert_eq!(sample_bilinear(&v, 1.0, 0.0), 20.0);
        assert_eq!(sample_bilinear(&v, 2.0, 1.0), 60.0);
        // halfway between 10 and 20
        assert_abs_diff_eq!(sample_bilinear(&v, 0.5, 0.0), 15.0, epsilon = 1e-5);
    }

    #[test]
    fn sampling_outside_is_zero_padded() {
        let img = GrayImage::new_filled(2, 2, 200);
        let v = img.view();
        assert_eq!(sample_bilinear(&v, -2.0, 0.0), 0.0);
        // half a pixel outside blends halfway toward zero
        assert_abs_diff_eq!(sample_bilinear(&v, -0.5, 0.0), 100.0, epsilon = 1e-5);
    }

    #[test]
    fn rgb_sampling_interpolates_per_channel() {
        let mut img = RgbImage::new_filled(2, 1, [0, 0, 0]);
        img.data[3] = 100; // second pixel red
        let v = img.view();
        assert_eq!(sample_bilinear_rgb(&v, 0.0, 0.0), [0, 0, 0]);
        assert_eq!(sample_bilinear_rgb(&v, 0.5, 0.0), [50, 0, 0]);
        assert_eq!(sample_bilinear_rgb(&v, 1.0, 0.0), [100, 0, 0]);
    }
}
