use image::GrayImage;
use ndarray::Array2;

/// A processed (filtered) grayscale image.
/// Pixel values are f32 in [0.0, 1.0], where 1.0 is full foreground.
#[derive(Clone, Debug)]
pub struct ProcessedImage {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
}

impl ProcessedImage {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    /// Convert an 8-bit luma image. Dark pixels are foreground, since curves
    /// and markers are drawn dark on a light background.
    pub fn from_gray(gray: &GrayImage) -> Self {
        let (w, h) = gray.dimensions();
        let mut data = Array2::<f32>::zeros((h as usize, w as usize));
        for (x, y, pixel) in gray.enumerate_pixels() {
            data[[y as usize, x as usize]] = 1.0 - pixel.0[0] as f32 / 255.0;
        }
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Foreground intensity at `(x, y)`, or 0.0 outside the image.
    pub fn intensity(&self, x: usize, y: usize) -> f32 {
        self.data.get([y, x]).copied().unwrap_or(0.0)
    }

    /// Number of pixels whose intensity reaches `on_threshold`.
    pub fn count_on(&self, on_threshold: f32) -> usize {
        self.data.iter().filter(|&&v| v >= on_threshold).count()
    }
}
