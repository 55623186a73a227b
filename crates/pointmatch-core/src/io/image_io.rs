use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};

use crate::error::Result;
use crate::matching::CorrelationSurface;
use crate::processed::ProcessedImage;

/// Load any raster format the `image` crate decodes as a processed image.
/// The file is converted to 8-bit luma; dark pixels become foreground.
pub fn load_processed_image(path: &Path) -> Result<ProcessedImage> {
    let gray = image::open(path)?.to_luma8();
    Ok(ProcessedImage::from_gray(&gray))
}

/// Save a correlation surface as 8-bit grayscale PNG. Scores are clamped to
/// [0, 1], so a perfect match is white.
pub fn save_surface_png(surface: &CorrelationSurface, path: &Path) -> Result<()> {
    let h = surface.height();
    let w = surface.width();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = (surface.score(col, row).clamp(0.0, 1.0) * 255.0).round() as u8;
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
