use ndarray::Array2;
use pointmatch_core::point::PixelPoint;
use pointmatch_core::processed::ProcessedImage;

/// Build a `width x height` processed image with foreground at `points`.
/// Points outside the image are ignored.
pub fn image_with_points(width: usize, height: usize, points: &[PixelPoint]) -> ProcessedImage {
    let mut data = Array2::<f32>::zeros((height, width));
    for p in points {
        if p.x >= 0 && p.y >= 0 && (p.x as usize) < width && (p.y as usize) < height {
            data[[p.y as usize, p.x as usize]] = 1.0;
        }
    }
    ProcessedImage::new(data)
}

/// Three-pixel "L": the corner plus one pixel below and one to the right.
pub fn l_shape(x: i32, y: i32) -> Vec<PixelPoint> {
    vec![
        PixelPoint::new(x, y),
        PixelPoint::new(x, y + 1),
        PixelPoint::new(x + 1, y),
    ]
}

/// Plus sign with arms of length `arm` around `(cx, cy)`; 4*arm+1 pixels.
pub fn plus_shape(cx: i32, cy: i32, arm: i32) -> Vec<PixelPoint> {
    let mut points = vec![PixelPoint::new(cx, cy)];
    for d in 1..=arm {
        points.push(PixelPoint::new(cx - d, cy));
        points.push(PixelPoint::new(cx + d, cy));
        points.push(PixelPoint::new(cx, cy - d));
        points.push(PixelPoint::new(cx, cy + d));
    }
    points
}
