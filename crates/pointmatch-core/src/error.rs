use thiserror::Error;

#[derive(Error, Debug)]
pub enum PointMatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to allocate {width}x{height} array")]
    AllocationFailure { width: usize, height: usize },

    #[error("Array size mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Point match worker thread panicked")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, PointMatchError>;
