pub mod image_io;

pub use image_io::{load_processed_image, save_surface_png};
