pub mod array;
pub mod length;
pub mod transform;

pub use array::{ComplexArray, RealArray};
pub use length::{is_fft_friendly, optimize_length_for_fft};
pub use transform::{conjugate_in_place, multiply, SpectralPlan};
