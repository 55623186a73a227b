use std::sync::Arc;

use ndarray::{Array2, Zip};
use num_complex::Complex;
use num_traits::Zero;
use rustfft::{Fft, FftPlanner};

use crate::error::{PointMatchError, Result};

use super::array::{ComplexArray, RealArray};

/// Forward and inverse 2D DFT plans for one padded canvas size.
///
/// Every array passed through a plan must have the plan's dimensions, which
/// keeps the image and sample transforms multipliable element by element.
pub struct SpectralPlan {
    width: usize,
    height: usize,
    row_forward: Arc<dyn Fft<f64>>,
    col_forward: Arc<dyn Fft<f64>>,
    row_inverse: Arc<dyn Fft<f64>>,
    col_inverse: Arc<dyn Fft<f64>>,
}

impl SpectralPlan {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PointMatchError::InvalidInput(format!(
                "transform size must be positive, got {width}x{height}"
            )));
        }
        let mut planner = FftPlanner::new();
        Ok(Self {
            width,
            height,
            row_forward: planner.plan_fft_forward(width),
            col_forward: planner.plan_fft_forward(height),
            row_inverse: planner.plan_fft_inverse(width),
            col_inverse: planner.plan_fft_inverse(height),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn check(&self, dims: (usize, usize)) -> Result<()> {
        if dims != self.dims() {
            return Err(PointMatchError::DimensionMismatch {
                left_width: dims.0,
                left_height: dims.1,
                right_width: self.width,
                right_height: self.height,
            });
        }
        Ok(())
    }

    /// 2D forward DFT: row-wise, then column-wise. Unnormalized.
    pub fn forward(&self, input: &RealArray) -> Result<ComplexArray> {
        self.check(input.dims())?;
        let mut output = ComplexArray::zeros(self.width, self.height)?;
        Zip::from(output.as_array_mut())
            .and(input.as_array())
            .for_each(|out, &re| *out = Complex::new(re, 0.0));

        transform_rows(output.as_array_mut(), &self.row_forward);
        transform_cols(output.as_array_mut(), &self.col_forward);
        Ok(output)
    }

    /// 2D inverse DFT normalized by `1 / (width * height)`. Only the real
    /// part is kept; the imaginary residue is rounding noise.
    pub fn inverse(&self, input: &ComplexArray) -> Result<RealArray> {
        self.check(input.dims())?;
        let mut work = input.clone();
        transform_cols(work.as_array_mut(), &self.col_inverse);
        transform_rows(work.as_array_mut(), &self.row_inverse);

        let scale = 1.0 / (self.width * self.height) as f64;
        let mut output = RealArray::zeros(self.width, self.height)?;
        Zip::from(output.as_array_mut())
            .and(work.as_array())
            .for_each(|out, c| *out = c.re * scale);
        Ok(output)
    }
}

fn transform_rows(data: &mut Array2<Complex<f64>>, fft: &Arc<dyn Fft<f64>>) {
    let mut buffer = vec![Complex::<f64>::zero(); data.ncols()];
    let mut scratch = vec![Complex::<f64>::zero(); fft.get_inplace_scratch_len()];
    for mut row in data.rows_mut() {
        for (dst, src) in buffer.iter_mut().zip(row.iter()) {
            *dst = *src;
        }
        fft.process_with_scratch(&mut buffer, &mut scratch);
        for (dst, src) in row.iter_mut().zip(buffer.iter()) {
            *dst = *src;
        }
    }
}

fn transform_cols(data: &mut Array2<Complex<f64>>, fft: &Arc<dyn Fft<f64>>) {
    let mut buffer = vec![Complex::<f64>::zero(); data.nrows()];
    let mut scratch = vec![Complex::<f64>::zero(); fft.get_inplace_scratch_len()];
    for mut col in data.columns_mut() {
        for (dst, src) in buffer.iter_mut().zip(col.iter()) {
            *dst = *src;
        }
        fft.process_with_scratch(&mut buffer, &mut scratch);
        for (dst, src) in col.iter_mut().zip(buffer.iter()) {
            *dst = *src;
        }
    }
}

/// In-place replacement of every element by its complex conjugate.
pub fn conjugate_in_place(matrix: &mut ComplexArray) {
    matrix.as_array_mut().mapv_inplace(|c| c.conj());
}

/// Element-wise complex product of two transforms of the same size.
pub fn multiply(a: &ComplexArray, b: &ComplexArray) -> Result<ComplexArray> {
    a.ensure_same_shape(b)?;
    let mut out = ComplexArray::zeros(a.width(), a.height())?;
    Zip::from(out.as_array_mut())
        .and(a.as_array())
        .and(b.as_array())
        .for_each(|o, &x, &y| *o = x * y);
    Ok(out)
}
