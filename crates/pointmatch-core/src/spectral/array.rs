use ndarray::Array2;
use num_complex::Complex;
use num_traits::Zero;

use crate::error::{PointMatchError, Result};

/// Allocate a zeroed `height x width` grid, reporting size overflow or a
/// refused reservation instead of aborting.
fn try_zeros<T: Clone + Zero>(width: usize, height: usize) -> Result<Array2<T>> {
    let alloc_err = || PointMatchError::AllocationFailure { width, height };
    let len = width.checked_mul(height).ok_or_else(alloc_err)?;
    let mut buf: Vec<T> = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| alloc_err())?;
    buf.resize(len, T::zero());
    Array2::from_shape_vec((height, width), buf).map_err(|_| alloc_err())
}

fn check_same_shape(left: (usize, usize), right: (usize, usize)) -> Result<()> {
    if left != right {
        return Err(PointMatchError::DimensionMismatch {
            left_width: left.0,
            left_height: left.1,
            right_width: right.0,
            right_height: right.1,
        });
    }
    Ok(())
}

/// Real-valued spatial array. Row-major, shape = (height, width), indexed by
/// `(x, y)` through the accessors.
#[derive(Clone, Debug)]
pub struct RealArray {
    data: Array2<f64>,
}

impl RealArray {
    pub fn zeros(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            data: try_zeros(width, height)?,
        })
    }

    pub fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// `(width, height)`
    pub fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[[y, x]]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.data[[y, x]] = value;
    }

    /// Sum of all cells.
    pub fn energy(&self) -> f64 {
        self.data.sum()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub(crate) fn as_array_mut(&mut self) -> &mut Array2<f64> {
        &mut self.data
    }
}

/// Transform-domain array, same layout as [`RealArray`].
#[derive(Clone, Debug)]
pub struct ComplexArray {
    data: Array2<Complex<f64>>,
}

impl ComplexArray {
    pub fn zeros(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            data: try_zeros(width, height)?,
        })
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn get(&self, x: usize, y: usize) -> Complex<f64> {
        self.data[[y, x]]
    }

    pub fn as_array(&self) -> &Array2<Complex<f64>> {
        &self.data
    }

    pub(crate) fn as_array_mut(&mut self) -> &mut Array2<Complex<f64>> {
        &mut self.data
    }

    pub fn ensure_same_shape(&self, other: &ComplexArray) -> Result<()> {
        check_same_shape(self.dims(), other.dims())
    }
}
