use crate::prelude::*;
use log::{debug, warn};
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};
use std::{
    fmt,
    ops::{Index, IndexMut},
};

pub mod ops;

pub use ops::{Dot, Transpose};

/// An `R`x`C` grid of `f64`, stored row-major in one contiguous buffer.
///
/// The extents are part of the type, so two matrices of different shapes
/// can never meet in an elementwise operation or a mismatched product.
#[derive(Debug, PartialEq, Clone)]
pub struct Matrix<const R: usize, const C: usize> {
    data: Vec<f64>,
}

impl<const R: usize, const C: usize> Default for Matrix<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const R: usize, const C: usize> Matrix<R, C> {
    /// Creates a zero-filled matrix.
    pub fn new() -> Self {
        Self {
            data: vec![0.0; R * C],
        }
    }

    pub fn from_array(arr: [[f64; C]; R]) -> Self {
        let mut data = Vec::with_capacity(R * C);

        for row in arr {
            for x in row {
                data.push(x);
            }
        }

        Self { data }
    }

    /// Builds a matrix from a flat row-major slice of exactly `R * C` values.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let mut res = Self::new();
        res.try_fill(values)?;
        Ok(res)
    }

    pub fn dim(&self) -> (usize, usize) {
        (R, C)
    }

    pub fn rows(&self) -> usize {
        R
    }

    pub fn cols(&self) -> usize {
        C
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    fn index_of(row: usize, col: usize) -> Result<usize> {
        if row >= R || col >= C {
            return Err(Error::IndexOutOfRange {
                row,
                col,
                dim: (R, C),
            });
        }
        Ok(row * C + col)
    }

    /// Returns the element at (row, col), or an error if it lies outside the matrix.
    pub fn try_get(&self, row: usize, col: usize) -> Result<f64> {
        Self::index_of(row, col).map(|idx| self.data[idx])
    }

    /// Returns the element at (row, col).
    /// Out of range reads are logged and yield `0.0`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.try_get(row, col).unwrap_or_else(|e| {
            debug!("Matrix<{R}, {C}> get: {e}");
            0.0
        })
    }

    /// Writes the element at (row, col), or returns an error if it lies outside the matrix.
    pub fn try_set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let idx = Self::index_of(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Writes the element at (row, col).
    /// Out of range writes are logged and otherwise ignored.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if let Err(e) = self.try_set(row, col, value) {
            debug!("Matrix<{R}, {C}> set: {e}");
        }
    }

    /// Sets every element to 0
    pub fn clear(&mut self) {
        for x in &mut self.data {
            *x = 0.0;
        }
    }

    /// Overwrites the matrix from a flat row-major slice of `R * C` values.
    pub fn try_fill(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != R * C {
            return Err(Error::LengthMismatch {
                expected: R * C,
                found: values.len(),
            });
        }
        self.data.copy_from_slice(values);
        Ok(())
    }

    /// Like [`Matrix::try_fill`], but a slice of the wrong length is logged
    /// and leaves the matrix untouched.
    pub fn fill(&mut self, values: &[f64]) {
        if let Err(e) = self.try_fill(values) {
            warn!("Matrix<{R}, {C}> fill: {e}");
        }
    }

    /// Copies the matrix out into a flat row-major slice of `R * C` values.
    pub fn try_copy_to(&self, out: &mut [f64]) -> Result<()> {
        if out.len() != R * C {
            return Err(Error::LengthMismatch {
                expected: R * C,
                found: out.len(),
            });
        }
        out.copy_from_slice(&self.data);
        Ok(())
    }

    pub fn copy_to(&self, out: &mut [f64]) {
        if let Err(e) = self.try_copy_to(out) {
            warn!("Matrix<{R}, {C}> copy_to: {e}");
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Overwrites every element with an independent draw from the uniform
    /// distribution over `[min, max]`.
    pub fn try_randomize<G: Rng + ?Sized>(&mut self, rng: &mut G, min: f64, max: f64) -> Result<()> {
        if !min.is_finite() || !max.is_finite() || min > max || !(max - min).is_finite() {
            return Err(Error::InvalidRange { min, max });
        }

        let die = Uniform::new_inclusive(min, max);
        for x in &mut self.data {
            *x = die.sample(rng);
        }
        Ok(())
    }

    pub fn randomize<G: Rng + ?Sized>(&mut self, rng: &mut G, min: f64, max: f64) {
        if let Err(e) = self.try_randomize(rng, min, max) {
            warn!("Matrix<{R}, {C}> randomize: {e}");
        }
    }

    /// Applies a function to every element of the matrix
    pub fn apply<F: Fn(f64) -> f64>(&mut self, f: F) {
        for x in &mut self.data {
            *x = f(*x);
        }
    }
}

impl<const R: usize, const C: usize> Index<(usize, usize)> for Matrix<R, C> {
    type Output = f64;
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(i < R && j < C, "index (r{i}, c{j}) out of range for {R}x{C} matrix");
        &self.data[i * C + j]
    }
}

impl<const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<R, C> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        assert!(i < R && j < C, "index (r{i}, c{j}) out of range for {R}x{C} matrix");
        &mut self.data[i * C + j]
    }
}

impl<const R: usize, const C: usize> fmt::Display for Matrix<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(C.max(1)) {
            for x in row {
                write!(f, "{x:.6} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn new_is_zeroed() {
        let matrix = Matrix::<2, 3>::new();
        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(matrix.get(row, col), 0.0);
            }
        }
        assert_eq!(matrix.dim(), (2, 3));
    }

    #[test]
    fn access_matrix_from_array() {
        let matrix = Matrix::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(matrix[(0, 1)], 2.0);
        assert_eq!(matrix[(1, 2)], 6.0);
        assert_eq!(matrix.get(0, 0), 1.0);
        assert_eq!(matrix.get(1, 1), 5.0);
    }

    #[test]
    fn matrix_from_slice() {
        let matrix = Matrix::<2, 2>::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(matrix, Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]));

        let matrix = Matrix::<2, 2>::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(
            matrix,
            Err(Error::LengthMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn out_of_range_access() {
        let mut matrix = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);

        assert_eq!(matrix.get(5, 5), 0.0);
        matrix.set(5, 5, 9.0);
        assert_eq!(matrix.to_vec(), [1.0, 2.0, 3.0, 4.0]);

        // Column past the end must not wrap into the next row
        assert_eq!(matrix.get(0, 2), 0.0);
        matrix.set(0, 2, 9.0);
        assert_eq!(matrix.to_vec(), [1.0, 2.0, 3.0, 4.0]);

        assert_eq!(
            matrix.try_get(5, 5),
            Err(Error::IndexOutOfRange {
                row: 5,
                col: 5,
                dim: (2, 2)
            })
        );
        assert!(matrix.try_set(2, 0, 1.0).is_err());
    }

    #[test]
    #[should_panic]
    fn index_out_of_range_panics() {
        let matrix = Matrix::<2, 2>::new();
        let _ = matrix[(0, 2)];
    }

    #[test]
    fn set_then_get() {
        let mut matrix = Matrix::<2, 3>::new();
        matrix.set(0, 1, 3.0);
        matrix[(1, 2)] = 7.0;
        assert_eq!(matrix.to_vec(), [0.0, 3.0, 0.0, 0.0, 0.0, 7.0]);
    }

    #[test]
    fn clear_zeroes_every_element() {
        let mut matrix = Matrix::from_array([[1.0, -2.0], [3.5, 4.0], [5.0, 6.0]]);
        matrix.clear();
        for row in 0..matrix.rows() {
            for col in 0..matrix.cols() {
                assert_eq!(matrix.get(row, col), 0.0);
            }
        }
    }

    #[test]
    fn fill_and_copy_out() {
        let mut matrix = Matrix::<2, 3>::new();
        matrix.fill(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(matrix[(1, 0)], 4.0);

        let mut out = [0.0; 6];
        matrix.copy_to(&mut out);
        assert_eq!(out, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        // Wrong length leaves both sides alone
        matrix.fill(&[9.0; 5]);
        assert_eq!(matrix.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let mut short = [0.0; 2];
        matrix.copy_to(&mut short);
        assert_eq!(short, [0.0, 0.0]);
        assert!(matrix.try_copy_to(&mut short).is_err());
    }

    #[test]
    fn randomize_within_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut matrix = Matrix::<4, 5>::new();
        matrix.randomize(&mut rng, 2.0, 5.0);

        assert!(matrix.as_slice().iter().all(|&x| (2.0..=5.0).contains(&x)));
        assert!(matrix.as_slice().iter().any(|&x| x != matrix[(0, 0)]));
    }

    #[test]
    fn randomize_is_reproducible_from_seed() {
        let mut m1 = Matrix::<3, 3>::new();
        let mut m2 = Matrix::<3, 3>::new();
        m1.randomize(&mut StdRng::seed_from_u64(42), -1.0, 1.0);
        m2.randomize(&mut StdRng::seed_from_u64(42), -1.0, 1.0);
        assert_eq!(m1, m2);
    }

    #[test]
    fn randomize_rejects_bad_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut matrix = Matrix::from_array([[1.0, 2.0]]);

        assert_eq!(
            matrix.try_randomize(&mut rng, 1.0, -1.0),
            Err(Error::InvalidRange { min: 1.0, max: -1.0 })
        );
        assert!(matrix.try_randomize(&mut rng, f64::NAN, 1.0).is_err());

        matrix.randomize(&mut rng, 1.0, -1.0);
        assert_eq!(matrix.to_vec(), [1.0, 2.0]);
    }

    #[test]
    fn matrix_apply() {
        let mut matrix = Matrix::from_array([[1.0, 2.0], [2.0, 2.0], [4.0, 8.0]]);

        matrix.apply(|x| x / 2.0);

        assert_eq!(matrix.to_vec(), [0.5, 1.0, 1.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn clone_is_deep() {
        let original = Matrix::from_array([[1.0, 2.0]]);
        let mut copy = original.clone();
        copy.set(0, 0, 10.0);
        assert_eq!(original.get(0, 0), 1.0);
    }

    #[test]
    fn display_rows() {
        let matrix = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(
            matrix.to_string(),
            "1.000000 2.000000 \n3.000000 4.000000 \n"
        );
    }
}
