use super::Matrix;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

/// Matrix product with an explicit right-hand operand.
pub trait Dot<I> {
    type Output;
    fn dot(self, rhs: I) -> Self::Output;
}

pub trait Transpose {
    type Output;
    fn transpose(&self) -> Self::Output;
}

impl<const R: usize, const C: usize> Transpose for Matrix<R, C> {
    type Output = Matrix<C, R>;
    fn transpose(&self) -> Self::Output {
        let mut transposed = Matrix::new();

        for row in 0..R {
            for col in 0..C {
                transposed[(col, row)] = self[(row, col)];
            }
        }
        transposed
    }
}

/// `R`x`C` times `C`x`K` gives `R`x`K`. Each output cell is accumulated
/// from zero independently of every other cell.
impl<'a, const R: usize, const C: usize, const K: usize> Dot<&Matrix<C, K>> for &'a Matrix<R, C> {
    type Output = Matrix<R, K>;
    fn dot(self, rhs: &Matrix<C, K>) -> Self::Output {
        let mut data = Vec::with_capacity(R * K);

        for lhs_row in 0..R {
            for rhs_col in 0..K {
                let mut sum = 0.0;
                for n in 0..C {
                    sum += self[(lhs_row, n)] * rhs[(n, rhs_col)]
                }
                data.push(sum);
            }
        }

        Matrix { data }
    }
}

impl<'a, const R: usize, const C: usize, const K: usize> Mul<&Matrix<C, K>> for &'a Matrix<R, C> {
    type Output = Matrix<R, K>;
    fn mul(self, rhs: &Matrix<C, K>) -> Self::Output {
        self.dot(rhs)
    }
}

impl<const R: usize, const C: usize> Matrix<R, C> {
    /// Multiplies element-wise in place (Hadamard product).
    pub fn hadamard(&mut self, rhs: &Matrix<R, C>) {
        for (x, y) in self.data.iter_mut().zip(&rhs.data) {
            *x *= y;
        }
    }
}

/// Adds two matrices element-wise.
impl<'a, const R: usize, const C: usize> Add for &'a Matrix<R, C> {
    type Output = Matrix<R, C>;
    fn add(self, rhs: Self) -> Self::Output {
        let mut res = self.clone();
        res += rhs;
        res
    }
}

/// Subs two matrices element-wise.
impl<'a, const R: usize, const C: usize> Sub for &'a Matrix<R, C> {
    type Output = Matrix<R, C>;
    fn sub(self, rhs: Self) -> Self::Output {
        let mut res = self.clone();
        res -= rhs;
        res
    }
}

impl<const R: usize, const C: usize> AddAssign<&Matrix<R, C>> for Matrix<R, C> {
    fn add_assign(&mut self, rhs: &Matrix<R, C>) {
        for (x, y) in self.data.iter_mut().zip(&rhs.data) {
            *x += y;
        }
    }
}

impl<const R: usize, const C: usize> SubAssign<&Matrix<R, C>> for Matrix<R, C> {
    fn sub_assign(&mut self, rhs: &Matrix<R, C>) {
        for (x, y) in self.data.iter_mut().zip(&rhs.data) {
            *x -= y;
        }
    }
}

impl<const R: usize, const C: usize> AddAssign<f64> for Matrix<R, C> {
    fn add_assign(&mut self, rhs: f64) {
        self.apply(|x| x + rhs);
    }
}

impl<const R: usize, const C: usize> SubAssign<f64> for Matrix<R, C> {
    fn sub_assign(&mut self, rhs: f64) {
        self.apply(|x| x - rhs);
    }
}

impl<const R: usize, const C: usize> MulAssign<f64> for Matrix<R, C> {
    fn mul_assign(&mut self, rhs: f64) {
        self.apply(|x| x * rhs);
    }
}
