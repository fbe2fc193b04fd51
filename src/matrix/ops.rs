use core::ops::Neg;

use crate::linalg::LinalgError;
use crate::tolerance::Tolerance;
use crate::traits::{FloatScalar, Scalar};

use super::vector::Vector;
use super::Matrix;

fn check_same_shape<T>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<(), LinalgError> {
    if lhs.shape() != rhs.shape() {
        return Err(LinalgError::DimensionMismatch {
            expected: lhs.shape(),
            got: rhs.shape(),
        });
    }
    Ok(())
}

// ── Element-wise addition / subtraction ─────────────────────────────

#[allow(clippy::should_implement_trait)]
impl<T: Scalar> Matrix<T> {
    /// Element-wise sum `self + rhs`.
    ///
    /// ```
    /// use densela::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let b = Matrix::from_rows(2, 2, &[4.0, 3.0, 2.0, 1.0]);
    /// let c = a.add(&b).unwrap();
    /// assert_eq!(c[(1, 1)], 5.0);
    /// assert!(a.add(&Matrix::zeros(3, 2)).is_err());
    /// ```
    pub fn add(&self, rhs: &Self) -> Result<Self, LinalgError> {
        check_same_shape(self, rhs)?;
        Ok(self.zip_with(rhs, |a, b| a + b))
    }

    /// Element-wise difference `self - rhs`.
    pub fn sub(&self, rhs: &Self) -> Result<Self, LinalgError> {
        check_same_shape(self, rhs)?;
        Ok(self.zip_with(rhs, |a, b| a - b))
    }

    /// Multiply every element by `k`.
    pub fn scale(&self, k: T) -> Self {
        let data = self.data.iter().map(|&x| x * k).collect();
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Matrix product `(M×N) · (N×P) → (M×P)`.
    ///
    /// Plain triple loop, ordered so the innermost loop walks a column.
    ///
    /// ```
    /// use densela::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let b = Matrix::from_rows(3, 1, &[1.0, 0.0, -1.0]);
    /// let c = a.matmul(&b).unwrap();
    /// assert_eq!(c.shape(), (2, 1));
    /// assert_eq!(c[(0, 0)], -2.0);
    /// assert_eq!(c[(1, 0)], -2.0);
    /// ```
    pub fn matmul(&self, rhs: &Self) -> Result<Self, LinalgError> {
        if self.ncols != rhs.nrows {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.ncols, rhs.ncols),
                got: rhs.shape(),
            });
        }
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut out = Matrix::zeros(m, p);
        for j in 0..p {
            for k in 0..n {
                let b_kj = rhs[(k, j)];
                let a_col = self.col_slice(k);
                let out_col = &mut out.data[j * m..(j + 1) * m];
                for (o, &a_ik) in out_col.iter_mut().zip(a_col) {
                    *o = *o + a_ik * b_kj;
                }
            }
        }
        Ok(out)
    }

    /// Matrix-vector product `A · v`, returned as a column vector.
    ///
    /// ```
    /// use densela::{Matrix, Vector};
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let v = Vector::from_slice(&[1.0, 1.0]);
    /// let w = a.matvec(&v).unwrap();
    /// assert_eq!(w.as_slice(), &[3.0, 7.0]);
    /// ```
    pub fn matvec(&self, v: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        if v.len() != self.ncols {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.ncols, 1),
                got: (v.len(), 1),
            });
        }
        let mut out = vec![T::zero(); self.nrows];
        for (j, &vj) in v.as_slice().iter().enumerate() {
            for (o, &a_ij) in out.iter_mut().zip(self.col_slice(j)) {
                *o = *o + a_ij * vj;
            }
        }
        Ok(Vector::from_vec(out))
    }

    /// Transpose, as a new matrix.
    ///
    /// ```
    /// use densela::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let at = a.transpose();
    /// assert_eq!(at.shape(), (3, 2));
    /// assert_eq!(at[(2, 1)], 6.0);
    /// ```
    pub fn transpose(&self) -> Self {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Divide every element by `k`.
    ///
    /// Fails with `DivisionByZero` when `k ≈ 0` under the default tolerance.
    ///
    /// ```
    /// use densela::{LinalgError, Matrix};
    /// let a = Matrix::from_rows(1, 2, &[2.0, 4.0]);
    /// assert_eq!(a.div_scalar(2.0).unwrap()[(0, 1)], 2.0);
    /// assert_eq!(a.div_scalar(0.0).unwrap_err(), LinalgError::DivisionByZero);
    /// ```
    pub fn div_scalar(&self, k: T) -> Result<Self, LinalgError> {
        if Tolerance::default().is_zero(k) {
            return Err(LinalgError::DivisionByZero);
        }
        Ok(self.scale(T::one() / k))
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar> Neg for Matrix<T> {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

impl<T: Scalar> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        let data = self.data.iter().map(|&x| T::zero() - x).collect();
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        let c = a.add(&b).unwrap();
        assert_eq!(c, Matrix::from_rows(2, 2, &[6.0, 8.0, 10.0, 12.0]));
        let d = c.sub(&b).unwrap();
        assert_eq!(d, a);
    }

    #[test]
    fn add_dim_mismatch() {
        let a = Matrix::<f64>::zeros(2, 3);
        let b = Matrix::<f64>::zeros(3, 2);
        assert_eq!(
            a.add(&b).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: (2, 3),
                got: (3, 2)
            }
        );
        assert!(a.sub(&b).is_err());
    }

    #[test]
    fn neg() {
        let a = Matrix::from_rows(1, 2, &[1.0, -2.0]);
        assert_eq!(-&a, Matrix::from_rows(1, 2, &[-1.0, 2.0]));
        assert_eq!(-a, Matrix::from_rows(1, 2, &[-1.0, 2.0]));
    }

    #[test]
    fn matrix_multiply() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        let c = a.matmul(&b).unwrap();
        assert_eq!(c, Matrix::from_rows(2, 2, &[19.0, 22.0, 43.0, 50.0]));
    }

    #[test]
    fn matrix_multiply_non_square() {
        let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::from_rows(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.shape(), (2, 2));
        assert_eq!(c, Matrix::from_rows(2, 2, &[58.0, 64.0, 139.0, 154.0]));
    }

    #[test]
    fn multiply_dim_mismatch() {
        let a = Matrix::<f64>::zeros(2, 3);
        assert!(matches!(
            a.matmul(&Matrix::zeros(2, 3)),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn identity_multiply() {
        let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let left = Matrix::eye(2).matmul(&a).unwrap();
        let right = a.matmul(&Matrix::eye(3)).unwrap();
        assert_eq!(left, a);
        assert_eq!(right, a);
    }

    #[test]
    fn matvec() {
        let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let v = Vector::from_slice(&[1.0, 0.0, 2.0]);
        let w = a.matvec(&v).unwrap();
        assert_eq!(w.as_slice(), &[7.0, 16.0]);
        assert!(w.is_column());
        assert!(a.matvec(&Vector::from_slice(&[1.0, 2.0])).is_err());
    }

    #[test]
    fn scale_and_divide() {
        let a = Matrix::from_rows(1, 3, &[1.0, 2.0, 3.0]);
        assert_eq!(a.scale(2.0), Matrix::from_rows(1, 3, &[2.0, 4.0, 6.0]));
        assert_eq!(
            a.div_scalar(4.0).unwrap(),
            Matrix::from_rows(1, 3, &[0.25, 0.5, 0.75])
        );
        assert_eq!(
            a.div_scalar(1e-12).unwrap_err(),
            LinalgError::DivisionByZero
        );
    }

    #[test]
    fn transpose_twice() {
        let a = Matrix::from_fn(3, 5, |i, j| (i * 5 + j) as f64);
        let at = a.transpose();
        assert_eq!(at.shape(), (5, 3));
        assert_eq!(at.transpose(), a);
    }

    #[test]
    fn operands_untouched() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let before = a.clone();
        let _ = a.add(&a).unwrap();
        let _ = a.matmul(&a).unwrap();
        let _ = a.transpose();
        assert_eq!(a, before);
    }
}
