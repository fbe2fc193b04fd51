use crate::tolerance::{approx, Tolerance};
use crate::traits::{FloatScalar, Scalar};

use super::vector::Vector;
use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Sum of diagonal elements.
    ///
    /// ```
    /// use densela::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        let n = self.nrows.min(self.ncols);
        (0..n).fold(T::zero(), |acc, i| acc + self[(i, i)])
    }

    /// Extract the main diagonal as a column vector.
    ///
    /// ```
    /// use densela::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.diag().as_slice(), &[1.0, 4.0]);
    /// ```
    pub fn diag(&self) -> Vector<T> {
        let n = self.nrows.min(self.ncols);
        Vector::from_vec((0..n).map(|i| self[(i, i)]).collect())
    }

    /// Create a square diagonal matrix from a vector.
    ///
    /// ```
    /// use densela::{Matrix, Vector};
    /// let v = Vector::from_slice(&[2.0, 3.0]);
    /// let m = Matrix::from_diag(&v);
    /// assert_eq!(m[(0, 0)], 2.0);
    /// assert_eq!(m[(1, 1)], 3.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_diag(v: &Vector<T>) -> Self {
        let n = v.len();
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = v[i];
        }
        m
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Whether the matrix is square and `A ≈ Aᵗ` element-wise under `tol`.
    ///
    /// ```
    /// use densela::{Matrix, Tolerance};
    /// let sym = Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0 + 1e-12, 3.0]);
    /// assert!(sym.is_symmetric(Tolerance::default()));
    /// ```
    pub fn is_symmetric(&self, tol: Tolerance<T>) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in (i + 1)..n {
                if !approx(self[(i, j)], self[(j, i)], tol) {
                    return false;
                }
            }
        }
        true
    }
}
