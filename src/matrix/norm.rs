use crate::traits::{FloatScalar, Scalar};

use super::Matrix;

// ── Matrix norms ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Squared Frobenius norm (sum of all elements squared).
    pub fn frobenius_norm_squared(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc + x * x)
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Frobenius norm.
    ///
    /// ```
    /// use densela::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T {
        self.frobenius_norm_squared().sqrt()
    }
}
