use log::debug;

use crate::linalg::LinalgError;
use crate::matrix::vector::{dot_slices, Vector};
use crate::tolerance::Tolerance;
use crate::traits::FloatScalar;
use crate::Matrix;

/// QR decomposition by modified Gram-Schmidt: `A = Q · R`.
///
/// For an `m × n` input with `m >= n`, `Q` is `m × n` with orthonormal
/// columns and `R` is `n × n` upper triangular. A column that is linearly
/// dependent on the ones before it leaves a zero column in `Q` and a zero
/// on the diagonal of `R`, so `A = Q · R` still holds but [`solve`](Self::solve)
/// reports [`LinalgError::Singular`].
///
/// ```
/// use densela::{Matrix, QrGs, Tolerance};
///
/// let a = Matrix::from_rows(3, 2, &[
///     1.0_f64, 0.0,
///     0.0, 1.0,
///     0.0, 0.0,
/// ]);
/// let qr = QrGs::new(&a).unwrap();
/// assert!(qr.q().approx_eq(&a, Tolerance::default()));
/// assert!(qr.r().approx_eq(&Matrix::eye(2), Tolerance::default()));
/// ```
#[derive(Debug, Clone)]
pub struct QrGs<T> {
    q: Matrix<T>,
    r: Matrix<T>,
}

impl<T: FloatScalar> QrGs<T> {
    /// Decompose `a` with the default dependence tolerance.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        Self::with_tolerance(a, Tolerance::default())
    }

    /// Decompose `a` with an explicit dependence tolerance.
    ///
    /// Column `i` counts as dependent when what is left of it after removing
    /// the earlier directions is negligible next to its original norm
    /// (`‖residual‖ <= ‖A[i]‖ · tol.rel`). The test is independent of the
    /// overall scale of `a`.
    ///
    /// Fails with `InvalidShape` when `a` has more columns than rows.
    pub fn with_tolerance(a: &Matrix<T>, tol: Tolerance<T>) -> Result<Self, LinalgError> {
        let (m, n) = a.shape();
        if m < n {
            return Err(LinalgError::InvalidShape { rows: m, cols: n });
        }

        let col_norms: Vec<T> = (0..n)
            .map(|j| dot_slices(a.col_slice(j), a.col_slice(j)).sqrt())
            .collect();
        let mut q = a.clone();
        let mut r = Matrix::zeros(n, n);

        for i in 0..n {
            let norm = dot_slices(q.col_slice(i), q.col_slice(i)).sqrt();
            if tol.is_negligible(norm, col_norms[i]) {
                debug!("qr: column {i} is linearly dependent (norm {norm:?})");
                q.col_slice_mut(i).fill(T::zero());
                continue;
            }
            r[(i, i)] = norm;
            let inv = T::one() / norm;
            q.col_slice_mut(i).iter_mut().for_each(|x| *x = *x * inv);

            // Remove the new direction from every later column
            for j in (i + 1)..n {
                let (qi, qj) = q.two_cols_mut(i, j);
                let rij = dot_slices(qi, qj);
                r[(i, j)] = rij;
                for (x, &u) in qj.iter_mut().zip(qi.iter()) {
                    *x = *x - rij * u;
                }
            }
        }

        Ok(Self { q, r })
    }

    /// The `m × n` factor with orthonormal (or zero) columns.
    pub fn q(&self) -> &Matrix<T> {
        &self.q
    }

    /// The `n × n` upper-triangular factor.
    pub fn r(&self) -> &Matrix<T> {
        &self.r
    }

    /// Whether the decomposed matrix was square.
    pub fn is_square(&self) -> bool {
        self.q.is_square()
    }

    /// Solve `A x = b` in the least-squares sense via back-substitution on
    /// `R x = Qᵗ b`.
    ///
    /// For a square, full-rank `A` this is the exact solution.
    ///
    /// ```
    /// use densela::{Matrix, QrGs, Vector};
    ///
    /// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]);
    /// let qr = QrGs::new(&a).unwrap();
    /// let x = qr.solve(&Vector::from_slice(&[3.0, 5.0])).unwrap();
    /// assert!((x[0] - 0.8).abs() < 1e-12);
    /// assert!((x[1] - 1.4).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        let (m, n) = self.q.shape();
        if b.len() != m {
            return Err(LinalgError::DimensionMismatch {
                expected: (m, 1),
                got: (b.len(), 1),
            });
        }
        if (0..n).any(|i| self.r[(i, i)] == T::zero()) {
            return Err(LinalgError::Singular);
        }

        // y = Qᵗ b
        let mut x: Vec<T> = (0..n)
            .map(|j| dot_slices(self.q.col_slice(j), b.as_slice()))
            .collect();

        for i in (0..n).rev() {
            let mut sum = x[i];
            for k in (i + 1)..n {
                sum = sum - self.r[(i, k)] * x[k];
            }
            x[i] = sum / self.r[(i, i)];
        }
        Ok(Vector::from_vec(x))
    }

    /// Determinant of a square input, up to sign: `∏ R[i][i]`.
    ///
    /// Modified Gram-Schmidt keeps every `R[i][i] >= 0`, so the sign of the
    /// true determinant is carried by `det(Q) = ±1` and is lost here.
    pub fn det(&self) -> Result<T, LinalgError> {
        if !self.is_square() {
            let (rows, cols) = self.q.shape();
            return Err(LinalgError::NotSquare { rows, cols });
        }
        let n = self.r.nrows();
        Ok((0..n).fold(T::one(), |acc, i| acc * self.r[(i, i)]))
    }

    /// Inverse of a square input, solved column by column.
    ///
    /// Fails with `Singular` when the determinant is negligible next to the
    /// product of the column norms of `A`, its largest possible magnitude.
    pub fn inverse(&self) -> Result<Matrix<T>, LinalgError> {
        let det = self.det()?;
        let n = self.r.nrows();
        // ‖A[j]‖ = ‖R[j]‖ since Q has orthonormal or zero columns
        let bound = (0..n).fold(T::one(), |acc, j| {
            let rj = &self.r.col_slice(j)[..=j];
            acc * dot_slices(rj, rj).sqrt()
        });
        if Tolerance::default().is_negligible(det, bound) {
            return Err(LinalgError::Singular);
        }
        let cols = (0..n)
            .map(|i| self.solve(&Vector::basis(n, i)))
            .collect::<Result<Vec<_>, _>>()?;
        Matrix::from_columns(&cols)
    }

    /// Moore-Penrose pseudo-inverse `(AᵗA)⁻¹Aᵗ` of a full-column-rank input.
    ///
    /// Column `i` of the `n × m` result is the least-squares solution for the
    /// `i`-th basis vector of length `m`.
    ///
    /// ```
    /// use densela::{Matrix, QrGs, Tolerance};
    ///
    /// let a = Matrix::from_rows(3, 2, &[1.0_f64, 0.0, 0.0, 1.0, 0.0, 0.0]);
    /// let pinv = QrGs::new(&a).unwrap().pseudo_inverse().unwrap();
    /// assert_eq!(pinv.shape(), (2, 3));
    /// assert!(pinv.approx_eq(&a.transpose(), Tolerance::default()));
    /// ```
    pub fn pseudo_inverse(&self) -> Result<Matrix<T>, LinalgError> {
        let m = self.q.nrows();
        let cols = (0..m)
            .map(|i| self.solve(&Vector::basis(m, i)))
            .collect::<Result<Vec<_>, _>>()?;
        Matrix::from_columns(&cols)
    }
}

/// Convenience method for QR on tall or square matrices.
impl<T: FloatScalar> Matrix<T> {
    /// Modified Gram-Schmidt QR decomposition. Requires `rows >= cols`.
    ///
    /// ```
    /// use densela::{Matrix, Tolerance};
    ///
    /// let a = Matrix::from_rows(2, 2, &[3.0_f64, 1.0, 4.0, 2.0]);
    /// let qr = a.qr().unwrap();
    /// let back = qr.q().matmul(qr.r()).unwrap();
    /// assert!(back.approx_eq(&a, Tolerance::default()));
    /// ```
    pub fn qr(&self) -> Result<QrGs<T>, LinalgError> {
        QrGs::new(self)
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn assert_orthonormal_cols(q: &Matrix<f64>) {
        let qtq = q.transpose().matmul(q).unwrap();
        let n = q.ncols();
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(qtq[(i, j)], expected, TOL, &format!("QᵗQ[({},{})]", i, j));
            }
        }
    }

    #[test]
    fn square_3x3() {
        let a = Matrix::from_rows(3, 3, &[12.0, -51.0, 4.0, 6.0, 167.0, -68.0, -4.0, 24.0, -41.0]);
        let qr = a.qr().unwrap();
        assert!(qr.is_square());
        assert_orthonormal_cols(qr.q());

        let r = qr.r();
        for i in 0..3 {
            assert!(r[(i, i)] >= 0.0, "R[{i}][{i}] negative");
            for j in 0..i {
                assert_eq!(r[(i, j)], 0.0, "R[({},{})] below diagonal", i, j);
            }
        }
        assert_near(r[(0, 0)], 14.0, TOL, "R[0][0]");

        let back = qr.q().matmul(r).unwrap();
        assert!(back.approx_eq(&a, Tolerance::uniform(TOL)));
    }

    #[test]
    fn tall_4x2() {
        let a = Matrix::from_rows(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let qr = a.qr().unwrap();
        assert!(!qr.is_square());
        assert_eq!(qr.q().shape(), (4, 2));
        assert_eq!(qr.r().shape(), (2, 2));
        assert_orthonormal_cols(qr.q());
        let back = qr.q().matmul(qr.r()).unwrap();
        assert!(back.approx_eq(&a, Tolerance::uniform(TOL)));
    }

    #[test]
    fn wide_rejected() {
        let a = Matrix::<f64>::zeros(2, 3);
        assert_eq!(
            QrGs::new(&a).unwrap_err(),
            LinalgError::InvalidShape { rows: 2, cols: 3 }
        );
    }

    #[test]
    fn size_1x1() {
        let a = Matrix::from_rows(1, 1, &[5.0]);
        let qr = a.qr().unwrap();
        assert_eq!(qr.q()[(0, 0)], 1.0);
        assert_eq!(qr.r()[(0, 0)], 5.0);
        assert_eq!(qr.det().unwrap(), 5.0);
        let inv = qr.inverse().unwrap();
        assert_near(inv[(0, 0)], 0.2, TOL, "1/5");
    }

    #[test]
    fn size_1x1_negative() {
        let a = Matrix::from_rows(1, 1, &[-2.0]);
        let qr = a.qr().unwrap();
        assert_eq!(qr.q()[(0, 0)], -1.0);
        assert_eq!(qr.r()[(0, 0)], 2.0);
    }

    #[test]
    fn dependent_column() {
        // Second column is twice the first
        let a = Matrix::from_rows(3, 3, &[1.0, 2.0, 0.0, 1.0, 2.0, 1.0, 0.0, 0.0, 1.0]);
        let qr = a.qr().unwrap();
        assert_eq!(qr.r()[(1, 1)], 0.0);
        assert!(qr.q().col(1).as_slice().iter().all(|&x| x == 0.0));
        let back = qr.q().matmul(qr.r()).unwrap();
        assert!(back.approx_eq(&a, Tolerance::default()));

        let b = Vector::from_slice(&[1.0, 1.0, 1.0]);
        assert_eq!(qr.solve(&b).unwrap_err(), LinalgError::Singular);
        assert_eq!(qr.inverse().unwrap_err(), LinalgError::Singular);
    }

    #[test]
    fn solve_square() {
        let a = Matrix::from_rows(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let b = Vector::from_slice(&[8.0, -11.0, -3.0]);
        let x = a.qr().unwrap().solve(&b).unwrap();
        assert_near(x[0], 2.0, TOL, "x0");
        assert_near(x[1], 3.0, TOL, "x1");
        assert_near(x[2], -1.0, TOL, "x2");
    }

    #[test]
    fn solve_overdetermined_is_least_squares() {
        // Fit y = c0 + c1·t through (0,1), (1,3), (2,5), (3,7): exact line
        let a = Matrix::from_rows(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let b = Vector::from_slice(&[1.0, 3.0, 5.0, 7.0]);
        let x = a.qr().unwrap().solve(&b).unwrap();
        assert_near(x[0], 1.0, TOL, "intercept");
        assert_near(x[1], 2.0, TOL, "slope");
    }

    #[test]
    fn solve_wrong_length() {
        let qr = Matrix::<f64>::eye(3).qr().unwrap();
        let err = qr.solve(&Vector::from_slice(&[1.0, 2.0])).unwrap_err();
        assert_eq!(
            err,
            LinalgError::DimensionMismatch {
                expected: (3, 1),
                got: (2, 1)
            }
        );
    }

    #[test]
    fn det_is_unsigned() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_near(a.qr().unwrap().det().unwrap(), 2.0, TOL, "|det|");
    }

    #[test]
    fn det_requires_square() {
        let a = Matrix::from_rows(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(
            a.qr().unwrap().det().unwrap_err(),
            LinalgError::NotSquare { rows: 3, cols: 2 }
        );
        assert_eq!(
            a.qr().unwrap().inverse().unwrap_err(),
            LinalgError::NotSquare { rows: 3, cols: 2 }
        );
    }

    #[test]
    fn inverse_3x3() {
        let a = Matrix::from_rows(3, 3, &[4.0, 7.0, 2.0, 3.0, 6.0, 1.0, 2.0, 5.0, 3.0]);
        let inv = a.qr().unwrap().inverse().unwrap();
        let id = a.matmul(&inv).unwrap();
        assert!(id.approx_eq(&Matrix::eye(3), Tolerance::uniform(TOL)));
    }

    #[test]
    fn pseudo_inverse_tall() {
        let a = Matrix::from_rows(3, 2, &[1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let pinv = a.qr().unwrap().pseudo_inverse().unwrap();
        assert_eq!(pinv.shape(), (2, 3));
        // Left inverse
        let id = pinv.matmul(&a).unwrap();
        assert!(id.approx_eq(&Matrix::eye(2), Tolerance::uniform(TOL)));
        // Matches (AᵗA)⁻¹Aᵗ
        let ata = a.transpose().matmul(&a).unwrap();
        let expected = ata
            .qr()
            .unwrap()
            .inverse()
            .unwrap()
            .matmul(&a.transpose())
            .unwrap();
        assert!(pinv.approx_eq(&expected, Tolerance::uniform(TOL)));
    }

    #[test]
    fn pseudo_inverse_square_is_inverse() {
        let a = Matrix::from_rows(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let qr = a.qr().unwrap();
        let pinv = qr.pseudo_inverse().unwrap();
        assert!(pinv.approx_eq(&qr.inverse().unwrap(), Tolerance::uniform(TOL)));
    }

    #[test]
    fn custom_tolerance() {
        let a = Matrix::from_rows(2, 2, &[1.0, 1.0, 1.0, 1.0 + 1e-6]);
        let strict = QrGs::new(&a).unwrap();
        assert!(strict.r()[(1, 1)] > 0.0);
        let loose = QrGs::with_tolerance(&a, Tolerance::uniform(1e-3)).unwrap();
        assert_eq!(loose.r()[(1, 1)], 0.0);
    }

    #[test]
    fn scale_invariant() {
        let base = Matrix::from_rows(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        for scale in [1e-10, 1e10] {
            let a = base.scale(scale);
            let qr = a.qr().unwrap();
            assert_orthonormal_cols(qr.q());
            let back = qr.q().matmul(qr.r()).unwrap();
            assert!(back.approx_eq(&a, Tolerance::new(0.0, TOL)));

            let b = Vector::from_slice(&[3.0 * scale, 5.0 * scale]);
            let x = qr.solve(&b).unwrap();
            assert_near(x[0], 0.8, TOL, "x0");
            assert_near(x[1], 1.4, TOL, "x1");

            let id = a.matmul(&qr.inverse().unwrap()).unwrap();
            assert!(id.approx_eq(&Matrix::eye(2), Tolerance::uniform(TOL)));
        }
    }

    #[test]
    fn size_1x1_tiny() {
        let qr = Matrix::from_rows(1, 1, &[1e-10]).qr().unwrap();
        assert_near(qr.q()[(0, 0)], 1.0, TOL, "Q");
        assert_eq!(qr.r()[(0, 0)], 1e-10);
    }

    #[test]
    fn dependent_column_small_scale() {
        let a = Matrix::from_rows(3, 2, &[1e-12, 2e-12, 2e-12, 4e-12, 3e-12, 6e-12]);
        let qr = a.qr().unwrap();
        assert!(qr.r()[(0, 0)] > 0.0);
        assert_eq!(qr.r()[(1, 1)], 0.0);
    }

    #[test]
    fn f32_support() {
        let a = Matrix::from_rows(2, 2, &[4.0_f32, 3.0, 6.0, 3.0]);
        let qr = a.qr().unwrap();
        let back = qr.q().matmul(qr.r()).unwrap();
        assert!(back.approx_eq(&a, Tolerance::uniform(1e-5)));
    }
}
