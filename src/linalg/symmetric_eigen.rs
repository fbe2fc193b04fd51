use crate::linalg::jacobi::{rotate_cols, rotate_rows, rotation_angle, run_sweeps, JacobiSettings};
use crate::linalg::LinalgError;
use crate::matrix::vector::Vector;
use crate::tolerance::Tolerance;
use crate::traits::FloatScalar;
use crate::Matrix;

/// Eigendecomposition of a real symmetric matrix by cyclic Jacobi rotations.
///
/// Produces eigenvalues `w` and orthonormal eigenvectors (the columns of
/// `V`) with `A · V ≈ V · diag(w)`. Eigenvalues come out in whatever order
/// the rotations leave them; column `i` of `V` pairs with `w[i]`.
///
/// Each sweep visits every pair `p < q` and rotates only when the rotation
/// would change `A[p][p]` or `A[q][q]` beyond the settings tolerance, so
/// convergence is judged on the diagonal rather than on the off-diagonal
/// mass. Eigenvalues are therefore accurate to about the tolerance, while
/// off-diagonal residue, and with it `A · V − V · diag(w)`, is only bounded
/// by roughly `sqrt(tol · gap)` for an eigenvalue gap `gap`.
#[derive(Debug, Clone)]
pub struct JacobiEigen<T> {
    eigenvalues: Vector<T>,
    eigenvectors: Matrix<T>,
    sweeps: usize,
}

impl<T: FloatScalar> JacobiEigen<T> {
    /// Decompose with [`JacobiSettings::eigen`].
    ///
    /// ```
    /// use densela::{JacobiEigen, Matrix};
    ///
    /// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
    /// let eig = JacobiEigen::new(&a).unwrap();
    /// let mut w = eig.eigenvalues().as_slice().to_vec();
    /// w.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert!((w[0] - 1.0).abs() < 1e-10);
    /// assert!((w[1] - 3.0).abs() < 1e-10);
    /// ```
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        Self::with_settings(a, &JacobiSettings::eigen())
    }

    /// Decompose with explicit settings.
    ///
    /// Fails with `NotSymmetric` unless `a` is square and symmetric under the
    /// default tolerance, and with `NonConvergence` when
    /// `settings.max_sweeps` is exhausted.
    pub fn with_settings(a: &Matrix<T>, settings: &JacobiSettings<T>) -> Result<Self, LinalgError> {
        if !a.is_symmetric(Tolerance::default()) {
            return Err(LinalgError::NotSymmetric);
        }

        let n = a.nrows();
        let tol = settings.tol;
        let mut work = a.clone();
        let mut v = Matrix::eye(n);
        let two = T::one() + T::one();

        let sweeps = run_sweeps("jacobi eigen", settings.max_sweeps, || {
            let mut rotations = 0;
            for p in 0..n {
                for q in (p + 1)..n {
                    let app = work[(p, p)];
                    let aqq = work[(q, q)];
                    let apq = work[(p, q)];
                    let (c, s) = rotation_angle(app, apq, aqq);

                    let app_new = c * c * app - two * s * c * apq + s * s * aqq;
                    let aqq_new = s * s * app + two * s * c * apq + c * c * aqq;
                    if tol.approx(app_new, app) && tol.approx(aqq_new, aqq) {
                        continue;
                    }

                    rotate_cols(&mut work, p, q, c, s);
                    rotate_rows(&mut work, p, q, c, s);
                    rotate_cols(&mut v, p, q, c, s);
                    rotations += 1;
                }
            }
            rotations
        })?;

        Ok(Self {
            eigenvalues: work.diag(),
            eigenvectors: v,
            sweeps,
        })
    }

    /// Eigenvalues `w`, unsorted.
    pub fn eigenvalues(&self) -> &Vector<T> {
        &self.eigenvalues
    }

    /// Orthogonal matrix `V` whose column `i` is the eigenvector for `w[i]`.
    pub fn eigenvectors(&self) -> &Matrix<T> {
        &self.eigenvectors
    }

    /// Number of sweeps performed, including the final one without rotations.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Consume the decomposition, returning `(w, V)`.
    pub fn into_parts(self) -> (Vector<T>, Matrix<T>) {
        (self.eigenvalues, self.eigenvectors)
    }
}

/// Convenience method for the symmetric eigendecomposition.
impl<T: FloatScalar> Matrix<T> {
    /// Jacobi eigendecomposition of a symmetric matrix.
    ///
    /// ```
    /// use densela::Matrix;
    ///
    /// let a = Matrix::from_rows(2, 2, &[4.0_f64, 0.0, 0.0, 9.0]);
    /// let eig = a.eig_symmetric().unwrap();
    /// assert_eq!(eig.eigenvalues().len(), 2);
    /// ```
    pub fn eig_symmetric(&self) -> Result<JacobiEigen<T>, LinalgError> {
        JacobiEigen::new(self)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
