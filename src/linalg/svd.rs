use core::cmp::Ordering;

use crate::linalg::jacobi::{rotate_cols, rotate_slices, rotation_angle, run_sweeps, JacobiSettings};
use crate::linalg::LinalgError;
use crate::matrix::vector::{dot_slices, Vector};
use crate::tolerance::Tolerance;
use crate::traits::FloatScalar;
use crate::Matrix;

/// Whether columns `p` and `q` with Gram entries `app`, `apq`, `aqq` are
/// already orthogonal enough to skip: `|apq| <= ‖Up‖·‖Uq‖ · rel`, i.e. the
/// cosine of the angle between them is below `rel`.
///
/// The norms are taken separately so tiny columns do not underflow.
#[inline]
fn columns_orthogonal<T: FloatScalar>(app: T, apq: T, aqq: T, tol: Tolerance<T>) -> bool {
    tol.is_negligible(apq, app.sqrt() * aqq.sqrt())
}

/// Singular value decomposition by one-sided Jacobi rotations: `A = U · diag(S) · Vᵗ`.
///
/// For an `m × n` input with `m >= n`, `U` is `m × n` with orthonormal (or
/// zero) columns, `S` holds `n` non-negative singular values and `V` is an
/// `n × n` orthogonal matrix. Singular values are not sorted; column `i` of
/// `U` and `V` pairs with `S[i]`.
///
/// Rotations are applied to the columns of a working copy of `A` until every
/// pair is orthogonal. The column norms then become the singular values, and
/// a column whose norm is negligible next to the largest one is left as a
/// zero column with singular value 0. Both tests are relative, so the
/// decomposition behaves the same for `A` and `k·A`.
///
/// ```
/// use densela::{JacobiSvd, Matrix, Tolerance};
///
/// let a = Matrix::from_rows(3, 2, &[
///     3.0_f64, 0.0,
///     4.0, 5.0,
///     0.0, 0.0,
/// ]);
/// let svd = JacobiSvd::new(&a).unwrap();
/// let mut s = svd.singular_values().as_slice().to_vec();
/// s.sort_by(|a, b| b.partial_cmp(a).unwrap());
/// assert!((s[0] - 45.0_f64.sqrt()).abs() < 1e-10);
/// assert!((s[1] - 5.0_f64.sqrt()).abs() < 1e-10);
/// assert!(svd.reconstruct().approx_eq(&a, Tolerance::default()));
/// ```
#[derive(Debug, Clone)]
pub struct JacobiSvd<T> {
    u: Matrix<T>,
    singular_values: Vector<T>,
    v: Matrix<T>,
    sweeps: usize,
    tol: Tolerance<T>,
}

impl<T: FloatScalar> JacobiSvd<T> {
    /// Decompose with [`JacobiSettings::svd`].
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        Self::with_settings(a, &JacobiSettings::svd())
    }

    /// Decompose with explicit settings.
    ///
    /// Fails with `InvalidShape` when `a` has more columns than rows (transpose
    /// first), and with `NonConvergence` when `settings.max_sweeps` is
    /// exhausted.
    pub fn with_settings(a: &Matrix<T>, settings: &JacobiSettings<T>) -> Result<Self, LinalgError> {
        let (m, n) = a.shape();
        if m < n {
            return Err(LinalgError::InvalidShape { rows: m, cols: n });
        }

        let tol = settings.tol;
        let mut u = a.clone();
        let mut v = Matrix::eye(n);

        let sweeps = run_sweeps("jacobi svd", settings.max_sweeps, || {
            let mut rotations = 0;
            for p in 0..n {
                for q in (p + 1)..n {
                    let (up, uq) = u.two_cols_mut(p, q);
                    let app = dot_slices(up, up);
                    let aqq = dot_slices(uq, uq);
                    let apq = dot_slices(up, uq);
                    if columns_orthogonal(app, apq, aqq, tol) {
                        continue;
                    }

                    let (c, s) = rotation_angle(app, apq, aqq);
                    rotate_slices(up, uq, c, s);
                    rotate_cols(&mut v, p, q, c, s);
                    rotations += 1;
                }
            }
            rotations
        })?;

        let norms: Vec<T> = (0..n)
            .map(|j| dot_slices(u.col_slice(j), u.col_slice(j)).sqrt())
            .collect();
        let max_norm = norms.iter().fold(T::zero(), |acc, &x| acc.max(x));

        let mut singular_values = Vector::zeros(n);
        for (j, &norm) in norms.iter().enumerate() {
            let col = u.col_slice_mut(j);
            if tol.is_negligible(norm, max_norm) {
                col.fill(T::zero());
                continue;
            }
            let inv = T::one() / norm;
            col.iter_mut().for_each(|x| *x = *x * inv);
            singular_values[j] = norm;
        }

        Ok(Self {
            u,
            singular_values,
            v,
            sweeps,
            tol,
        })
    }

    /// The singular values `S`, unsorted.
    #[inline]
    pub fn singular_values(&self) -> &Vector<T> {
        &self.singular_values
    }

    /// The left singular vectors `U` (`m × n`).
    #[inline]
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// The right singular vectors `V` (`n × n`). Columns of `V` are the right
    /// singular vectors.
    #[inline]
    pub fn v(&self) -> &Matrix<T> {
        &self.v
    }

    /// Number of sweeps performed, including the final one without rotations.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// `U · diag(S) · Vᵗ`, the `m × n` product of the factors.
    pub fn reconstruct(&self) -> Matrix<T> {
        let (m, n) = self.u.shape();
        let mut out = Matrix::zeros(m, n);
        for k in 0..n {
            self.add_triplet(&mut out, k);
        }
        out
    }

    /// Numerical rank: singular values not ≈ 0 under the default tolerance.
    pub fn rank(&self) -> usize {
        self.rank_with(Tolerance::default())
    }

    /// Numerical rank with an explicit tolerance.
    pub fn rank_with(&self, tol: Tolerance<T>) -> usize {
        self.singular_values
            .as_slice()
            .iter()
            .filter(|&&s| !tol.is_zero(s))
            .count()
    }

    /// Condition number: `σ_max / σ_min`.
    ///
    /// Returns infinity if the smallest singular value is zero.
    pub fn condition_number(&self) -> T {
        let s = self.singular_values.as_slice();
        if s.is_empty() {
            return T::one();
        }
        let s_max = s.iter().fold(T::zero(), |acc, &x| acc.max(x));
        let s_min = s.iter().fold(T::infinity(), |acc, &x| acc.min(x));
        if s_min == T::zero() {
            T::infinity()
        } else {
            s_max / s_min
        }
    }

    /// Moore-Penrose pseudo-inverse `V · diag(1/S) · Uᵗ` (`n × m`).
    ///
    /// Singular values negligible next to the largest one, under the
    /// tolerance the decomposition ran with, contribute nothing instead of
    /// their reciprocal.
    ///
    /// ```
    /// use densela::{JacobiSvd, Matrix, Tolerance};
    ///
    /// let a = Matrix::from_rows(3, 2, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let pinv = JacobiSvd::new(&a).unwrap().pseudo_inverse();
    /// let back = a.matmul(&pinv).unwrap().matmul(&a).unwrap();
    /// assert!(back.approx_eq(&a, Tolerance::default()));
    /// ```
    pub fn pseudo_inverse(&self) -> Matrix<T> {
        let (m, n) = self.u.shape();
        let s_max = self
            .singular_values
            .as_slice()
            .iter()
            .fold(T::zero(), |acc, &x| acc.max(x));
        let mut out = Matrix::zeros(n, m);
        for k in 0..n {
            let s = self.singular_values[k];
            if self.tol.is_negligible(s, s_max) {
                continue;
            }
            let inv = T::one() / s;
            for j in 0..m {
                let ujk = self.u[(j, k)] * inv;
                for i in 0..n {
                    out[(i, j)] = out[(i, j)] + self.v[(i, k)] * ujk;
                }
            }
        }
        out
    }

    /// Least-squares solution of an overdetermined system: `A⁺ · b`.
    ///
    /// Fails with `NotOverdetermined` unless `rows > cols`, and with
    /// `DimensionMismatch` unless `b.len() == rows`.
    ///
    /// ```
    /// use densela::{JacobiSvd, Matrix, Vector};
    ///
    /// // y = 1 + 2t sampled at t = 0, 1, 2
    /// let a = Matrix::from_rows(3, 2, &[1.0_f64, 0.0, 1.0, 1.0, 1.0, 2.0]);
    /// let b = Vector::from_slice(&[1.0, 3.0, 5.0]);
    /// let x = JacobiSvd::new(&a).unwrap().least_squares(&b).unwrap();
    /// assert!((x[0] - 1.0).abs() < 1e-10);
    /// assert!((x[1] - 2.0).abs() < 1e-10);
    /// ```
    pub fn least_squares(&self, b: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        let (m, n) = self.u.shape();
        if m <= n {
            return Err(LinalgError::NotOverdetermined { rows: m, cols: n });
        }
        if b.len() != m {
            return Err(LinalgError::DimensionMismatch {
                expected: (m, 1),
                got: (b.len(), 1),
            });
        }
        self.pseudo_inverse().matvec(b)
    }

    /// Best rank-`r` approximation: the sum of the `r` largest singular
    /// triplets `S[k] · U[k] · V[k]ᵗ`.
    ///
    /// Equal singular values are taken in index order. Fails with
    /// `InvalidRank` when `r` exceeds [`rank`](Self::rank).
    pub fn lower_rank_approx(&self, r: usize) -> Result<Matrix<T>, LinalgError> {
        let rank = self.rank();
        if r > rank {
            return Err(LinalgError::InvalidRank { requested: r, rank });
        }

        let s = self.singular_values.as_slice();
        let mut order: Vec<usize> = (0..s.len()).collect();
        // Stable sort keeps the lower index first among ties
        order.sort_by(|&a, &b| s[b].partial_cmp(&s[a]).unwrap_or(Ordering::Equal));

        let mut out = Matrix::zeros(self.u.nrows(), self.v.nrows());
        for &k in order.iter().take(r) {
            self.add_triplet(&mut out, k);
        }
        Ok(out)
    }

    /// `out += S[k] · U[k] · V[k]ᵗ`
    fn add_triplet(&self, out: &mut Matrix<T>, k: usize) {
        let s = self.singular_values[k];
        for j in 0..out.ncols() {
            let w = s * self.v[(j, k)];
            for i in 0..out.nrows() {
                out[(i, j)] = out[(i, j)] + self.u[(i, k)] * w;
            }
        }
    }
}

/// Convenience method for SVD on tall or square matrices.
impl<T: FloatScalar> Matrix<T> {
    /// One-sided Jacobi SVD. Requires `rows >= cols`.
    ///
    /// ```
    /// use densela::Matrix;
    ///
    /// let a = Matrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, 4.0]);
    /// let svd = a.svd().unwrap();
    /// assert_eq!(svd.rank(), 2);
    /// ```
    pub fn svd(&self) -> Result<JacobiSvd<T>, LinalgError> {
        JacobiSvd::new(self)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
