use crate::linalg::{LinalgError, QrGs};
use crate::matrix::vector::Vector;
use crate::tolerance::Tolerance;
use crate::traits::FloatScalar;
use crate::Matrix;

/// Result of a weighted linear least-squares fit.
///
/// The model is `F(x) = Σ c[k] · f_k(x)` over a fixed set of basis functions.
#[derive(Debug, Clone)]
pub struct LeastSquaresFit<T> {
    coefficients: Vector<T>,
    covariance: Matrix<T>,
}

impl<T: FloatScalar> LeastSquaresFit<T> {
    /// Fitted coefficients `c`, one per basis function.
    pub fn coefficients(&self) -> &Vector<T> {
        &self.coefficients
    }

    /// Covariance matrix of the coefficients, `(AᵗA)⁻¹`.
    pub fn covariance(&self) -> &Matrix<T> {
        &self.covariance
    }

    /// One-sigma uncertainty of each coefficient, `sqrt(Σ[k][k])`.
    pub fn uncertainties(&self) -> Vector<T> {
        self.covariance.diag().apply(|x| x.sqrt())
    }

    /// Evaluate the fitted model at `x`.
    ///
    /// `functions` must be the basis the fit was made with.
    pub fn eval<F: Fn(T) -> T>(&self, functions: &[F], x: T) -> Result<T, LinalgError> {
        let m = self.coefficients.len();
        if functions.len() != m {
            return Err(LinalgError::DimensionMismatch {
                expected: (m, 1),
                got: (functions.len(), 1),
            });
        }
        Ok(functions
            .iter()
            .zip(self.coefficients.as_slice())
            .fold(T::zero(), |acc, (f, &c)| acc + c * f(x)))
    }
}

/// Fit `y ± dy` sampled at `x` to a linear combination of `functions`.
///
/// Each row of the design matrix is `f_k(x[i]) / dy[i]` and the right-hand
/// side is `y[i] / dy[i]`; the system is solved with [`QrGs`] and the
/// covariance is `A⁺ · A⁺ᵗ`.
///
/// Fails with `DimensionMismatch` if `x`, `y` and `dy` differ in length,
/// `DivisionByZero` if any `dy[i]` is ≈ 0, `InvalidShape` if there are fewer
/// points than functions and `Singular` if the basis is degenerate on `x`.
///
/// ```
/// use densela::{least_squares_fit, Vector};
///
/// let x = Vector::from_slice(&[0.0_f64, 1.0, 2.0, 3.0]);
/// let y = Vector::from_slice(&[1.0, 3.0, 5.0, 7.0]);
/// let dy = Vector::from_slice(&[1.0, 1.0, 1.0, 1.0]);
/// let basis: [&dyn Fn(f64) -> f64; 2] = [&|_| 1.0, &|t| t];
///
/// let fit = least_squares_fit(&basis, &x, &y, &dy).unwrap();
/// assert!((fit.coefficients()[0] - 1.0).abs() < 1e-12);
/// assert!((fit.coefficients()[1] - 2.0).abs() < 1e-12);
/// assert!((fit.eval(&basis, 4.0).unwrap() - 9.0).abs() < 1e-12);
/// ```
pub fn least_squares_fit<T: FloatScalar, F: Fn(T) -> T>(
    functions: &[F],
    x: &Vector<T>,
    y: &Vector<T>,
    dy: &Vector<T>,
) -> Result<LeastSquaresFit<T>, LinalgError> {
    let n = x.len();
    for v in [y, dy] {
        if v.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: (n, 1),
                got: (v.len(), 1),
            });
        }
    }
    let zero_tol = Tolerance::default();
    if dy.as_slice().iter().any(|&e| zero_tol.is_zero(e)) {
        return Err(LinalgError::DivisionByZero);
    }

    let m = functions.len();
    let a = Matrix::from_fn(n, m, |i, k| functions[k](x[i]) / dy[i]);
    let b = Vector::from_vec((0..n).map(|i| y[i] / dy[i]).collect());

    let qr = QrGs::new(&a)?;
    let coefficients = qr.solve(&b)?;
    let pinv = qr.pseudo_inverse()?;
    let covariance = pinv.matmul(&pinv.transpose())?;

    Ok(LeastSquaresFit {
        coefficients,
        covariance,
    })
}
