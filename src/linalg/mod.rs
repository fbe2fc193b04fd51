pub(crate) mod jacobi;
pub(crate) mod least_squares;
pub(crate) mod qr;
pub(crate) mod svd;
pub(crate) mod symmetric_eigen;

pub use jacobi::{JacobiSettings, DEFAULT_MAX_SWEEPS};
pub use least_squares::{least_squares_fit, LeastSquaresFit};
pub use qr::QrGs;
pub use svd::JacobiSvd;
pub use symmetric_eigen::JacobiEigen;

use thiserror::Error;

/// Errors from matrix arithmetic and decompositions.
///
/// Every check runs before any computation, so an `Err` never comes with a
/// partially updated result.
///
/// ```
/// use densela::{LinalgError, Matrix};
///
/// let wide = Matrix::<f64>::zeros(2, 3);
/// assert_eq!(
///     wide.qr().unwrap_err(),
///     LinalgError::InvalidShape { rows: 2, cols: 3 }
/// );
///
/// let not_sym = Matrix::from_rows(2, 2, &[1.0_f64, 5.0, 0.0, 1.0]);
/// assert_eq!(not_sym.eig_symmetric().unwrap_err(), LinalgError::NotSymmetric);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinalgError {
    /// Operand shapes are incompatible for the requested operation.
    #[error("dimension mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, got.0, got.1)]
    DimensionMismatch {
        /// Shape the operation required.
        expected: (usize, usize),
        /// Shape it was given.
        got: (usize, usize),
    },
    /// Decomposition needs a tall or square input (`rows >= cols`).
    #[error("invalid shape {rows}x{cols}: decomposition requires rows >= cols")]
    InvalidShape { rows: usize, cols: usize },
    /// Eigendecomposition input is not symmetric.
    #[error("matrix is not symmetric")]
    NotSymmetric,
    /// Determinant or inverse requested for a non-square matrix.
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },
    /// Matrix is singular or nearly singular.
    #[error("matrix is singular")]
    Singular,
    /// Scalar division by (approximately) zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Jacobi sweeps hit the cap before a sweep applied zero rotations.
    #[error("no convergence after {sweeps} sweeps")]
    NonConvergence { sweeps: usize },
    /// Low-rank approximation asked for more terms than the matrix rank.
    #[error("requested rank {requested} exceeds matrix rank {rank}")]
    InvalidRank { requested: usize, rank: usize },
    /// Least squares needs strictly more rows than columns.
    #[error("system {rows}x{cols} is not overdetermined")]
    NotOverdetermined { rows: usize, cols: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = LinalgError::DimensionMismatch {
            expected: (2, 3),
            got: (3, 2),
        };
        assert_eq!(e.to_string(), "dimension mismatch: expected 2x3, got 3x2");
        assert_eq!(
            LinalgError::NonConvergence { sweeps: 7 }.to_string(),
            "no convergence after 7 sweeps"
        );
        assert_eq!(
            LinalgError::InvalidRank {
                requested: 3,
                rank: 2
            }
            .to_string(),
            "requested rank 3 exceeds matrix rank 2"
        );
    }

    #[test]
    fn is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&LinalgError::Singular);
    }
}
