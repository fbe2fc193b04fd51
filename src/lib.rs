//! # densela
//!
//! Dense real linear algebra built around Jacobi rotations and Gram-Schmidt
//! orthogonalization. Small, heap-allocated, column-major matrices with
//! checked arithmetic, plus three decompositions and the solvers built on them.
//!
//! ## Quick start
//!
//! ```
//! use densela::{Matrix, Tolerance, Vector};
//!
//! // Solve a linear system Ax = b
//! let a = Matrix::from_rows(3, 3, &[
//!     2.0_f64, 1.0, -1.0,
//!     -3.0, -1.0, 2.0,
//!     -2.0, 1.0, 2.0,
//! ]);
//! let b = Vector::from_slice(&[8.0, -11.0, -3.0]);
//! let x = a.qr().unwrap().solve(&b).unwrap(); // x = [2, 3, -1]
//! assert!(x.approx_eq(&Vector::from_slice(&[2.0, 3.0, -1.0]), Tolerance::default()));
//!
//! // Rank of a matrix with a repeated column
//! let r = Matrix::from_rows(3, 2, &[1.0_f64, 1.0, 2.0, 2.0, 3.0, 3.0]);
//! assert_eq!(r.svd().unwrap().rank(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — `Matrix<T>` with runtime dimensions and `Vec<T>` column-major
//!   storage. Arithmetic is exposed as named methods (`add`, `sub`, `scale`,
//!   `matmul`, `matvec`) that check shapes and return
//!   [`LinalgError::DimensionMismatch`] before touching any data. [`Vector<T>`]
//!   wraps a one-row or one-column matrix.
//!
//! - [`linalg`] — Decompositions, each a struct built with `new()`:
//!   - [`QrGs`] — modified Gram-Schmidt QR with `solve()`, `det()`,
//!     `inverse()` and `pseudo_inverse()`
//!   - [`JacobiEigen`] — cyclic Jacobi eigendecomposition of symmetric matrices
//!   - [`JacobiSvd`] — one-sided Jacobi SVD with pseudo-inverse, least squares,
//!     rank and low-rank approximation
//!   - [`least_squares_fit`] — weighted linear least-squares fitting with
//!     coefficient covariance
//!
//! - [`tolerance`] — The absolute-or-relative comparison rule ([`approx`])
//!   and the scale-free negligibility test used for rank decisions.
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats (`Scalar + Float`), used by norms and decompositions
//!
//! ## Logging
//!
//! The Jacobi solvers report through the [`log`](https://docs.rs/log) facade:
//! `trace!` per sweep, `debug!` on convergence and `warn!` when the sweep cap
//! is hit. Install any `log` backend to see them.

pub mod linalg;
pub mod matrix;
pub mod tolerance;
pub mod traits;

pub use linalg::{
    least_squares_fit, JacobiEigen, JacobiSettings, JacobiSvd, LeastSquaresFit, LinalgError,
    QrGs,
};
pub use matrix::aliases::{Matrixf32, Matrixf64, Vectorf32, Vectorf64};
pub use matrix::{Matrix, Vector};
pub use tolerance::{approx, Tolerance};
pub use traits::{FloatScalar, Scalar};
