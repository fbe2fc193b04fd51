//! Pre-defined type aliases for the floating-point element types.

use super::{Matrix, Vector};

/// Matrix with `f32` elements.
pub type Matrixf32 = Matrix<f32>;
/// Matrix with `f64` elements.
pub type Matrixf64 = Matrix<f64>;

/// Vector with `f32` elements.
pub type Vectorf32 = Vector<f32>;
/// Vector with `f64` elements.
pub type Vectorf64 = Vector<f64>;
