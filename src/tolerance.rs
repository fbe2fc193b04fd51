//! Absolute-or-relative floating-point comparison.
//!
//! Value comparisons, from `Matrix::approx_eq` to the eigenvalue sweep test,
//! go through [`approx`]. Rank decisions (QR dependence, SVD orthogonality
//! and cut-off) use [`Tolerance::is_negligible`] against a reference
//! magnitude instead, so they do not change when the input is rescaled.

use crate::traits::FloatScalar;

/// Absolute and relative tolerance pair.
///
/// `x ≈ y` iff `|x − y| < abs` or `|x − y| < max(|x|, |y|) · rel`.
///
/// ```
/// use densela::Tolerance;
///
/// let tol = Tolerance::<f64>::default();
/// assert!(tol.approx(1.0, 1.0 + 1e-12));
/// assert!(tol.approx(1e12, 1e12 + 1.0)); // relative arm
/// assert!(!tol.approx(1.0, 1.001));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance<T> {
    /// Absolute tolerance.
    pub abs: T,
    /// Relative tolerance, scaled by the larger magnitude of the operands.
    pub rel: T,
}

impl<T: FloatScalar> Tolerance<T> {
    /// Tolerance with separate absolute and relative parts.
    pub fn new(abs: T, rel: T) -> Self {
        Self { abs, rel }
    }

    /// Tolerance using the same value for both parts.
    pub fn uniform(tol: T) -> Self {
        Self { abs: tol, rel: tol }
    }

    /// Shorthand for [`approx`] with this tolerance.
    #[inline]
    pub fn approx(&self, x: T, y: T) -> bool {
        approx(x, y, *self)
    }

    /// Whether `x` is indistinguishable from zero.
    ///
    /// The relative arm is vacuous against zero, so only `abs` matters.
    #[inline]
    pub fn is_zero(&self, x: T) -> bool {
        approx(x, T::zero(), *self)
    }

    /// Whether `x` is negligible next to a quantity of magnitude `scale`:
    /// `x == 0` or `|x| <= |scale| · rel`.
    ///
    /// Unlike [`is_zero`](Self::is_zero) this does not depend on the absolute
    /// size of the data, so it is the test used for rank decisions.
    ///
    /// ```
    /// use densela::Tolerance;
    ///
    /// let tol = Tolerance::<f64>::default();
    /// assert!(!tol.is_negligible(1e-12, 1e-10));
    /// assert!(tol.is_negligible(1e-20, 1e-10));
    /// ```
    #[inline]
    pub fn is_negligible(&self, x: T, scale: T) -> bool {
        x == T::zero() || x.abs() <= scale.abs() * self.rel
    }
}

impl<T: FloatScalar> Default for Tolerance<T> {
    /// `1e-9` absolute, `1e-9` relative.
    fn default() -> Self {
        Self::uniform(T::from_f64_lossy(1e-9))
    }
}

/// Approximate equality of two scalars.
///
/// ```
/// use densela::{approx, Tolerance};
///
/// assert!(approx(0.1 + 0.2, 0.3, Tolerance::default()));
/// assert!(!approx(0.1, 0.2, Tolerance::default()));
/// ```
#[inline]
pub fn approx<T: FloatScalar>(x: T, y: T, tol: Tolerance<T>) -> bool {
    let diff = (x - y).abs();
    diff < tol.abs || diff < x.abs().max(y.abs()) * tol.rel
}
