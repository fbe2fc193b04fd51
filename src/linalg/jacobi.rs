//! Shared machinery for the cyclic Jacobi decompositions.
//!
//! Both [`JacobiEigen`](super::JacobiEigen) and [`JacobiSvd`](super::JacobiSvd)
//! run repeated sweeps over every index pair `p < q`, applying a plane
//! rotation wherever the pair is not yet resolved. A sweep that applies no
//! rotation at all ends the iteration.

use log::{debug, trace, warn};

use crate::linalg::LinalgError;
use crate::tolerance::Tolerance;
use crate::traits::FloatScalar;
use crate::Matrix;

/// Default cap on the number of sweeps before giving up.
pub const DEFAULT_MAX_SWEEPS: usize = 100_000;

/// Settings for the Jacobi sweep iteration.
///
/// The tolerance is never tighter than the scalar type can resolve, so the
/// same constructor works for `f32` and `f64`.
///
/// ```
/// use densela::{JacobiSettings, Tolerance};
///
/// let s = JacobiSettings::<f64>::svd();
/// assert_eq!(s.tol, Tolerance::uniform(1e-14));
///
/// let loose = JacobiSettings {
///     tol: Tolerance::uniform(1e-8),
///     max_sweeps: 50,
/// };
/// assert_eq!(loose.max_sweeps, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobiSettings<T> {
    /// Tolerance deciding whether a pair still needs a rotation
    /// (eigen default: 1e-12, SVD default: 1e-14).
    ///
    /// The eigendecomposition compares each predicted diagonal entry with
    /// the current one through [`approx`](crate::approx). The SVD does not
    /// use `approx` for its pairs: it skips a pair once
    /// `|⟨Up,Uq⟩| <= ‖Up‖·‖Uq‖ · tol.rel`, and zeroes columns and drops
    /// reciprocals whose norm is below `tol.rel` times the largest. `tol.abs`
    /// plays no part there, so the result does not depend on the scale of
    /// the input.
    pub tol: Tolerance<T>,
    /// Maximum number of sweeps before returning
    /// [`LinalgError::NonConvergence`] (default: 100_000).
    pub max_sweeps: usize,
}

impl<T: FloatScalar> JacobiSettings<T> {
    /// Defaults for the symmetric eigendecomposition.
    pub fn eigen() -> Self {
        Self::with_tol(1e-12)
    }

    /// Defaults for the singular value decomposition.
    pub fn svd() -> Self {
        Self::with_tol(1e-14)
    }

    fn with_tol(tol: f64) -> Self {
        let floor = T::epsilon() * T::from_f64_lossy(16.0);
        Self {
            tol: Tolerance::uniform(T::from_f64_lossy(tol).max(floor)),
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }
}

impl<T: FloatScalar> Default for JacobiSettings<T> {
    fn default() -> Self {
        Self::eigen()
    }
}

// ── Sweep driver ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SweepState {
    Sweeping,
    Converged,
}

/// Run sweeps until one applies zero rotations.
///
/// `sweep` performs one full pass and returns how many rotations it applied.
/// Returns the number of sweeps performed, including the final quiet one.
pub(crate) fn run_sweeps(
    label: &str,
    max_sweeps: usize,
    mut sweep: impl FnMut() -> usize,
) -> Result<usize, LinalgError> {
    let mut state = SweepState::Sweeping;
    let mut sweeps = 0;
    while state == SweepState::Sweeping {
        if sweeps >= max_sweeps {
            warn!("{label}: no convergence after {sweeps} sweeps");
            return Err(LinalgError::NonConvergence { sweeps });
        }
        let rotations = sweep();
        sweeps += 1;
        trace!("{label}: sweep {sweeps} applied {rotations} rotations");
        if rotations == 0 {
            state = SweepState::Converged;
        }
    }
    debug!("{label}: converged after {sweeps} sweeps");
    Ok(sweeps)
}

// ── Plane rotations ─────────────────────────────────────────────────

/// `(cos θ, sin θ)` for `θ = atan2(2·apq, aqq − app) / 2`, the rotation that
/// zeroes the off-diagonal entry of `[[app, apq], [apq, aqq]]` under
/// `Jᵗ · block · J`.
#[inline]
pub(crate) fn rotation_angle<T: FloatScalar>(app: T, apq: T, aqq: T) -> (T, T) {
    let half = T::from_f64_lossy(0.5);
    let two = T::one() + T::one();
    let theta = (two * apq).atan2(aqq - app) * half;
    let (s, c) = theta.sin_cos();
    (c, s)
}

/// Rotate a pair of equal-length slices in place:
/// `x ← c·x − s·y`, `y ← s·x + c·y`.
#[inline]
pub(crate) fn rotate_slices<T: FloatScalar>(x: &mut [T], y: &mut [T], c: T, s: T) {
    for (xi, yi) in x.iter_mut().zip(y.iter_mut()) {
        let a = *xi;
        let b = *yi;
        *xi = c * a - s * b;
        *yi = s * a + c * b;
    }
}

/// `M ← M · J`: rotate columns `p` and `q`.
pub(crate) fn rotate_cols<T: FloatScalar>(m: &mut Matrix<T>, p: usize, q: usize, c: T, s: T) {
    let (cp, cq) = m.two_cols_mut(p, q);
    rotate_slices(cp, cq, c, s);
}

/// `M ← Jᵗ · M`: rotate rows `p` and `q`.
pub(crate) fn rotate_rows<T: FloatScalar>(m: &mut Matrix<T>, p: usize, q: usize, c: T, s: T) {
    for j in 0..m.ncols() {
        let a = m[(p, j)];
        let b = m[(q, j)];
        m[(p, j)] = c * a - s * b;
        m[(q, j)] = s * a + c * b;
    }
}
