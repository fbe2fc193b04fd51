use core::ops::{Index, IndexMut};

use crate::linalg::LinalgError;
use crate::tolerance::{approx, Tolerance};
use crate::traits::{FloatScalar, Scalar};

use super::Matrix;

/// Dense vector: a [`Matrix`] with exactly one column or one row.
///
/// Constructors produce column vectors; [`transpose`](Vector::transpose)
/// flips the orientation. Single-index access `v[i]` works for both.
///
/// # Examples
///
/// ```
/// use densela::Vector;
///
/// let v = Vector::from_slice(&[1.0_f64, 2.0, 3.0]);
/// assert_eq!(v[0], 1.0);
/// assert_eq!(v.len(), 3);
/// assert!((v.dot(&v).unwrap() - 14.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    pub(crate) inner: Matrix<T>,
}

impl<T: Scalar> Vector<T> {
    /// Column vector from a slice.
    pub fn from_slice(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Column vector from an owned `Vec`.
    pub fn from_vec(data: Vec<T>) -> Self {
        let n = data.len();
        Self {
            inner: Matrix::from_vec(n, 1, data),
        }
    }

    /// Zero column vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            inner: Matrix::zeros(n, 1),
        }
    }

    /// Standard basis column vector `e_i` of length `n`.
    ///
    /// ```
    /// use densela::Vector;
    /// let e1 = Vector::<f64>::basis(3, 1);
    /// assert_eq!(e1.as_slice(), &[0.0, 1.0, 0.0]);
    /// ```
    pub fn basis(n: usize, i: usize) -> Self {
        let mut v = Self::zeros(n);
        v[i] = T::one();
        v
    }

    /// Inner product `⟨self, rhs⟩`. Orientation is ignored.
    ///
    /// ```
    /// use densela::Vector;
    /// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b).unwrap(), 32.0);
    /// ```
    pub fn dot(&self, rhs: &Self) -> Result<T, LinalgError> {
        self.check_len(rhs)?;
        Ok(dot_slices(self.as_slice(), rhs.as_slice()))
    }

    /// Outer product `self · rhsᵗ` (`len(self) × len(rhs)`).
    ///
    /// ```
    /// use densela::Vector;
    /// let u = Vector::from_slice(&[1.0, 2.0]);
    /// let v = Vector::from_slice(&[3.0, 4.0, 5.0]);
    /// let m = u.outer(&v);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m[(1, 2)], 10.0);
    /// ```
    pub fn outer(&self, rhs: &Self) -> Matrix<T> {
        Matrix::from_fn(self.len(), rhs.len(), |i, j| self[i] * rhs[j])
    }

    /// Apply `f` to every element, keeping the orientation.
    ///
    /// ```
    /// use densela::Vector;
    /// let v = Vector::from_slice(&[1.0, -2.0]);
    /// assert_eq!(v.apply(|x| x * x).as_slice(), &[1.0, 4.0]);
    /// ```
    pub fn apply(&self, f: impl Fn(T) -> T) -> Self {
        Self {
            inner: self.inner.map(f),
        }
    }

    /// Switch between column and row orientation.
    pub fn transpose(&self) -> Self {
        Self {
            inner: self.inner.transpose(),
        }
    }

    /// Element-wise sum. Result keeps the orientation of `self`.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.check_len(rhs)?;
        Ok(self.zip_with(rhs, |a, b| a + b))
    }

    /// Element-wise difference. Result keeps the orientation of `self`.
    #[allow(clippy::should_implement_trait)]
    pub fn sub(&self, rhs: &Self) -> Result<Self, LinalgError> {
        self.check_len(rhs)?;
        Ok(self.zip_with(rhs, |a, b| a - b))
    }

    /// Multiply every element by `k`.
    pub fn scale(&self, k: T) -> Self {
        self.apply(|x| x * k)
    }

    /// Row-vector times matrix, `vᵗ · A`, returned as a row vector.
    ///
    /// ```
    /// use densela::{Matrix, Vector};
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let v = Vector::from_slice(&[1.0, 1.0]).transpose();
    /// let w = v.vecmat(&a).unwrap();
    /// assert!(w.is_row());
    /// assert_eq!(w.as_slice(), &[4.0, 6.0]);
    /// ```
    pub fn vecmat(&self, a: &Matrix<T>) -> Result<Self, LinalgError> {
        if self.len() != a.nrows() {
            return Err(LinalgError::DimensionMismatch {
                expected: (1, a.nrows()),
                got: (1, self.len()),
            });
        }
        let data: Vec<T> = (0..a.ncols())
            .map(|j| dot_slices(self.as_slice(), a.col_slice(j)))
            .collect();
        let n = data.len();
        Ok(Self {
            inner: Matrix::from_vec(1, n, data),
        })
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        let data = self
            .as_slice()
            .iter()
            .zip(rhs.as_slice())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Self {
            inner: Matrix::from_vec(self.inner.nrows, self.inner.ncols, data),
        }
    }
}

impl<T> Vector<T> {
    /// Number of elements, `max(rows, cols)` for non-empty vectors.
    #[inline]
    pub fn len(&self) -> usize {
        if self.inner.ncols == 1 {
            self.inner.nrows
        } else {
            self.inner.ncols
        }
    }

    /// Whether the vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the vector is stored as a single column.
    #[inline]
    pub fn is_column(&self) -> bool {
        self.inner.ncols == 1
    }

    /// Whether the vector is stored as a single row.
    #[inline]
    pub fn is_row(&self) -> bool {
        self.inner.nrows == 1
    }

    /// View the vector data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.inner.data
    }

    /// View the vector data as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.inner.data
    }

    /// The underlying `n×1` or `1×n` matrix.
    #[inline]
    pub fn as_matrix(&self) -> &Matrix<T> {
        &self.inner
    }

    fn check_len(&self, rhs: &Self) -> Result<(), LinalgError> {
        if self.len() != rhs.len() {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.len(), 1),
                got: (rhs.len(), 1),
            });
        }
        Ok(())
    }
}

impl<T: FloatScalar> Vector<T> {
    /// Euclidean norm.
    ///
    /// ```
    /// use densela::Vector;
    /// let v = Vector::from_slice(&[3.0_f64, 4.0]);
    /// assert!((v.norm() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm(&self) -> T {
        dot_slices(self.as_slice(), self.as_slice()).sqrt()
    }

    /// Divide every element by `k`; `DivisionByZero` when `k ≈ 0`.
    pub fn div_scalar(&self, k: T) -> Result<Self, LinalgError> {
        Ok(Self {
            inner: self.inner.div_scalar(k)?,
        })
    }

    /// Unit vector in the same direction; `DivisionByZero` for a zero vector.
    pub fn normalize(&self) -> Result<Self, LinalgError> {
        self.div_scalar(self.norm())
    }

    /// Element-wise approximate equality. Orientation is ignored.
    pub fn approx_eq(&self, other: &Self, tol: Tolerance<T>) -> bool {
        self.len() == other.len()
            && self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .all(|(&x, &y)| approx(x, y, tol))
    }
}

#[inline]
pub(crate) fn dot_slices<T: Scalar>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.inner.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.inner.data[i]
    }
}

// ── Conversions: Vector ↔ Matrix ────────────────────────────────────

impl<T> From<Vector<T>> for Matrix<T> {
    fn from(v: Vector<T>) -> Self {
        v.inner
    }
}

impl<T> TryFrom<Matrix<T>> for Vector<T> {
    type Error = LinalgError;

    /// Accepts `n×1` and `1×n` matrices.
    fn try_from(m: Matrix<T>) -> Result<Self, Self::Error> {
        if m.nrows != 1 && m.ncols != 1 {
            return Err(LinalgError::DimensionMismatch {
                expected: (m.nrows, 1),
                got: m.shape(),
            });
        }
        Ok(Self { inner: m })
    }
}
