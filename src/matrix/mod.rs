pub mod aliases;
mod norm;
mod ops;
mod square;
mod util;
pub mod vector;

pub use aliases::*;
pub use vector::Vector;

use core::ops::{Index, IndexMut};

use crate::linalg::LinalgError;
use crate::tolerance::{approx, Tolerance};
use crate::traits::{FloatScalar, Scalar};

/// Dense heap-allocated matrix with runtime dimensions.
///
/// Column-major `Vec<T>` storage: entry `(i, j)` lives at `i + j * nrows`.
/// Dimensions are fixed at construction; every arithmetic operation returns
/// a freshly allocated result and leaves its operands untouched.
///
/// # Examples
///
/// ```
/// use densela::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let b = Matrix::<f64>::eye(3);
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    pub(crate) data: Vec<T>,
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    ///
    /// ```
    /// use densela::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::fill(nrows, ncols, T::zero())
    }

    /// Create a matrix filled with a given value.
    pub fn fill(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an `n x n` identity matrix.
    ///
    /// ```
    /// use densela::Matrix;
    /// let id = Matrix::<f64>::eye(3);
    /// assert_eq!(id[(0, 0)], 1.0);
    /// assert_eq!(id[(0, 1)], 0.0);
    /// assert_eq!(id[(2, 2)], 1.0);
    /// ```
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Create a matrix from a flat slice in column-major order.
    ///
    /// Panics if `slice.len() != nrows * ncols`.
    ///
    /// ```
    /// use densela::Matrix;
    /// // Column-major: col0=[1,3], col1=[2,4]
    /// let m = Matrix::from_slice(2, 2, &[1.0, 3.0, 2.0, 4.0]);
    /// assert_eq!(m[(1, 0)], 3.0);
    /// assert_eq!(m[(0, 1)], 2.0);
    /// ```
    pub fn from_slice(nrows: usize, ncols: usize, slice: &[T]) -> Self {
        Self::from_vec(nrows, ncols, slice.to_vec())
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Transposes the data to column-major internal storage.
    /// Panics if `row_major.len() != nrows * ncols`.
    ///
    /// ```
    /// use densela::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self::from_fn(nrows, ncols, |i, j| row_major[i * ncols + j])
    }

    /// Create a matrix from an owned `Vec<T>` in column-major order.
    ///
    /// Panics if `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "vec length {} does not match {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        Self { data, nrows, ncols }
    }

    /// Build a matrix whose columns are the given vectors.
    ///
    /// Fails with `DimensionMismatch` if the vectors differ in length.
    ///
    /// ```
    /// use densela::{Matrix, Vector};
    /// let a = Vector::from_slice(&[1.0, 2.0]);
    /// let b = Vector::from_slice(&[3.0, 4.0]);
    /// let m = Matrix::from_columns(&[a, b]).unwrap();
    /// assert_eq!(m[(1, 0)], 2.0);
    /// assert_eq!(m[(0, 1)], 3.0);
    /// ```
    pub fn from_columns(columns: &[Vector<T>]) -> Result<Self, LinalgError> {
        let nrows = columns.first().map_or(0, |c| c.len());
        let mut data = Vec::with_capacity(nrows * columns.len());
        for c in columns {
            if c.len() != nrows {
                return Err(LinalgError::DimensionMismatch {
                    expected: (nrows, 1),
                    got: (c.len(), 1),
                });
            }
            data.extend_from_slice(c.as_slice());
        }
        Ok(Self {
            data,
            nrows,
            ncols: columns.len(),
        })
    }
}

impl<T> Matrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(rows, cols)` pair.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Column-major view of the underlying data.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use densela::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| if i == j { 1.0_f64 } else { 0.0 });
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Contiguous slice of column `j`.
    #[inline]
    pub(crate) fn col_slice(&self, j: usize) -> &[T] {
        &self.data[j * self.nrows..(j + 1) * self.nrows]
    }

    /// Mutable slice of column `j`.
    #[inline]
    pub(crate) fn col_slice_mut(&mut self, j: usize) -> &mut [T] {
        let n = self.nrows;
        &mut self.data[j * n..(j + 1) * n]
    }

    /// Mutable slices of two distinct columns at once.
    pub(crate) fn two_cols_mut(&mut self, a: usize, b: usize) -> (&mut [T], &mut [T]) {
        assert_ne!(a, b, "columns must differ");
        let n = self.nrows;
        let (lo, hi, swapped) = if a < b { (a, b, false) } else { (b, a, true) };
        let (head, tail) = self.data.split_at_mut(hi * n);
        let lo_slice = &mut head[lo * n..(lo + 1) * n];
        let hi_slice = &mut tail[..n];
        if swapped {
            (hi_slice, lo_slice)
        } else {
            (lo_slice, hi_slice)
        }
    }
}

// ── Comparison ──────────────────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Element-wise approximate equality under `tol`.
    ///
    /// Matrices of different shapes are never approximately equal.
    ///
    /// ```
    /// use densela::{Matrix, Tolerance};
    /// let a = Matrix::from_rows(1, 2, &[1.0, 2.0]);
    /// let b = Matrix::from_rows(1, 2, &[1.0 + 1e-12, 2.0]);
    /// assert!(a.approx_eq(&b, Tolerance::default()));
    /// ```
    pub fn approx_eq(&self, other: &Self, tol: Tolerance<T>) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&x, &y)| approx(x, y, tol))
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.nrows, "row {} out of bounds", row);
        &self.data[row + col * self.nrows]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.nrows, "row {} out of bounds", row);
        &mut self.data[row + col * self.nrows]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros() {
        let m = Matrix::<f64>::zeros(3, 4);
        assert_eq!(m.shape(), (3, 4));
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn fill() {
        let m = Matrix::fill(2, 3, 7.0_f64);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(m[(i, j)], 7.0);
            }
        }
    }

    #[test]
    fn eye() {
        let m = Matrix::<f64>::eye(3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(m[(i, j)], expected);
            }
        }
    }

    #[test]
    fn column_major_layout() {
        let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(m[(1, 2)], m.as_slice()[1 + 2 * 2]);
    }

    #[test]
    #[should_panic(expected = "slice length")]
    fn from_rows_wrong_length() {
        let _ = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn from_vec() {
        let m = Matrix::from_vec(2, 2, vec![1.0, 3.0, 2.0, 4.0]);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 1)], 4.0);
    }

    #[test]
    fn from_columns_mismatch() {
        let a = Vector::from_slice(&[1.0, 2.0]);
        let b = Vector::from_slice(&[3.0]);
        assert_eq!(
            Matrix::from_columns(&[a, b]).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: (2, 1),
                got: (1, 1)
            }
        );
    }

    #[test]
    fn index_mut() {
        let mut m = Matrix::<f64>::zeros(2, 2);
        m[(0, 1)] = 5.0;
        assert_eq!(m[(0, 1)], 5.0);
        assert_eq!(m.as_slice()[2], 5.0);
    }

    #[test]
    fn two_cols_mut_order() {
        let mut m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let (c2, c0) = m.two_cols_mut(2, 0);
        assert_eq!(c2, &[3.0, 6.0]);
        assert_eq!(c0, &[1.0, 4.0]);
        c2[0] = 9.0;
        assert_eq!(m[(0, 2)], 9.0);
    }

    #[test]
    fn clone_is_deep() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut b = a.clone().clone();
        assert_eq!(a, b);
        b[(0, 0)] = 10.0;
        assert_eq!(a[(0, 0)], 1.0);
    }

    #[test]
    fn approx_eq_shapes() {
        let a = Matrix::<f64>::zeros(2, 3);
        let b = Matrix::<f64>::zeros(3, 2);
        assert!(!a.approx_eq(&b, Tolerance::default()));
        assert!(a.approx_eq(&a.clone(), Tolerance::default()));
    }

    #[test]
    fn approx_eq_tolerance() {
        let a = Matrix::from_rows(1, 2, &[1.0, 1e6]);
        let b = Matrix::from_rows(1, 2, &[1.0 + 1e-10, 1e6 + 1e-4]);
        assert!(a.approx_eq(&b, Tolerance::default()));
        let c = Matrix::from_rows(1, 2, &[1.0 + 1e-6, 1e6]);
        assert!(!a.approx_eq(&c, Tolerance::default()));
    }
}
