use core::fmt::{self, Write as _};

use crate::linalg::LinalgError;
use crate::traits::Scalar;

use super::vector::Vector;
use super::Matrix;

// ── Map ─────────────────────────────────────────────────────────────

impl<T> Matrix<T> {
    /// Apply a function to every element, producing a new matrix.
    ///
    /// ```
    /// use densela::Matrix;
    /// let m = Matrix::from_slice(2, 2, &[1.0_f64, 4.0, 9.0, 16.0]);
    /// let r = m.map(|x: f64| x.sqrt());
    /// assert_eq!(r[(0, 0)], 1.0);
    /// assert_eq!(r[(1, 1)], 4.0);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Matrix<U>
    where
        T: Copy,
    {
        let data: Vec<U> = self.data.iter().map(|&x| f(x)).collect();
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

// ── Row / Column access ─────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Copy of row `i` as a row vector.
    ///
    /// ```
    /// use densela::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let r = m.row(0);
    /// assert!(r.is_row());
    /// assert_eq!(r.as_slice(), &[1.0, 2.0]);
    /// ```
    pub fn row(&self, i: usize) -> Vector<T> {
        let data: Vec<T> = (0..self.ncols).map(|j| self[(i, j)]).collect();
        Vector {
            inner: Matrix::from_vec(1, self.ncols, data),
        }
    }

    /// Copy of column `j` as a column vector.
    ///
    /// ```
    /// use densela::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let c = m.col(1);
    /// assert_eq!(c.as_slice(), &[2.0, 4.0]);
    /// ```
    pub fn col(&self, j: usize) -> Vector<T> {
        Vector::from_slice(self.col_slice(j))
    }

    /// Overwrite column `j` in place.
    ///
    /// Fails with `DimensionMismatch` unless `v.len() == nrows`.
    pub fn set_col(&mut self, j: usize, v: &Vector<T>) -> Result<(), LinalgError> {
        if v.len() != self.nrows {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.nrows, 1),
                got: (v.len(), 1),
            });
        }
        let n = self.nrows;
        self.data[j * n..(j + 1) * n].copy_from_slice(v.as_slice());
        Ok(())
    }

    /// Iterator over the columns as vectors.
    pub fn columns(&self) -> impl Iterator<Item = Vector<T>> + '_ {
        (0..self.ncols).map(move |j| self.col(j))
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;

        // Measure column widths
        let mut widths = vec![0usize; n];
        for (j, width) in widths.iter_mut().enumerate() {
            for i in 0..m {
                let w = WriteCounting::count(|wc| write!(wc, "{}", self[(i, j)]));
                *width = (*width).max(w);
            }
        }

        for i in 0..m {
            write!(f, "│")?;
            for (j, &width) in widths.iter().enumerate() {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", self[(i, j)], width = width)?;
            }
            write!(f, "│")?;
            if i + 1 < m {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}
