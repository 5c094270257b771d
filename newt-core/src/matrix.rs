//! A small dense matrix engine.
//!
//! [`Matrix`] stores `f64` values row-major and is mutated in place. It is
//! sized for interactive equation solving (tens of rows, not thousands), so
//! every operation is a straightforward dense loop. Cloning is the explicit
//! deep copy; two logical owners never share storage.

mod error;

pub use error::MatrixError;

/// Pivot magnitudes below this are treated as zero during elimination.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// A dense 2-D matrix of `f64` values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a `rows x cols` matrix with every entry set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::Initialization` if either dimension is zero.
    pub fn new(rows: usize, cols: usize, fill: f64) -> Result<Self, MatrixError> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::Initialization { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        })
    }

    /// Creates an `n x n` matrix with every entry set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::Initialization` if `n` is zero.
    pub fn square(n: usize, fill: f64) -> Result<Self, MatrixError> {
        Self::new(n, n, fill)
    }

    /// Creates the `n x n` identity matrix.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::Initialization` if `n` is zero.
    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        let mut identity = Self::square(n, 0.0)?;
        for i in 0..n {
            identity.set(i, i, 1.0);
        }
        Ok(identity)
    }

    /// Creates a matrix from a rectangular grid of rows.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::Missing` if `rows` is empty,
    /// `MatrixError::Initialization` if the first row is empty, and
    /// `MatrixError::VaryingSize` if any row's length differs from the
    /// first row's.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MatrixError> {
        let Some(first) = rows.first() else {
            return Err(MatrixError::Missing);
        };

        let cols = first.len();
        if cols == 0 {
            return Err(MatrixError::Initialization {
                rows: rows.len(),
                cols,
            });
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::VaryingSize {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The raw entries in row-major order, for display layers.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols, "index out of bounds");
        row * self.cols + col
    }

    /// Returns the entry at `(row, col)`. Indices must be in range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[self.offset(row, col)]
    }

    /// Sets the entry at `(row, col)`. Indices must be in range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let offset = self.offset(row, col);
        self.data[offset] = value;
    }

    /// Element-wise sum.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::RowMismatch` or `MatrixError::ColMismatch` if
    /// the shapes differ.
    pub fn add(&self, other: &Self) -> Result<Self, MatrixError> {
        self.check_same_shape(other)?;
        let mut result = self.clone();
        for (entry, value) in result.data.iter_mut().zip(&other.data) {
            *entry += value;
        }
        Ok(result)
    }

    /// Element-wise difference.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::RowMismatch` or `MatrixError::ColMismatch` if
    /// the shapes differ.
    pub fn sub(&self, other: &Self) -> Result<Self, MatrixError> {
        self.check_same_shape(other)?;
        let mut result = self.clone();
        for (entry, value) in result.data.iter_mut().zip(&other.data) {
            *entry -= value;
        }
        Ok(result)
    }

    fn check_same_shape(&self, other: &Self) -> Result<(), MatrixError> {
        if self.rows != other.rows {
            return Err(MatrixError::RowMismatch {
                left: self.rows,
                right: other.rows,
            });
        }
        if self.cols != other.cols {
            return Err(MatrixError::ColMismatch {
                left: self.cols,
                right: other.cols,
            });
        }
        Ok(())
    }

    /// Standard matrix product.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::SizeMismatch` if `self.cols != other.rows`.
    pub fn mul(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.cols != other.rows {
            return Err(MatrixError::SizeMismatch {
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: other.rows,
                right_cols: other.cols,
            });
        }

        let mut result = Self::new(self.rows, other.cols, 0.0)?;
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.get(i, k) * other.get(k, j);
                }
                result.set(i, j, sum);
            }
        }
        Ok(result)
    }

    /// Inverts a square matrix by Gauss-Jordan elimination with partial
    /// pivoting. This is the only place singularity is detected.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::SizeMismatch` if the matrix is not square and
    /// `MatrixError::Singular` if no pivot of usable magnitude exists.
    pub fn inv(&self) -> Result<Self, MatrixError> {
        if self.rows != self.cols {
            return Err(MatrixError::SizeMismatch {
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: self.cols,
                right_cols: self.rows,
            });
        }

        let n = self.rows;
        let mut work = self.clone();
        let mut inverse = Self::identity(n)?;

        for col in 0..n {
            let mut pivot_row = col;
            let mut pivot = work.get(col, col).abs();
            for row in col + 1..n {
                let candidate = work.get(row, col).abs();
                if candidate > pivot {
                    pivot_row = row;
                    pivot = candidate;
                }
            }

            if pivot < PIVOT_TOLERANCE {
                return Err(MatrixError::Singular);
            }

            if pivot_row != col {
                work.swap_rows(col, pivot_row);
                inverse.swap_rows(col, pivot_row);
            }

            let scale = 1.0 / work.get(col, col);
            for j in 0..n {
                work.set(col, j, work.get(col, j) * scale);
                inverse.set(col, j, inverse.get(col, j) * scale);
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = work.get(row, col);
                if factor == 0.0 {
                    continue;
                }
                for j in 0..n {
                    work.set(row, j, work.get(row, j) - factor * work.get(col, j));
                    inverse.set(row, j, inverse.get(row, j) - factor * inverse.get(col, j));
                }
            }
        }

        Ok(inverse)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        for j in 0..self.cols {
            let tmp = self.get(a, j);
            self.set(a, j, self.get(b, j));
            self.set(b, j, tmp);
        }
    }

    /// Rounds every entry in place to `precision` decimal digits.
    ///
    /// Display-precision stabilization only; call it after the numbers
    /// have stopped participating in arithmetic.
    pub fn round_to(&mut self, precision: u32) {
        let scale = 10f64.powi(precision as i32);
        for entry in &mut self.data {
            *entry = (*entry * scale).round() / scale;
        }
    }
}
