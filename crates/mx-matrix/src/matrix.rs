use crate::error::{MatrixError, Result};

/// Returns true if `n` is a legal matrix side length: 1, or even with a
/// legal half, which is exactly the set of powers of two.
pub fn is_valid_dimension(n: usize) -> bool {
    n.is_power_of_two()
}

/// A dense square matrix of `f64` values.
///
/// Data is stored contiguously in row-major order. The side length is always
/// 1 or a power of two, so the matrix can be split into four equal quadrants
/// down to single elements.
///
/// All arithmetic returns a fresh matrix and leaves its operands untouched.
/// The one mutating operation is [`Matrix::insert`], used to assemble a result
/// from independently computed quadrants.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create an `n x n` zero matrix.
    ///
    /// # Errors
    /// Returns `InvalidDimension` if `n` is not 1 or a power of two.
    pub fn zeros(n: usize) -> Result<Self> {
        if !is_valid_dimension(n) {
            return Err(MatrixError::InvalidDimension(n));
        }
        Ok(Matrix {
            data: vec![0.0; n * n],
            rows: n,
            cols: n,
        })
    }

    /// Create an `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Matrix::zeros(n)?;
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `InvalidDimension` if `n` is illegal, `DataLength` if `data`
    /// does not hold exactly `n * n` values.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Result<Self> {
        if !is_valid_dimension(n) {
            return Err(MatrixError::InvalidDimension(n));
        }
        if data.len() != n * n {
            return Err(MatrixError::DataLength {
                n,
                expected: n * n,
                actual: data.len(),
            });
        }
        Ok(Matrix {
            data,
            rows: n,
            cols: n,
        })
    }

    /// Create a matrix from a list of rows.
    ///
    /// Every row must have as many values as there are rows.
    ///
    /// # Errors
    /// Returns `NotSquare` for a ragged or rectangular input, and
    /// `InvalidDimension` if the row count is not a power of two.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != n) {
            return Err(MatrixError::NotSquare {
                rows: n,
                cols: bad.len(),
            });
        }
        Matrix::from_vec(n, rows.into_iter().flatten().collect())
    }

    /// Returns the side length `n`.
    ///
    /// # Panics
    /// Panics if the square power-of-two invariant does not hold. Every
    /// constructor enforces it, so a failure here means a bug, not bad input.
    pub fn dimension(&self) -> usize {
        match self.check_invariant() {
            Ok(n) => n,
            Err(e) => panic!("{}", e),
        }
    }

    /// Checks the shape invariant without panicking.
    ///
    /// # Errors
    /// Returns `InvariantViolation` describing the first broken rule.
    pub fn check_invariant(&self) -> Result<usize> {
        if self.rows == 0 {
            return Err(MatrixError::InvariantViolation("row count is 0".to_string()));
        }
        if self.cols == 0 {
            return Err(MatrixError::InvariantViolation(
                "column count is 0".to_string(),
            ));
        }
        if self.rows != self.cols {
            return Err(MatrixError::InvariantViolation(format!(
                "matrix must be square, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !is_valid_dimension(self.cols) {
            return Err(MatrixError::InvariantViolation(format!(
                "dimension {} is not a power of two",
                self.cols
            )));
        }
        if self.data.len() != self.rows * self.cols {
            return Err(MatrixError::InvariantViolation(format!(
                "storage holds {} values, expected {}",
                self.data.len(),
                self.rows * self.cols
            )));
        }
        Ok(self.cols)
    }

    /// Returns the value at (`row`, `col`).
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "index ({}, {}) out of bounds", row, col);
        self.data[row * self.cols + col]
    }

    /// Sets the value at (`row`, `col`).
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols, "index ({}, {}) out of bounds", row, col);
        self.data[row * self.cols + col] = value;
    }

    /// Returns the underlying row-major data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Iterates over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.cols)
    }

    /// Elementwise sum: result[j][i] = self[j][i] + other[j][i].
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, |x, y| x + y)
    }

    /// Elementwise difference: result[j][i] = self[j][i] - other[j][i].
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, |x, y| x - y)
    }

    /// Fails with `DimensionMismatch` unless both matrices share a dimension.
    pub(crate) fn ensure_same_dimension(&self, other: &Matrix) -> Result<usize> {
        let left = self.dimension();
        let right = other.dimension();
        if left != right {
            return Err(MatrixError::DimensionMismatch { left, right });
        }
        Ok(left)
    }

    fn zip_with(&self, other: &Matrix, f: impl Fn(f64, f64) -> f64) -> Result<Matrix> {
        let n = self.ensure_same_dimension(other)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&x, &y)| f(x, y))
            .collect();
        Matrix::from_vec(n, data)
    }
}
