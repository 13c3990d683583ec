use std::fmt::Debug;

use crate::error::Result;
use crate::matrix::Matrix;

/// Trait for interchangeable square-matrix multiplication strategies.
///
/// Implementations never mutate their operands and return a freshly
/// allocated product. Both operands must share a dimension.
pub trait Multiplier: Send + Sync + Debug {
    /// Returns the name of this strategy (e.g., "naive", "strassen").
    fn name(&self) -> &str;

    /// Matrix multiplication: C = A @ B.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if `a` and `b` differ in size. Any failure
    /// from an intermediate step is returned unchanged; no partial result is
    /// ever produced.
    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix>;
}
