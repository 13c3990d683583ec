use tracing::debug;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::multiplier::Multiplier;

/// Textbook O(n^3) multiplication.
///
/// Used on its own and as the base case of [`StrassenMultiplier`] in hybrid
/// mode.
///
/// [`StrassenMultiplier`]: crate::strassen::StrassenMultiplier
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveMultiplier;

impl NaiveMultiplier {
    pub fn new() -> Self {
        NaiveMultiplier
    }
}

impl Multiplier for NaiveMultiplier {
    fn name(&self) -> &str {
        "naive"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        debug!(n = a.dimension(), "naive multiply");
        multiply_naive(a, b)
    }
}

/// r[j][i] = sum over k of a[j][k] * b[k][i].
pub(crate) fn multiply_naive(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let n = a.ensure_same_dimension(b)?;
    let x = a.as_slice();
    let y = b.as_slice();

    let mut c = vec![0.0f64; n * n];
    for j in 0..n {
        for i in 0..n {
            let mut sum = 0.0f64;
            for k in 0..n {
                sum += x[j * n + k] * y[k * n + i];
            }
            c[j * n + i] = sum;
        }
    }
    Matrix::from_vec(n, c)
}
