use tracing::debug;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::multiplier::Multiplier;
use crate::naive::multiply_naive;
use crate::quadrant::Quadrant;

/// Side length below which the hybrid strategy stops recursing.
pub const DEFAULT_HYBRID_THRESHOLD: usize = 10;

/// What the Strassen recursion does with a sub-problem of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Hand the sub-problem to the naive multiplier (hybrid mode only).
    Naive,
    /// 1x1 operands: multiply the two scalars.
    Scalar,
    /// Split into quadrants and recurse seven times.
    Split,
}

impl Dispatch {
    /// Chooses the branch for an `n x n` sub-problem.
    ///
    /// The hybrid check runs first and compares against the current `n`, so
    /// every level of the recursion can fall back to naive, not just the top.
    pub fn for_size(n: usize, hybrid: bool, threshold: usize) -> Dispatch {
        if hybrid && n < threshold {
            Dispatch::Naive
        } else if n == 1 {
            Dispatch::Scalar
        } else {
            Dispatch::Split
        }
    }
}

/// Recursive divide-and-conquer multiplication using Strassen's seven-product
/// identity.
///
/// In hybrid mode, sub-problems smaller than `threshold` are multiplied with
/// the naive algorithm instead of being split further. The recursion is
/// single-threaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrassenMultiplier {
    hybrid: bool,
    threshold: usize,
}

impl StrassenMultiplier {
    /// Pure Strassen, recursing all the way down to 1x1.
    pub fn pure() -> Self {
        StrassenMultiplier {
            hybrid: false,
            threshold: DEFAULT_HYBRID_THRESHOLD,
        }
    }

    /// Strassen that falls back to naive below `threshold`.
    pub fn hybrid(threshold: usize) -> Self {
        StrassenMultiplier {
            hybrid: true,
            threshold,
        }
    }
}

impl Default for StrassenMultiplier {
    fn default() -> Self {
        Self::pure()
    }
}

impl Multiplier for StrassenMultiplier {
    fn name(&self) -> &str {
        if self.hybrid {
            "hybrid"
        } else {
            "strassen"
        }
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        debug!(
            n = a.dimension(),
            hybrid = self.hybrid,
            threshold = self.threshold,
            "strassen multiply"
        );
        strassen(a, b, self.hybrid, self.threshold)
    }
}

fn strassen(a: &Matrix, b: &Matrix, hybrid: bool, threshold: usize) -> Result<Matrix> {
    let n = a.ensure_same_dimension(b)?;

    match Dispatch::for_size(n, hybrid, threshold) {
        Dispatch::Naive => return multiply_naive(a, b),
        Dispatch::Scalar => {
            return Matrix::from_vec(1, vec![a.as_slice()[0] * b.as_slice()[0]]);
        }
        Dispatch::Split => {}
    }

    let a12 = a.extract(Quadrant::TopRight)?;
    let a11 = a.extract(Quadrant::TopLeft)?;
    let a21 = a.extract(Quadrant::BottomLeft)?;
    let a22 = a.extract(Quadrant::BottomRight)?;

    let b12 = b.extract(Quadrant::TopRight)?;
    let b11 = b.extract(Quadrant::TopLeft)?;
    let b21 = b.extract(Quadrant::BottomLeft)?;
    let b22 = b.extract(Quadrant::BottomRight)?;

    let t0 = a11.add(&a22)?;
    let t1 = b11.add(&b22)?;
    let t2 = a21.add(&a22)?;
    let t3 = b12.sub(&b22)?;
    let t4 = b21.sub(&b11)?;
    let t5 = a11.add(&a12)?;
    let t6 = a21.sub(&a11)?;
    let t7 = b11.add(&b12)?;
    let t8 = a12.sub(&a22)?;
    let t9 = b21.add(&b22)?;

    let recurse = |x: &Matrix, y: &Matrix| strassen(x, y, hybrid, threshold);
    let m1 = recurse(&t0, &t1)?;
    let m2 = recurse(&t2, &b11)?;
    let m3 = recurse(&a11, &t3)?;
    let m4 = recurse(&a22, &t4)?;
    let m5 = recurse(&t5, &b22)?;
    let m6 = recurse(&t6, &t7)?;
    let m7 = recurse(&t8, &t9)?;

    let c11 = m1.add(&m4)?.sub(&m5)?.add(&m7)?;
    let c12 = m3.add(&m5)?;
    let c21 = m2.add(&m4)?;
    let c22 = m1.sub(&m2)?.add(&m3)?.add(&m6)?;

    let mut c = Matrix::zeros(n)?;
    c.insert(Quadrant::TopRight, &c12)?;
    c.insert(Quadrant::TopLeft, &c11)?;
    c.insert(Quadrant::BottomLeft, &c21)?;
    c.insert(Quadrant::BottomRight, &c22)?;
    Ok(c)
}
