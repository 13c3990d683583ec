use std::fmt;

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

/// One of the four equal sub-blocks of a matrix.
///
/// The numbering is fixed and not alphabetical:
/// - 1: top-right
/// - 2: top-left
/// - 3: bottom-left
/// - 4: bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopRight = 1,
    TopLeft = 2,
    BottomLeft = 3,
    BottomRight = 4,
}

impl Quadrant {
    /// All quadrants in numbering order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopRight,
        Quadrant::TopLeft,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Converts a quadrant number (1..=4) to a `Quadrant`.
    ///
    /// # Errors
    /// Returns `InvalidQuadrant` for any other value.
    pub fn from_index(index: usize) -> Result<Quadrant> {
        match index {
            1 => Ok(Quadrant::TopRight),
            2 => Ok(Quadrant::TopLeft),
            3 => Ok(Quadrant::BottomLeft),
            4 => Ok(Quadrant::BottomRight),
            other => Err(MatrixError::InvalidQuadrant(other)),
        }
    }

    /// Returns the quadrant number.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Row and column offset of this quadrant inside a matrix of side `n`.
    fn origin(&self, n: usize) -> (usize, usize) {
        let h = n / 2;
        match self {
            Quadrant::TopRight => (0, h),
            Quadrant::TopLeft => (0, 0),
            Quadrant::BottomLeft => (h, 0),
            Quadrant::BottomRight => (h, h),
        }
    }
}

impl TryFrom<usize> for Quadrant {
    type Error = MatrixError;

    fn try_from(index: usize) -> Result<Self> {
        Quadrant::from_index(index)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl Matrix {
    /// Copies the named quadrant into a new `(n/2) x (n/2)` matrix.
    ///
    /// # Errors
    /// Returns `InvalidDimension(0)` when called on a 1x1 matrix, which has
    /// no quadrants.
    pub fn extract(&self, quadrant: Quadrant) -> Result<Matrix> {
        let n = self.dimension();
        let h = n / 2;
        let (row0, col0) = quadrant.origin(n);

        let mut out = Matrix::zeros(h)?;
        let src = self.as_slice();
        let dst = out.as_mut_slice();
        for j in 0..h {
            let from = (row0 + j) * n + col0;
            dst[j * h..(j + 1) * h].copy_from_slice(&src[from..from + h]);
        }
        Ok(out)
    }

    /// Copies `src` into the named quadrant of `self`, in place.
    ///
    /// # Errors
    /// Returns `SizeMismatch` unless `self` is exactly twice the size of `src`.
    pub fn insert(&mut self, quadrant: Quadrant, src: &Matrix) -> Result<()> {
        let n = self.dimension();
        let h = src.dimension();
        if n != 2 * h {
            return Err(MatrixError::SizeMismatch { dest: n, src: h });
        }
        let (row0, col0) = quadrant.origin(n);

        let from = src.as_slice();
        let dst = self.as_mut_slice();
        for j in 0..h {
            let to = (row0 + j) * n + col0;
            dst[to..to + h].copy_from_slice(&from[j * h..(j + 1) * h]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(n: usize) -> Matrix {
        Matrix::from_vec(n, (0..n * n).map(|v| v as f64).collect()).unwrap()
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Quadrant::from_index(1).unwrap(), Quadrant::TopRight);
        assert_eq!(Quadrant::from_index(2).unwrap(), Quadrant::TopLeft);
        assert_eq!(Quadrant::from_index(3).unwrap(), Quadrant::BottomLeft);
        assert_eq!(Quadrant::from_index(4).unwrap(), Quadrant::BottomRight);
        for q in Quadrant::ALL {
            assert_eq!(Quadrant::try_from(q.index()).unwrap(), q);
        }
    }

    #[test]
    fn test_invalid_quadrant() {
        assert!(matches!(
            Quadrant::from_index(0),
            Err(MatrixError::InvalidQuadrant(0))
        ));
        assert!(matches!(
            Quadrant::try_from(5usize),
            Err(MatrixError::InvalidQuadrant(5))
        ));
    }

    #[test]
    fn test_extract_numbering() {
        // 0  1  2  3
        // 4  5  6  7
        // 8  9 10 11
        // 12 13 14 15
        let m = counting(4);
        assert_eq!(m.extract(Quadrant::TopRight).unwrap().as_slice(), &[2.0, 3.0, 6.0, 7.0]);
        assert_eq!(m.extract(Quadrant::TopLeft).unwrap().as_slice(), &[0.0, 1.0, 4.0, 5.0]);
        assert_eq!(m.extract(Quadrant::BottomLeft).unwrap().as_slice(), &[8.0, 9.0, 12.0, 13.0]);
        assert_eq!(
            m.extract(Quadrant::BottomRight).unwrap().as_slice(),
            &[10.0, 11.0, 14.0, 15.0]
        );
    }

    #[test]
    fn test_extract_from_scalar_fails() {
        let m = Matrix::zeros(1).unwrap();
        assert!(matches!(
            m.extract(Quadrant::TopLeft),
            Err(MatrixError::InvalidDimension(0))
        ));
    }

    #[test]
    fn test_insert_roundtrip_every_quadrant() {
        let m = counting(8);
        for q in Quadrant::ALL {
            let part = m.extract(q).unwrap();
            let mut dest = Matrix::zeros(8).unwrap();
            dest.insert(q, &part).unwrap();
            assert_eq!(dest.extract(q).unwrap(), part, "quadrant {}", q);

            // everything outside the quadrant stays zero
            let others: f64 = Quadrant::ALL
                .iter()
                .filter(|&&o| o != q)
                .map(|&o| dest.extract(o).unwrap().as_slice().iter().sum::<f64>())
                .sum();
            assert_eq!(others, 0.0);
        }
    }

    #[test]
    fn test_insert_all_reassembles() {
        let m = counting(4);
        let mut dest = Matrix::zeros(4).unwrap();
        for q in Quadrant::ALL {
            dest.insert(q, &m.extract(q).unwrap()).unwrap();
        }
        assert_eq!(dest, m);
    }

    #[test]
    fn test_insert_size_mismatch() {
        let mut dest = Matrix::zeros(8).unwrap();
        let src = Matrix::zeros(2).unwrap();
        assert!(matches!(
            dest.insert(Quadrant::TopLeft, &src),
            Err(MatrixError::SizeMismatch { dest: 8, src: 2 })
        ));
        assert_eq!(dest, Matrix::zeros(8).unwrap());
    }
}
