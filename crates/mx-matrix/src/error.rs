use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("invalid dimension {0}: must be 1 or a power of two")]
    InvalidDimension(usize),
    #[error("matrix must be square: {rows} rows but a row has {cols} values")]
    NotSquare { rows: usize, cols: usize },
    #[error("data length mismatch: {n}x{n} matrix needs {expected} values, got {actual}")]
    DataLength {
        n: usize,
        expected: usize,
        actual: usize,
    },
    #[error("dimension mismatch: {left}x{left} vs {right}x{right}")]
    DimensionMismatch { left: usize, right: usize },
    #[error("invalid quadrant {0}: expected 1, 2, 3 or 4")]
    InvalidQuadrant(usize),
    #[error("size mismatch: cannot insert {src}x{src} into a quadrant of {dest}x{dest}")]
    SizeMismatch { dest: usize, src: usize },
    #[error("format error on line {line}: {reason}")]
    Format { line: usize, reason: String },
    #[error("matrix invariant violated: {0}")]
    InvariantViolation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MatrixError>;
