use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("matrix error: {0}")]
    Matrix(#[from] mx_matrix::MatrixError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("benchmark worker {0} panicked")]
    WorkerPanicked(usize),
}

pub type Result<T> = std::result::Result<T, BenchError>;
