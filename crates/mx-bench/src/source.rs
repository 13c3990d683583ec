use std::path::PathBuf;

use mx_matrix::{load_matrix, Matrix};

/// Where the harness gets dataset matrices from.
///
/// Shared by every worker thread, so implementations must be `Send + Sync`.
pub trait MatrixSource: Send + Sync {
    /// Load the matrix identified by `path`.
    fn load(&self, path: &str) -> mx_matrix::Result<Matrix>;
}

/// Reads matrix files in the tab-separated text format.
///
/// Relative paths are resolved against `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    root: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        FileSource { root: None }
    }

    /// Resolve relative dataset paths against `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        FileSource {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl MatrixSource for FileSource {
    fn load(&self, path: &str) -> mx_matrix::Result<Matrix> {
        load_matrix(self.resolve(path))
    }
}
