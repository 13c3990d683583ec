use std::fmt;

use mx_matrix::MatrixError;

use crate::timing::StrategyTimings;

/// Averaged timings for one dataset.
///
/// Displays as `exponent,naive_ns,strassen_ns,hybrid_ns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchRow {
    pub exponent: u32,
    pub naive_ns: u64,
    pub strassen_ns: u64,
    pub hybrid_ns: u64,
}

impl BenchRow {
    pub fn new(exponent: u32, average: &StrategyTimings) -> Self {
        let ns = |d: std::time::Duration| d.as_nanos().min(u64::MAX as u128) as u64;
        BenchRow {
            exponent,
            naive_ns: ns(average.naive),
            strassen_ns: ns(average.strassen),
            hybrid_ns: ns(average.hybrid),
        }
    }
}

impl fmt::Display for BenchRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.exponent, self.naive_ns, self.strassen_ns, self.hybrid_ns
        )
    }
}

/// A dataset that could not be benchmarked.
#[derive(Debug)]
pub struct DatasetFailure {
    pub exponent: u32,
    /// File that was being processed when the error happened.
    pub path: String,
    pub error: MatrixError,
}

impl fmt::Display for DatasetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dataset exponent {} ({}): {}",
            self.exponent, self.path, self.error
        )
    }
}

/// Result of a full benchmark run.
///
/// Both lists follow the order of the datasets in the configuration.
#[derive(Debug, Default)]
pub struct BenchReport {
    pub rows: Vec<BenchRow>,
    pub failures: Vec<DatasetFailure>,
}

impl BenchReport {
    /// True when every dataset produced a row.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One CSV line per row, newline-separated.
    pub fn to_csv(&self) -> String {
        self.rows
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
