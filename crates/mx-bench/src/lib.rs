//! `mx-bench` - Concurrent benchmark harness for the `mx-matrix` strategies.
//!
//! This crate provides:
//! - `BenchConfig` / `Dataset`: what to benchmark, loadable from TOML
//! - A `MatrixSource` trait for loading dataset matrices, with `FileSource`
//! - `run_benchmark`: a fixed worker pool timing naive, Strassen and hybrid
//!   multiplication per dataset and averaging across variations
//! - `generate_datasets`: writes random matrix files for a configuration

pub mod config;
pub mod error;
pub mod generate;
pub mod harness;
pub mod report;
pub mod source;
pub mod timing;

pub use config::{BenchConfig, Dataset};
pub use error::{BenchError, Result};
pub use generate::{generate_datasets, GeneratorOptions};
pub use harness::run_benchmark;
pub use report::{BenchReport, BenchRow, DatasetFailure};
pub use source::{FileSource, MatrixSource};
pub use timing::{StrategyTimings, TimingAccumulator};
