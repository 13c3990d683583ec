//! `mx-matrix` - Square matrices and the multiplication strategies benchmarked by `mx`.
//!
//! This crate provides:
//! - A `Matrix` type: dense, row-major, with a power-of-two (or 1) side length
//! - Elementwise `add`/`sub` and quadrant `extract`/`insert`
//! - A `Multiplier` trait with `NaiveMultiplier` and `StrassenMultiplier`
//! - A `Strategy` selector shared by the CLI and the benchmark harness
//! - The tab-separated text format used for matrix files

pub mod error;
pub mod matrix;
pub mod multiplier;
pub mod naive;
pub mod quadrant;
pub mod strassen;
pub mod strategy;
pub mod text;

// Re-export primary types at the crate root for convenience.
pub use error::{MatrixError, Result};
pub use matrix::{is_valid_dimension, Matrix};
pub use multiplier::Multiplier;
pub use naive::NaiveMultiplier;
pub use quadrant::Quadrant;
pub use strassen::{Dispatch, StrassenMultiplier, DEFAULT_HYBRID_THRESHOLD};
pub use strategy::Strategy;
pub use text::{
    load_matrix, parse_matrix, render_aligned, save_matrix, write_header, write_matrix, write_row,
    MAX_EXPONENT,
};
