use std::path::Path;

use mx_matrix::{DEFAULT_HYBRID_THRESHOLD, MAX_EXPONENT};
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};

/// Path template used by the default datasets.
pub const DEFAULT_PATH_TEMPLATE: &str = "gen_matrix/ex_{exponent}.{variation}";

/// A group of same-size matrix files benchmarked together and averaged.
///
/// `path_template` may contain `{exponent}` and `{variation}`, which
/// [`Dataset::path_for`] substitutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub path_template: String,
    /// Matrix side is `2^exponent`.
    pub exponent: u32,
    /// Distinct file instances of this size.
    pub variations: Vec<u32>,
}

impl Dataset {
    pub fn new(path_template: impl Into<String>, exponent: u32, variations: Vec<u32>) -> Self {
        Dataset {
            path_template: path_template.into(),
            exponent,
            variations,
        }
    }

    /// Returns the file path for one variation.
    pub fn path_for(&self, variation: u32) -> String {
        self.path_template
            .replace("{exponent}", &self.exponent.to_string())
            .replace("{variation}", &variation.to_string())
    }

    /// Matrix side length, `2^exponent`.
    pub fn dimension(&self) -> usize {
        1usize << self.exponent
    }
}

/// Benchmark configuration.
///
/// Every field has a default, so a TOML file only needs to name what it
/// changes:
///
/// ```toml
/// workers = 2
/// hybrid_threshold = 32
///
/// [[datasets]]
/// path_template = "data/m_{exponent}_{variation}.txt"
/// exponent = 6
/// variations = [1, 2, 3]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of worker threads.
    pub workers: usize,
    /// Capacity of the bounded dataset queue.
    pub queue_capacity: usize,
    /// Side length below which the hybrid strategy uses naive multiplication.
    pub hybrid_threshold: usize,
    pub datasets: Vec<Dataset>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            workers: 4,
            queue_capacity: 1000,
            hybrid_threshold: DEFAULT_HYBRID_THRESHOLD,
            datasets: (5..=12)
                .map(|e| Dataset::new(DEFAULT_PATH_TEMPLATE, e, (1..=5).collect()))
                .collect(),
        }
    }
}

impl BenchConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<BenchConfig> {
        toml::from_str(s).map_err(|e| BenchError::Config(e.to_string()))
    }

    /// Read a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<BenchConfig> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| BenchError::Config(e.to_string()))
    }

    /// Checks the configuration before any worker starts.
    ///
    /// # Errors
    /// Returns `Config` for zero workers, zero queue capacity, a dataset with
    /// no variations, an exponent above `MAX_EXPONENT`, or a dataset with
    /// several variations whose template has no `{variation}` placeholder.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(BenchError::Config("workers must be > 0".to_string()));
        }
        if self.queue_capacity == 0 {
            return Err(BenchError::Config("queue_capacity must be > 0".to_string()));
        }
        for d in &self.datasets {
            if d.variations.is_empty() {
                return Err(BenchError::Config(format!(
                    "dataset '{}' (exponent {}) has no variations",
                    d.path_template, d.exponent
                )));
            }
            if d.exponent > MAX_EXPONENT {
                return Err(BenchError::Config(format!(
                    "dataset '{}': exponent {} exceeds maximum {}",
                    d.path_template, d.exponent, MAX_EXPONENT
                )));
            }
            if d.variations.len() > 1 && !d.path_template.contains("{variation}") {
                return Err(BenchError::Config(format!(
                    "dataset '{}' has {} variations but no {{variation}} placeholder",
                    d.path_template,
                    d.variations.len()
                )));
            }
        }
        Ok(())
    }
}
