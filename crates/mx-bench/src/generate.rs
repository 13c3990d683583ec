use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use mx_matrix::{write_header, write_row};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::BenchConfig;
use crate::error::{BenchError, Result};

/// Options for [`generate_datasets`].
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Base seed. Each file derives its own seed from this, the exponent and
    /// the variation, so reruns reproduce the same files.
    pub seed: u64,
    /// Smallest cell value (inclusive).
    pub min_value: i64,
    /// Largest cell value (inclusive).
    pub max_value: i64,
    /// Directory that relative dataset paths are written under.
    pub root: Option<PathBuf>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            seed: 0,
            min_value: -10,
            max_value: 10,
            root: None,
        }
    }
}

/// Write a random integer matrix file for every (dataset, variation) pair in
/// `config`, creating parent directories as needed.
///
/// Returns the paths that were written, in configuration order.
pub fn generate_datasets(config: &BenchConfig, opts: &GeneratorOptions) -> Result<Vec<PathBuf>> {
    config.validate()?;
    if opts.min_value > opts.max_value {
        return Err(BenchError::Config(format!(
            "min_value {} is greater than max_value {}",
            opts.min_value, opts.max_value
        )));
    }

    let mut written = Vec::new();
    for dataset in &config.datasets {
        let n = dataset.dimension();
        for &variation in &dataset.variations {
            let rel = dataset.path_for(variation);
            let path = match &opts.root {
                Some(root) => root.join(&rel),
                None => PathBuf::from(&rel),
            };

            let seed = opts.seed ^ (u64::from(dataset.exponent) << 32 | u64::from(variation));
            create_parent(&path)?;
            write_random_matrix(&path, dataset.exponent, seed, opts.min_value, opts.max_value)?;
            info!("generated {} ({}x{})", path.display(), n, n);
            written.push(path);
        }
    }
    Ok(written)
}

/// Streams the file row by row; only one row is held in memory.
fn write_random_matrix(path: &Path, exponent: u32, seed: u64, min: i64, max: i64) -> Result<()> {
    let n = 1usize << exponent;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut writer = BufWriter::new(File::create(path)?);
    write_header(&mut writer, exponent)?;

    let mut row = vec![0.0; n];
    for _ in 0..n {
        for cell in row.iter_mut() {
            *cell = rng.gen_range(min..=max) as f64;
        }
        write_row(&mut writer, &row)?;
    }
    writer.flush()?;
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dataset;
    use crate::harness::run_benchmark;
    use crate::source::FileSource;
    use mx_matrix::{load_matrix, Matrix, MAX_EXPONENT};

    fn small_config() -> BenchConfig {
        BenchConfig {
            workers: 2,
            queue_capacity: 4,
            hybrid_threshold: 4,
            datasets: vec![
                Dataset::new("gen/ex_{exponent}.{variation}", 1, vec![1, 2]),
                Dataset::new("gen/ex_{exponent}.{variation}", 3, vec![1, 2]),
            ],
        }
    }

    #[test]
    fn test_generates_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let opts = GeneratorOptions {
            root: Some(dir.path().to_path_buf()),
            ..GeneratorOptions::default()
        };
        let paths = generate_datasets(&small_config(), &opts).unwrap();
        assert_eq!(paths.len(), 4);
        assert_eq!(paths[2], dir.path().join("gen/ex_3.1"));

        let m = load_matrix(&paths[2]).unwrap();
        assert_eq!(m.dimension(), 8);
        assert!(m.as_slice().iter().all(|v| (-10.0..=10.0).contains(v)));
    }

    #[test]
    fn test_streamed_file_matches_seeded_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ex_2");
        write_random_matrix(&path, 2, 7, -3, 3).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let data = (0..16).map(|_| rng.gen_range(-3..=3i64) as f64).collect();
        let expected = Matrix::from_vec(4, data).unwrap();
        assert_eq!(load_matrix(&path).unwrap(), expected);
    }

    #[test]
    fn test_same_seed_same_files() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let opts = |root: &Path| GeneratorOptions {
            seed: 99,
            root: Some(root.to_path_buf()),
            ..GeneratorOptions::default()
        };
        let pa = generate_datasets(&small_config(), &opts(a.path())).unwrap();
        let pb = generate_datasets(&small_config(), &opts(b.path())).unwrap();
        for (x, y) in pa.iter().zip(pb.iter()) {
            assert_eq!(load_matrix(x).unwrap(), load_matrix(y).unwrap());
        }
        // variations of the same size differ
        assert_ne!(load_matrix(&pa[2]).unwrap(), load_matrix(&pa[3]).unwrap());
    }

    #[test]
    fn test_rejects_exponent_past_parse_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config();
        config.datasets = vec![Dataset::new("gen/ex_{exponent}", MAX_EXPONENT + 1, vec![1])];
        let opts = GeneratorOptions {
            root: Some(dir.path().to_path_buf()),
            ..GeneratorOptions::default()
        };

        assert!(matches!(config.validate(), Err(BenchError::Config(_))));
        assert!(matches!(
            generate_datasets(&config, &opts),
            Err(BenchError::Config(_))
        ));
        assert!(!dir.path().join("gen").exists());

        config.datasets = vec![Dataset::new("gen/ex_{exponent}", MAX_EXPONENT, vec![1])];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let opts = GeneratorOptions {
            min_value: 5,
            max_value: 1,
            ..GeneratorOptions::default()
        };
        assert!(matches!(
            generate_datasets(&small_config(), &opts),
            Err(BenchError::Config(_))
        ));
    }

    #[test]
    fn test_generate_then_benchmark_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config();
        let opts = GeneratorOptions {
            root: Some(dir.path().to_path_buf()),
            ..GeneratorOptions::default()
        };
        generate_datasets(&config, &opts).unwrap();

        let report = run_benchmark(&config, &FileSource::rooted(dir.path())).unwrap();
        assert!(report.is_success());
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].exponent, 1);
        assert_eq!(report.rows[1].exponent, 3);
    }

    #[test]
    fn test_malformed_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config();
        let opts = GeneratorOptions {
            root: Some(dir.path().to_path_buf()),
            ..GeneratorOptions::default()
        };
        generate_datasets(&config, &opts).unwrap();
        std::fs::write(dir.path().join("gen/ex_1.2"), "1\n1\t2\t3\n3\t4\n").unwrap();

        let report = run_benchmark(&config, &FileSource::rooted(dir.path())).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].exponent, 3);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            mx_matrix::MatrixError::Format { line: 2, .. }
        ));
    }
}
