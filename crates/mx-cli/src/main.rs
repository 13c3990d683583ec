//! `mx` - multiply square matrices and benchmark naive, Strassen and hybrid
//! multiplication.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use mx_bench::{generate_datasets, run_benchmark, BenchConfig, FileSource, GeneratorOptions};
use mx_matrix::{load_matrix, render_aligned, Strategy, DEFAULT_HYBRID_THRESHOLD};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "mx")]
#[command(about = "Square matrix multiplication: naive, Strassen and hybrid")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, value_name = "LEVEL", global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Multiply two matrix files
    Multiply(MultiplyArgs),
    /// Benchmark all three strategies over the configured datasets
    Bench(BenchArgs),
    /// Write random matrix files for the configured datasets
    Generate(GenerateArgs),
    /// Print the effective benchmark configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("strategy").args(["naive", "strassen", "hybrid"]).multiple(false)))]
struct MultiplyArgs {
    /// Use naive multiplication (default)
    #[arg(long)]
    naive: bool,

    /// Use pure Strassen multiplication
    #[arg(long)]
    strassen: bool,

    /// Use Strassen with a naive fallback below --threshold
    #[arg(long)]
    hybrid: bool,

    /// Hybrid fallback threshold
    #[arg(long, value_name = "N", default_value_t = DEFAULT_HYBRID_THRESHOLD)]
    threshold: usize,

    /// Print the resulting matrix
    #[arg(long)]
    print: bool,

    /// Align columns when printing
    #[arg(long, requires = "print")]
    aligned: bool,

    /// Print elapsed multiplication time in milliseconds
    #[arg(long)]
    time: bool,

    /// Left operand
    left: PathBuf,

    /// Right operand
    right: PathBuf,
}

impl MultiplyArgs {
    fn strategy(&self) -> Strategy {
        if self.strassen {
            Strategy::Strassen
        } else if self.hybrid {
            Strategy::Hybrid
        } else {
            Strategy::Naive
        }
    }
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of worker threads
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Hybrid fallback threshold
    #[arg(long, value_name = "N")]
    threshold: Option<usize>,
}

impl ConfigArgs {
    fn load(&self) -> Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => {
                info!("Using default configuration");
                BenchConfig::default()
            }
        };
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(threshold) = self.threshold {
            config.hybrid_threshold = threshold;
        }
        Ok(config)
    }
}

#[derive(Args, Debug)]
struct BenchArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Directory that relative dataset paths are resolved against
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Directory to write dataset files under
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Smallest cell value
    #[arg(long, default_value_t = -10, allow_hyphen_values = true)]
    min: i64,

    /// Largest cell value
    #[arg(long, default_value_t = 10, allow_hyphen_values = true)]
    max: i64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout is reserved for matrices and reports.
fn setup_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Multiply(args) => multiply(&args),
        Commands::Bench(args) => bench(&args),
        Commands::Generate(args) => generate(&args),
        Commands::Config(args) => {
            let config = args.load()?;
            print!("{}", config.to_toml_string()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn multiply(args: &MultiplyArgs) -> Result<ExitCode> {
    let left = load_matrix(&args.left)
        .with_context(|| format!("reading {}", args.left.display()))?;
    let right = load_matrix(&args.right)
        .with_context(|| format!("reading {}", args.right.display()))?;

    let strategy = args.strategy();
    let multiplier = strategy.multiplier(args.threshold);
    info!("multiplying with {}", strategy);

    let start = Instant::now();
    let product = multiplier
        .multiply(&left, &right)
        .with_context(|| format!("{} multiplication failed", strategy))?;
    let elapsed = start.elapsed();

    if args.print {
        if args.aligned {
            println!("{}", render_aligned(&product));
        } else {
            println!("{}", product);
        }
    }
    if args.time {
        println!("elapsed: {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    }
    Ok(ExitCode::SUCCESS)
}

fn bench(args: &BenchArgs) -> Result<ExitCode> {
    let config = args.config.load()?;
    let source = match &args.data_dir {
        Some(dir) => FileSource::rooted(dir),
        None => FileSource::new(),
    };

    let report = run_benchmark(&config, &source).context("benchmark failed")?;

    for row in &report.rows {
        println!("{}", row);
    }
    for failure in &report.failures {
        eprintln!("failed: {}", failure);
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn generate(args: &GenerateArgs) -> Result<ExitCode> {
    let config = args.config.load()?;
    let opts = GeneratorOptions {
        seed: args.seed,
        min_value: args.min,
        max_value: args.max,
        root: args.data_dir.clone(),
    };

    let written = generate_datasets(&config, &opts).context("generating datasets")?;
    println!("wrote {} matrix files", written.len());
    Ok(ExitCode::SUCCESS)
}
