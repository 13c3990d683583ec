use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use mx_matrix::{Matrix, MatrixError, Multiplier, Strategy};
use tracing::{debug, info, warn};

use crate::config::{BenchConfig, Dataset};
use crate::error::{BenchError, Result};
use crate::report::{BenchReport, BenchRow, DatasetFailure};
use crate::source::MatrixSource;
use crate::timing::{StrategyTimings, TimingAccumulator};

type Outcome = std::result::Result<BenchRow, DatasetFailure>;

/// Run every configured dataset through all three strategies.
///
/// A fixed pool of `config.workers` threads pulls dataset indices from a
/// bounded queue of `config.queue_capacity` and runs each dataset to
/// completion before taking the next one. The report is assembled only after
/// every worker has been joined.
///
/// A dataset that fails to load or multiply is recorded in
/// [`BenchReport::failures`]; the worker then moves on and the other
/// datasets are unaffected.
///
/// # Errors
/// Returns `Config` if the configuration is invalid, `Io` if a worker thread
/// cannot be spawned, and `WorkerPanicked` if a worker panicked.
pub fn run_benchmark(config: &BenchConfig, source: &dyn MatrixSource) -> Result<BenchReport> {
    config.validate()?;
    info!(
        workers = config.workers,
        datasets = config.datasets.len(),
        hybrid_threshold = config.hybrid_threshold,
        "starting benchmark"
    );

    let (result_tx, result_rx) = mpsc::channel::<(usize, Outcome)>();

    thread::scope(|scope| -> Result<()> {
        let (job_tx, job_rx) = mpsc::sync_channel::<usize>(config.queue_capacity);
        let job_rx = Arc::new(Mutex::new(job_rx));

        let mut handles = Vec::with_capacity(config.workers);
        for id in 0..config.workers {
            let jobs = Arc::clone(&job_rx);
            let results = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("mx-bench-{}", id))
                .spawn_scoped(scope, move || worker_loop(id, jobs, results, config, source))?;
            handles.push(handle);
        }
        // Only workers hold the receiver now, so sends fail if they all exit.
        drop(job_rx);

        for index in 0..config.datasets.len() {
            if job_tx.send(index).is_err() {
                warn!("all benchmark workers exited before the queue was drained");
                break;
            }
        }
        drop(job_tx);

        let mut panicked = None;
        for (id, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && panicked.is_none() {
                panicked = Some(id);
            }
        }
        match panicked {
            Some(id) => Err(BenchError::WorkerPanicked(id)),
            None => Ok(()),
        }
    })?;
    drop(result_tx);

    let mut outcomes: Vec<(usize, Outcome)> = result_rx.into_iter().collect();
    outcomes.sort_by_key(|(index, _)| *index);

    let mut report = BenchReport::default();
    for (_, outcome) in outcomes {
        match outcome {
            Ok(row) => report.rows.push(row),
            Err(failure) => report.failures.push(failure),
        }
    }
    Ok(report)
}

fn worker_loop(
    id: usize,
    jobs: Arc<Mutex<Receiver<usize>>>,
    results: Sender<(usize, Outcome)>,
    config: &BenchConfig,
    source: &dyn MatrixSource,
) {
    debug!(worker = id, "worker started");
    loop {
        // The lock is held only while waiting for the next index.
        let index = match jobs.lock() {
            Ok(rx) => match rx.recv() {
                Ok(index) => index,
                Err(_) => break, // queue closed
            },
            Err(_) => break,
        };

        let dataset = &config.datasets[index];
        let outcome = run_dataset(dataset, config.hybrid_threshold, source);
        match &outcome {
            Ok(row) => info!(worker = id, "dataset finished: {}", row),
            Err(failure) => warn!(worker = id, "dataset failed: {}", failure),
        }

        if results.send((index, outcome)).is_err() {
            break;
        }
    }
    debug!(worker = id, "worker stopped");
}

/// Benchmark one dataset: load each variation, time the three strategies on
/// `m x m`, and average across variations.
pub(crate) fn run_dataset(
    dataset: &Dataset,
    hybrid_threshold: usize,
    source: &dyn MatrixSource,
) -> Outcome {
    let multipliers: Vec<(Strategy, Box<dyn Multiplier>)> = Strategy::ALL
        .iter()
        .map(|&s| (s, s.multiplier(hybrid_threshold)))
        .collect();

    let mut acc = TimingAccumulator::new();
    for &variation in &dataset.variations {
        let path = dataset.path_for(variation);
        let fail = |error: MatrixError| DatasetFailure {
            exponent: dataset.exponent,
            path: path.clone(),
            error,
        };

        info!("running {}", path);
        let m = source.load(&path).map_err(fail)?;
        if m.dimension() != dataset.dimension() {
            warn!(
                "{}: expected a {}x{} matrix, loaded {}x{}",
                path,
                dataset.dimension(),
                dataset.dimension(),
                m.dimension(),
                m.dimension()
            );
        }

        let timings = time_strategies(&multipliers, &m).map_err(fail)?;
        acc.record(&timings);
    }

    Ok(BenchRow::new(dataset.exponent, &acc.average()))
}

fn time_strategies(
    multipliers: &[(Strategy, Box<dyn Multiplier>)],
    m: &Matrix,
) -> mx_matrix::Result<StrategyTimings> {
    let mut timings = StrategyTimings::default();
    for (strategy, multiplier) in multipliers {
        let start = Instant::now();
        let _product = multiplier.multiply(m, m)?;
        timings.set(*strategy, start.elapsed());
    }
    Ok(timings)
}
