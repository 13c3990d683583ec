use std::time::Duration;

use mx_matrix::Strategy;

/// One duration per strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategyTimings {
    pub naive: Duration,
    pub strassen: Duration,
    pub hybrid: Duration,
}

impl StrategyTimings {
    pub fn get(&self, strategy: Strategy) -> Duration {
        match strategy {
            Strategy::Naive => self.naive,
            Strategy::Strassen => self.strassen,
            Strategy::Hybrid => self.hybrid,
        }
    }

    pub fn set(&mut self, strategy: Strategy, d: Duration) {
        match strategy {
            Strategy::Naive => self.naive = d,
            Strategy::Strassen => self.strassen = d,
            Strategy::Hybrid => self.hybrid = d,
        }
    }
}

/// Sums per-variation timings for one dataset.
///
/// Owned by the worker running the dataset; never shared.
#[derive(Debug, Clone, Default)]
pub struct TimingAccumulator {
    totals: [u128; 3],
    count: u64,
}

impl TimingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one variation's measurements.
    pub fn record(&mut self, timings: &StrategyTimings) {
        for (i, s) in Strategy::ALL.iter().enumerate() {
            self.totals[i] += timings.get(*s).as_nanos();
        }
        self.count += 1;
    }

    /// Per-strategy mean: each total divided by the variation count,
    /// truncated to whole nanoseconds. Zero when nothing was recorded.
    pub fn average(&self) -> StrategyTimings {
        let mut out = StrategyTimings::default();
        if self.count == 0 {
            return out;
        }
        for (i, s) in Strategy::ALL.iter().enumerate() {
            let mean = self.totals[i] / self.count as u128;
            out.set(*s, Duration::from_nanos(mean.min(u64::MAX as u128) as u64));
        }
        out
    }
}
