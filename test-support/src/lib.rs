// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! A tiny helper for testing convenience.

use slog::{o, Drain};

/// Create a simple `slog` logger for use in test programs.
///
/// It logs to the terminal using default parameters, as per the `slog` basic
/// example. This just saves us ~8 lines of boilerplate in all of our
/// test/demo programs.
pub fn default_log() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain)
        .overflow_strategy(slog_async::OverflowStrategy::Block)
        .build()
        .fuse();
    slog::Logger::root(drain, o!())
}

/// A logger that throws everything away, for tests that don't care.
pub fn quiet_log() -> slog::Logger {
    slog::Logger::root(slog::Discard, o!())
}

/// `n` values spaced evenly in log10 between `10^lo` and `10^hi`, inclusive.
///
/// This is the photon-energy grid that the spectral fitting code usually
/// hands us.
pub fn logspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }

    if n == 1 {
        return vec![10_f64.powf(lo)];
    }

    let span = hi - lo;
    let last = (n - 1) as f64;
    (0..n)
        .map(|i| 10_f64.powf(lo + span * i as f64 / last))
        .collect()
}

/// A simple utility for sampling random numbers.
///
/// The distribution can be uniform or log-uniform.
pub struct Sampler {
    is_log: bool,
    low: f64,
    range: f64,
}

impl Sampler {
    /// Create a new Sampler.
    pub fn new(is_log: bool, mut low: f64, mut high: f64) -> Self {
        if low > high {
            std::mem::swap(&mut low, &mut high);
        }

        if is_log {
            low = low.ln();
            high = high.ln();
        }

        Sampler {
            is_log,
            low,
            range: high - low,
        }
    }

    /// Sample a number from the distribution.
    pub fn get(&self) -> f64 {
        let n = self.low + rand::random::<f64>() * self.range;

        if self.is_log {
            n.exp()
        } else {
            n
        }
    }
}
