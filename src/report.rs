//! Speedup derivation and benchmark table rows
//!
//! Reporting-layer computations over the elapsed times produced by the
//! engine. Nothing here is engine state; the CLI driver builds rows from the
//! timings it collects.

use std::fmt;

use crate::Schedule;

/// Ratio of a baseline elapsed time to a comparison elapsed time
///
/// Greater than 1.0 means the comparison run was faster than the baseline.
pub fn speedup(baseline_secs: f64, elapsed_secs: f64) -> f64 {
    baseline_secs / elapsed_secs
}

/// One benchmark observation: a (size, threads, schedule) cell of the report
///
/// Carries the elapsed time plus the two derived ratios: speedup against the
/// sequential ("linear") baseline and against the single-thread parallel
/// baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchRecord {
    /// Matrix dimension n
    pub size: usize,
    /// Worker threads used
    pub threads: usize,
    /// Scheduling policy used
    pub schedule: Schedule,
    /// Elapsed wall-clock seconds of the multiply
    pub elapsed_secs: f64,
    /// `T_lin / T_p`
    pub speedup_vs_linear: f64,
    /// `T_1 / T_p`
    pub speedup_vs_single: f64,
}

impl BenchRecord {
    /// Builds a record from an observation and its two baselines
    pub fn new(
        size: usize,
        threads: usize,
        schedule: Schedule,
        elapsed_secs: f64,
        linear_secs: f64,
        single_thread_secs: f64,
    ) -> Self {
        BenchRecord {
            size,
            threads,
            schedule,
            elapsed_secs,
            speedup_vs_linear: speedup(linear_secs, elapsed_secs),
            speedup_vs_single: speedup(single_thread_secs, elapsed_secs),
        }
    }
}

impl fmt::Display for BenchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} {:>7} {:>12.6}s {:>12.2}x {:>12.2}x",
            self.schedule,
            self.threads,
            self.elapsed_secs,
            self.speedup_vs_linear,
            self.speedup_vs_single
        )
    }
}
