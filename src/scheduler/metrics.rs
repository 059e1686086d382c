//! Run quality metrics.
//!
//! Computes the figures attached to every run, independent of the algorithm
//! that produced it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg/Max/Total Wait | Over `turnaround - burst` |
//! | Avg/Max/Total Turnaround | Over `completion - arrival` |
//! | Throughput(T) | Processes with `completion <= T` |
//! | CPU Efficiency | `100 * total_burst / (total_time + switches * switch_cost)` |
//!
//! Unfinished processes are ignored, and an empty set yields zeros.

use std::collections::BTreeMap;

use crate::models::{Metrics, Process};

/// Computes waiting and turnaround statistics over finished processes.
pub fn calculate_metrics(processes: &[Process]) -> Metrics {
    let mut total_wait: i64 = 0;
    let mut total_turnaround: i64 = 0;
    let mut max_wait: i64 = 0;
    let mut max_turnaround: i64 = 0;
    let mut counted: usize = 0;

    for p in processes {
        if let (Some(wait), Some(turnaround)) = (p.waiting_time, p.turnaround_time) {
            if counted == 0 {
                max_wait = wait;
                max_turnaround = turnaround;
            } else {
                max_wait = max_wait.max(wait);
                max_turnaround = max_turnaround.max(turnaround);
            }
            total_wait += wait;
            total_turnaround += turnaround;
            counted += 1;
        }
    }

    if counted == 0 {
        return Metrics::default();
    }

    Metrics {
        avg_wait: total_wait as f64 / counted as f64,
        avg_turnaround: total_turnaround as f64 / counted as f64,
        max_wait,
        max_turnaround,
        total_wait,
        total_turnaround,
    }
}

/// Counts processes completed by each horizon.
///
/// Every requested horizon is present in the result, even when nothing
/// finished by then.
pub fn calculate_throughput(processes: &[Process], horizons: &[i64]) -> BTreeMap<i64, usize> {
    horizons
        .iter()
        .map(|&horizon| {
            let completed = processes
                .iter()
                .filter(|p| p.completion_time.is_some_and(|c| c <= horizon))
                .count();
            (horizon, completed)
        })
        .collect()
}

/// CPU efficiency as a percentage.
///
/// Returns `0.0` when `total_time <= 0`.
pub fn calculate_cpu_efficiency(
    processes: &[Process],
    total_time: i64,
    context_switches: u64,
    switch_cost: f64,
) -> f64 {
    if total_time <= 0 {
        return 0.0;
    }
    let total_burst: i64 = processes.iter().map(|p| p.burst).sum();
    let overhead = context_switches as f64 * switch_cost;
    100.0 * total_burst as f64 / (total_time as f64 + overhead)
}
