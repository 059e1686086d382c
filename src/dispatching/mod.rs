//! Dispatching rules for process selection.
//!
//! Every non-round-robin algorithm shares one shape: at each decision point,
//! pick among the ready processes the one with the lowest rule score. The
//! algorithms differ only in which [`DispatchingRule`] they plug in.
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::dispatching::{rules, select_ready};
//! use cpu_schedule::models::Process;
//!
//! let processes = vec![Process::new("P1", 0, 5), Process::new("P2", 0, 2)];
//! assert_eq!(select_ready(&processes, 0, &rules::Spt), Some(1));
//! assert_eq!(select_ready(&processes, 0, &rules::Fifo), Some(0));
//! ```
//!
//! # Tie-breaking
//!
//! Scans run in slice order with a strict `<` comparison, so among equal
//! scores the first process scanned wins. Algorithms sort their copy by
//! arrival (stable) first: the earliest arrival wins, then input order.

pub mod rules;

use crate::models::Process;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = i64;

/// A dispatching rule that ranks ready processes.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "FIFO").
    fn name(&self) -> &'static str;

    /// Evaluates the rank of a process at the current decision point.
    fn evaluate(&self, process: &Process) -> RuleScore;

    /// Whether the arrival of `arriving` is a preemption boundary for
    /// `running`.
    ///
    /// Only consulted by preemptive algorithms. Defaults to every arrival.
    fn preempts(&self, _arriving: &Process, _running: &Process) -> bool {
        true
    }

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Returns the index of the best ready process at `time`, if any.
///
/// A process is ready when it has arrived and still has remaining work.
///
/// # Complexity
/// O(n) per call.
pub fn select_ready<R: DispatchingRule + ?Sized>(
    processes: &[Process],
    time: i64,
    rule: &R,
) -> Option<usize> {
    let mut best: Option<(usize, RuleScore)> = None;
    for (idx, process) in processes.iter().enumerate() {
        if !process.is_ready_at(time) {
            continue;
        }
        let score = rule.evaluate(process);
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Earliest arrival among processes that still have remaining work.
pub fn next_arrival(processes: &[Process]) -> Option<i64> {
    processes
        .iter()
        .filter(|p| !p.is_finished())
        .map(|p| p.arrival)
        .min()
}

/// Earliest arrival strictly after `time` that may preempt `running`.
pub fn next_preemption<R: DispatchingRule + ?Sized>(
    processes: &[Process],
    running: usize,
    time: i64,
    rule: &R,
) -> Option<i64> {
    let current = &processes[running];
    processes
        .iter()
        .enumerate()
        .filter(|&(idx, p)| idx != running && p.arrival > time && rule.preempts(p, current))
        .map(|(_, p)| p.arrival)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 5).with_priority(3),
            Process::new("P2", 1, 3).with_priority(1),
            Process::new("P3", 1, 3).with_priority(1),
            Process::new("P4", 6, 1).with_priority(0),
        ]
    }

    #[test]
    fn test_select_respects_arrival() {
        let ps = sample();
        assert_eq!(select_ready(&ps, 0, &rules::Spt), Some(0));
        assert_eq!(select_ready(&ps, 1, &rules::Spt), Some(1));
    }

    #[test]
    fn test_select_tie_first_scanned() {
        let ps = sample();
        // P2 and P3 tie on burst and priority; P2 is scanned first.
        assert_eq!(select_ready(&ps, 2, &rules::Spt), Some(1));
        assert_eq!(select_ready(&ps, 2, &rules::Priority), Some(1));
    }

    #[test]
    fn test_select_skips_finished() {
        let mut ps = sample();
        ps[1].complete(4);
        assert_eq!(select_ready(&ps, 2, &rules::Spt), Some(2));
    }

    #[test]
    fn test_select_none_ready() {
        let ps = vec![Process::new("P1", 5, 1)];
        assert_eq!(select_ready(&ps, 0, &rules::Fifo), None);
        assert_eq!(next_arrival(&ps), Some(5));
    }

    #[test]
    fn test_next_arrival_ignores_finished() {
        let mut ps = sample();
        ps[0].complete(5);
        assert_eq!(next_arrival(&ps), Some(1));
        for p in ps.iter_mut() {
            p.complete(10);
        }
        assert_eq!(next_arrival(&ps), None);
    }

    #[test]
    fn test_next_preemption_any_arrival() {
        let ps = sample();
        assert_eq!(next_preemption(&ps, 0, 0, &rules::Lwkr), Some(1));
        assert_eq!(next_preemption(&ps, 0, 1, &rules::Lwkr), Some(6));
        assert_eq!(next_preemption(&ps, 0, 6, &rules::Lwkr), None);
    }

    #[test]
    fn test_next_preemption_priority_only_higher() {
        let ps = vec![
            Process::new("P1", 0, 10).with_priority(2),
            Process::new("P2", 3, 2).with_priority(2),
            Process::new("P3", 5, 2).with_priority(1),
        ];
        // Equal priority at t=3 does not preempt.
        assert_eq!(next_preemption(&ps, 0, 0, &rules::Priority), Some(5));
    }
}
