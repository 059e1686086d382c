//! Run (solution) model.
//!
//! A run is the outcome of one scheduling algorithm over one process set:
//! the finished processes, the dispatch timeline and aggregate metrics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use super::{Process, TimelineEntry};

/// The scheduling disciplines supported by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First come, first served.
    Fcfs,
    /// Shortest job first, non-preemptive.
    Sjf,
    /// Shortest remaining time first (preemptive SJF).
    Srtf,
    /// Round robin with a fixed quantum.
    RoundRobin,
    /// Priority, non-preemptive.
    Priority,
    /// Priority, preemptive.
    PriorityPreemptive,
}

impl Algorithm {
    /// All algorithms, in reporting order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::RoundRobin,
        Algorithm::Priority,
        Algorithm::PriorityPreemptive,
    ];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF Non-Preemptive",
            Algorithm::Srtf => "SJF Preemptive",
            Algorithm::RoundRobin => "Round Robin",
            Algorithm::Priority => "Priority Non-Preemptive",
            Algorithm::PriorityPreemptive => "Priority Preemptive",
        }
    }

    /// File-name friendly identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf_nonpreemptive",
            Algorithm::Srtf => "sjf_preemptive",
            Algorithm::RoundRobin => "round_robin",
            Algorithm::Priority => "priority_nonpreemptive",
            Algorithm::PriorityPreemptive => "priority_preemptive",
        }
    }

    /// Whether a running process can be interrupted.
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Algorithm::Srtf | Algorithm::RoundRobin | Algorithm::PriorityPreemptive
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Aggregate waiting and turnaround statistics over finished processes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean waiting time.
    pub avg_wait: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Largest waiting time.
    pub max_wait: i64,
    /// Largest turnaround time.
    pub max_turnaround: i64,
    /// Sum of waiting times.
    pub total_wait: i64,
    /// Sum of turnaround times.
    pub total_turnaround: i64,
}

/// Raw output of one algorithm run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Algorithm that produced this run.
    pub algorithm: Algorithm,
    /// Processes with timing fields populated, in arrival order.
    pub processes: Vec<Process>,
    /// Dispatch timeline, including idle gaps.
    pub timeline: Vec<TimelineEntry>,
    /// Waiting/turnaround statistics.
    pub metrics: Metrics,
    /// Simulated time at which the last process finished.
    pub total_time: i64,
    /// Context switches recorded by this run alone.
    pub context_switches: u64,
    /// Time quantum (round robin only).
    pub quantum: Option<i64>,
}

impl RunResult {
    /// Sum of non-idle slice durations.
    pub fn busy_time(&self) -> i64 {
        self.timeline
            .iter()
            .filter(|e| !e.occupant.is_idle())
            .map(|e| e.duration)
            .sum()
    }

    /// Sum of idle slice durations.
    pub fn idle_time(&self) -> i64 {
        self.timeline
            .iter()
            .filter(|e| e.occupant.is_idle())
            .map(|e| e.duration)
            .sum()
    }

    /// Finds a process by pid.
    pub fn process(&self, pid: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Pids in dispatch order, one per busy slice.
    pub fn dispatch_order(&self) -> Vec<&str> {
        self.timeline
            .iter()
            .filter_map(|e| e.occupant.pid())
            .collect()
    }
}

/// A run augmented with throughput, CPU efficiency and, when executed by the
/// concurrent runner, its wall-clock duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// The underlying run.
    pub result: RunResult,
    /// Horizon → number of processes completed by that time.
    pub throughput: BTreeMap<i64, usize>,
    /// Useful CPU time as a percentage of elapsed time plus switch overhead.
    pub cpu_efficiency: f64,
    /// Wall-clock execution time of the algorithm.
    pub execution_time: Option<Duration>,
}

impl RunReport {
    /// Completed count at a horizon (0 if the horizon was not requested).
    pub fn throughput_at(&self, horizon: i64) -> usize {
        self.throughput.get(&horizon).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> RunResult {
        RunResult {
            algorithm: Algorithm::Fcfs,
            processes: vec![Process::new("P1", 2, 3)],
            timeline: vec![TimelineEntry::idle(0, 2), TimelineEntry::busy(2, "P1", 3)],
            metrics: Metrics::default(),
            total_time: 5,
            context_switches: 1,
            quantum: None,
        }
    }

    #[test]
    fn test_busy_and_idle_time() {
        let r = sample_result();
        assert_eq!(r.busy_time(), 3);
        assert_eq!(r.idle_time(), 2);
        assert_eq!(r.dispatch_order(), vec!["P1"]);
        assert!(r.process("P1").is_some());
        assert!(r.process("P9").is_none());
    }

    #[test]
    fn test_algorithm_names_unique() {
        let mut slugs: Vec<_> = Algorithm::ALL.iter().map(|a| a.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), 6);
        assert_eq!(Algorithm::RoundRobin.to_string(), "Round Robin");
    }

    #[test]
    fn test_preemptive_classification() {
        assert!(!Algorithm::Fcfs.is_preemptive());
        assert!(!Algorithm::Priority.is_preemptive());
        assert!(Algorithm::Srtf.is_preemptive());
        assert!(Algorithm::RoundRobin.is_preemptive());
    }

    #[test]
    fn test_throughput_at_missing_horizon() {
        let report = RunReport {
            result: sample_result(),
            throughput: BTreeMap::from([(50, 1)]),
            cpu_efficiency: 60.0,
            execution_time: None,
        };
        assert_eq!(report.throughput_at(50), 1);
        assert_eq!(report.throughput_at(100), 0);
    }
}
