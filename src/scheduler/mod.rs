//! CPU scheduling algorithms and run analysis.
//!
//! [`Scheduler`] exposes six classical disciplines over a fixed process set:
//!
//! | Algorithm | Family | Rule |
//! |-----------|--------|------|
//! | FCFS | non-preemptive | FIFO |
//! | SJF | non-preemptive | SPT |
//! | Priority | non-preemptive | PRIORITY |
//! | SRTF | preemptive | LWKR |
//! | Priority (preemptive) | preemptive | PRIORITY |
//! | Round Robin | time-sliced | quantum |
//!
//! Each invocation works on its own copy of the input and owns its own
//! context-switch counter, returned in the [`RunResult`]. A `Scheduler` holds
//! no mutable state, so one instance can serve concurrent runs.
//!
//! # Context switch accounting
//!
//! - Non-preemptive: one per dispatch.
//! - Preemptive: one per hand-off to a different process, plus one trailing
//!   switch per run.
//! - Round robin: one per dispatch, including redispatch of the same process.
//!
//! The count feeds the CPU-efficiency figure.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne, "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

mod metrics;
mod non_preemptive;
mod preemptive;
mod round_robin;

pub use metrics::{calculate_cpu_efficiency, calculate_metrics, calculate_throughput};

use std::time::Duration;

use log::{debug, warn};

use crate::config::{DEFAULT_SWITCH_COST, SimulationConfig};
use crate::dispatching::rules;
use crate::models::{Algorithm, Process, RunReport, RunResult, TimelineEntry};
use non_preemptive::run_to_completion;
use preemptive::run_preemptive;
use round_robin::run_round_robin;

/// Context-switch counter owned by a single run.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SwitchCounter(u64);

impl SwitchCounter {
    #[inline]
    pub(crate) fn record(&mut self) {
        self.0 += 1;
    }

    #[inline]
    pub(crate) fn count(&self) -> u64 {
        self.0
    }
}

/// Output of a simulation loop, before metrics are attached.
pub(crate) struct Trace {
    pub processes: Vec<Process>,
    pub timeline: Vec<TimelineEntry>,
    pub total_time: i64,
    pub switches: SwitchCounter,
}

/// Fresh per-run copy of the input, sorted by arrival (stable).
///
/// Result fields are reset so a caller may pass processes from a previous run.
pub(crate) fn prepare(processes: &[Process]) -> Vec<Process> {
    let mut procs: Vec<Process> = processes
        .iter()
        .map(|p| Process::new(p.pid.clone(), p.arrival, p.burst).with_priority(p.priority))
        .collect();
    procs.sort_by_key(|p| p.arrival);
    procs
}

/// CPU scheduling engine.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::Process;
/// use cpu_schedule::scheduler::Scheduler;
///
/// let processes = vec![
///     Process::new("P1", 0, 5),
///     Process::new("P2", 1, 3),
///     Process::new("P3", 2, 1),
/// ];
/// let scheduler = Scheduler::new();
/// let run = scheduler.round_robin(&processes, 4);
///
/// assert_eq!(run.dispatch_order(), vec!["P1", "P2", "P3", "P1"]);
/// assert_eq!(run.total_time, 9);
/// assert_eq!(run.context_switches, 4);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    switch_cost: f64,
}

impl Scheduler {
    /// Creates a scheduler with the default switch cost.
    pub fn new() -> Self {
        Self {
            switch_cost: DEFAULT_SWITCH_COST,
        }
    }

    /// Creates a scheduler using the switch cost from `config`.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new().with_switch_cost(config.switch_cost)
    }

    /// Sets the cost of one context switch, in time units.
    pub fn with_switch_cost(mut self, switch_cost: f64) -> Self {
        self.switch_cost = switch_cost;
        self
    }

    /// Cost of one context switch, in time units.
    pub fn switch_cost(&self) -> f64 {
        self.switch_cost
    }

    /// First come, first served.
    pub fn fcfs(&self, processes: &[Process]) -> RunResult {
        finish(Algorithm::Fcfs, run_to_completion(processes, &rules::Fifo), None)
    }

    /// Shortest job first, non-preemptive.
    pub fn sjf(&self, processes: &[Process]) -> RunResult {
        finish(Algorithm::Sjf, run_to_completion(processes, &rules::Spt), None)
    }

    /// Shortest remaining time first.
    pub fn srtf(&self, processes: &[Process]) -> RunResult {
        finish(Algorithm::Srtf, run_preemptive(processes, &rules::Lwkr), None)
    }

    /// Priority, non-preemptive (lower value runs first).
    pub fn priority(&self, processes: &[Process]) -> RunResult {
        finish(
            Algorithm::Priority,
            run_to_completion(processes, &rules::Priority),
            None,
        )
    }

    /// Priority, preemptive (lower value runs first).
    pub fn priority_preemptive(&self, processes: &[Process]) -> RunResult {
        finish(
            Algorithm::PriorityPreemptive,
            run_preemptive(processes, &rules::Priority),
            None,
        )
    }

    /// Round robin with the given quantum.
    ///
    /// A quantum below 1 is raised to 1.
    pub fn round_robin(&self, processes: &[Process], quantum: i64) -> RunResult {
        let quantum = if quantum < 1 {
            warn!("Round robin quantum {quantum} is not positive, using 1");
            1
        } else {
            quantum
        };
        finish(
            Algorithm::RoundRobin,
            run_round_robin(processes, quantum),
            Some(quantum),
        )
    }

    /// Runs the given algorithm. `quantum` is used by round robin only.
    pub fn run(&self, algorithm: Algorithm, processes: &[Process], quantum: i64) -> RunResult {
        match algorithm {
            Algorithm::Fcfs => self.fcfs(processes),
            Algorithm::Sjf => self.sjf(processes),
            Algorithm::Srtf => self.srtf(processes),
            Algorithm::RoundRobin => self.round_robin(processes, quantum),
            Algorithm::Priority => self.priority(processes),
            Algorithm::PriorityPreemptive => self.priority_preemptive(processes),
        }
    }

    /// CPU efficiency of a run, using this scheduler's switch cost.
    pub fn cpu_efficiency(
        &self,
        processes: &[Process],
        total_time: i64,
        context_switches: u64,
    ) -> f64 {
        calculate_cpu_efficiency(processes, total_time, context_switches, self.switch_cost)
    }

    /// Attaches throughput and CPU efficiency to a finished run.
    ///
    /// Shared by the sequential and concurrent paths so both report
    /// identically.
    pub fn analyze(
        &self,
        result: RunResult,
        horizons: &[i64],
        execution_time: Option<Duration>,
    ) -> RunReport {
        let throughput = calculate_throughput(&result.processes, horizons);
        let cpu_efficiency =
            self.cpu_efficiency(&result.processes, result.total_time, result.context_switches);
        RunReport {
            result,
            throughput,
            cpu_efficiency,
            execution_time,
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn finish(algorithm: Algorithm, trace: Trace, quantum: Option<i64>) -> RunResult {
    let metrics = calculate_metrics(&trace.processes);
    debug!(
        "{}: {} processes, total time {}, {} context switches",
        algorithm,
        trace.processes.len(),
        trace.total_time,
        trace.switches.count()
    );
    RunResult {
        algorithm,
        processes: trace.processes,
        timeline: trace.timeline,
        metrics,
        total_time: trace.total_time,
        context_switches: trace.switches.count(),
        quantum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scenario() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 5),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 1),
        ]
    }

    fn waits(run: &RunResult) -> Vec<(&str, i64)> {
        run.processes
            .iter()
            .map(|p| (p.pid.as_str(), p.waiting_time.unwrap()))
            .collect()
    }

    fn random_processes(rng: &mut StdRng, n: usize) -> Vec<Process> {
        (0..n)
            .map(|i| {
                Process::new(
                    format!("P{}", i + 1),
                    rng.random_range(0..30),
                    rng.random_range(1..12),
                )
                .with_priority(rng.random_range(0..5))
            })
            .collect()
    }

    fn assert_invariants(run: &RunResult, input: &[Process]) {
        let name = run.algorithm.name();
        assert_eq!(run.processes.len(), input.len(), "{name}");

        for p in &run.processes {
            let completion = p.completion_time.expect("finished");
            let turnaround = p.turnaround_time.expect("turnaround");
            let waiting = p.waiting_time.expect("waiting");
            assert_eq!(p.remaining, 0, "{name}: {}", p.pid);
            assert_eq!(turnaround, completion - p.arrival, "{name}: {}", p.pid);
            assert_eq!(waiting, turnaround - p.burst, "{name}: {}", p.pid);
            assert!(waiting >= 0, "{name}: {}", p.pid);
            if let Some(response) = p.response_time {
                assert!(response <= waiting, "{name}: {}", p.pid);
            }
            let last_end = run
                .timeline
                .iter()
                .filter(|e| e.occupant.pid() == Some(p.pid.as_str()))
                .map(|e| e.end())
                .max();
            assert_eq!(last_end, Some(completion), "{name}: {}", p.pid);
        }

        let total_burst: i64 = input.iter().map(|p| p.burst).sum();
        assert_eq!(run.busy_time(), total_burst, "{name}");
        assert_eq!(run.busy_time() + run.idle_time(), run.total_time, "{name}");

        let mut expected_start = 0;
        for entry in &run.timeline {
            assert_eq!(entry.start, expected_start, "{name}: gap in timeline");
            assert!(entry.duration > 0, "{name}: empty slice");
            expected_start = entry.end();
        }
    }

    #[test]
    fn test_fcfs_scenario() {
        let run = Scheduler::new().fcfs(&scenario());
        let completions: Vec<_> = run
            .processes
            .iter()
            .map(|p| p.completion_time.unwrap())
            .collect();
        assert_eq!(completions, vec![5, 8, 9]);
        assert_eq!(waits(&run), vec![("P1", 0), ("P2", 4), ("P3", 6)]);
        assert_eq!(run.total_time, 9);
        assert_eq!(run.context_switches, 3);
        assert!(run.processes.iter().all(|p| p.response_time.is_none()));
    }

    #[test]
    fn test_sjf_scenario() {
        let run = Scheduler::new().sjf(&scenario());
        assert_eq!(run.dispatch_order(), vec!["P1", "P3", "P2"]);
        assert_eq!(waits(&run), vec![("P1", 0), ("P2", 5), ("P3", 3)]);
        assert_eq!(run.total_time, 9);
    }

    #[test]
    fn test_round_robin_scenario() {
        let run = Scheduler::new().round_robin(&scenario(), 4);
        let slices: Vec<_> = run
            .timeline
            .iter()
            .map(|e| (e.occupant.to_string(), e.start, e.end()))
            .collect();
        assert_eq!(
            slices,
            vec![
                ("P1".to_string(), 0, 4),
                ("P2".to_string(), 4, 7),
                ("P3".to_string(), 7, 8),
                ("P1".to_string(), 8, 9),
            ]
        );
        assert_eq!(waits(&run), vec![("P1", 4), ("P2", 3), ("P3", 5)]);
        assert_eq!(run.total_time, 9);
        assert_eq!(run.context_switches, 4);
        assert_eq!(run.quantum, Some(4));
    }

    #[test]
    fn test_srtf_scenario() {
        let run = Scheduler::new().srtf(&scenario());
        // P1 runs 0-1, P2 1-2, P3 2-3, P2 3-5, P1 5-9
        assert_eq!(run.process("P3").unwrap().completion_time, Some(3));
        assert_eq!(run.process("P2").unwrap().completion_time, Some(5));
        assert_eq!(run.process("P1").unwrap().completion_time, Some(9));
        assert_eq!(run.process("P1").unwrap().response_time, Some(0));
        // hand-offs P1→P2, P2→P3, P3→P2, P2→P1 plus trailing
        assert_eq!(run.context_switches, 5);
    }

    #[test]
    fn test_priority_variants() {
        let ps = vec![
            Process::new("P1", 0, 4).with_priority(2),
            Process::new("P2", 1, 2).with_priority(0),
            Process::new("P3", 2, 1).with_priority(1),
        ];
        let scheduler = Scheduler::new();

        let np = scheduler.priority(&ps);
        assert_eq!(np.dispatch_order(), vec!["P1", "P2", "P3"]);

        let pp = scheduler.priority_preemptive(&ps);
        assert_eq!(pp.dispatch_order(), vec!["P1", "P2", "P3", "P1"]);
        assert_eq!(pp.process("P2").unwrap().completion_time, Some(3));
        assert_eq!(pp.process("P3").unwrap().completion_time, Some(4));
        assert_eq!(pp.process("P1").unwrap().completion_time, Some(7));
    }

    #[test]
    fn test_tie_break_input_order() {
        let ps = vec![Process::new("B", 0, 3), Process::new("A", 0, 3)];
        let run = Scheduler::new().sjf(&ps);
        assert_eq!(run.dispatch_order(), vec!["B", "A"]);
    }

    #[test]
    fn test_unsorted_input() {
        let ps = vec![Process::new("late", 5, 1), Process::new("early", 0, 2)];
        let run = Scheduler::new().fcfs(&ps);
        assert_eq!(run.processes[0].pid, "early");
        assert_eq!(run.dispatch_order(), vec!["early", "late"]);
        assert!(run.timeline[1].occupant.is_idle());
    }

    #[test]
    fn test_empty_input() {
        let scheduler = Scheduler::new();
        for algorithm in Algorithm::ALL {
            let run = scheduler.run(algorithm, &[], 4);
            assert!(run.processes.is_empty());
            assert!(run.timeline.is_empty());
            assert_eq!(run.total_time, 0);
            assert_eq!(run.metrics.total_wait, 0);

            let report = scheduler.analyze(run, &[50, 100], None);
            assert_eq!(report.cpu_efficiency, 0.0);
            assert_eq!(report.throughput_at(50), 0);
        }
    }

    #[test]
    fn test_non_positive_burst_terminates() {
        let scheduler = Scheduler::new();
        let input = vec![
            Process::new("P1", 0, -1),
            Process::new("P2", 2, 3),
            Process::new("P3", 4, 0),
        ];
        for algorithm in Algorithm::ALL {
            let run = scheduler.run(algorithm, &input, 2);
            assert_eq!(run.dispatch_order().first(), Some(&"P2"), "{algorithm}");
            assert!(run.dispatch_order().iter().all(|&pid| pid == "P2"), "{algorithm}");
            assert_eq!(run.total_time, 5, "{algorithm}");
            assert_eq!(run.busy_time(), 3, "{algorithm}");
            assert!(run.process("P1").unwrap().completion_time.is_none());
            assert!(run.process("P3").unwrap().completion_time.is_none());
            assert_eq!(run.metrics.total_wait, 0, "{algorithm}");
        }
    }

    #[test]
    fn test_analyze() {
        let scheduler = Scheduler::new();
        let report = scheduler.analyze(scheduler.fcfs(&scenario()), &[5, 8, 100], None);
        assert_eq!(report.throughput_at(5), 1);
        assert_eq!(report.throughput_at(8), 2);
        assert_eq!(report.throughput_at(100), 3);
        // 9 burst over 9 time units + 3 switches * 0.001
        assert!((report.cpu_efficiency - 900.0 / 9.003).abs() < 1e-9);
    }

    #[test]
    fn test_round_robin_clamps_quantum() {
        let run = Scheduler::new().round_robin(&[Process::new("P1", 0, 2)], 0);
        assert_eq!(run.quantum, Some(1));
        assert_eq!(run.timeline.len(), 2);
    }

    #[test]
    fn test_reuse_finished_processes() {
        let scheduler = Scheduler::new();
        let first = scheduler.fcfs(&scenario());
        let second = scheduler.sjf(&first.processes);
        assert_eq!(second.dispatch_order(), vec!["P1", "P3", "P2"]);
        assert_eq!(second.total_time, 9);
    }

    #[test]
    fn test_random_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        let scheduler = Scheduler::new();
        for round in 0..50 {
            let n = rng.random_range(1..15);
            let ps = random_processes(&mut rng, n);
            for algorithm in Algorithm::ALL {
                let quantum = 1 + round % 5;
                let run = scheduler.run(algorithm, &ps, quantum);
                assert_invariants(&run, &ps);

                let report = scheduler.analyze(run, &[10, 20, 40, 80, 160], None);
                let counts: Vec<_> = report.throughput.values().copied().collect();
                assert!(counts.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }

    #[test]
    fn test_response_time_only_for_preemptive() {
        let mut rng = StdRng::seed_from_u64(7);
        let ps = random_processes(&mut rng, 10);
        let scheduler = Scheduler::new();
        for algorithm in Algorithm::ALL {
            let run = scheduler.run(algorithm, &ps, 3);
            let all_set = run.processes.iter().all(|p| p.response_time.is_some());
            let none_set = run.processes.iter().all(|p| p.response_time.is_none());
            if algorithm.is_preemptive() {
                assert!(all_set, "{algorithm}");
            } else {
                assert!(none_set, "{algorithm}");
            }
        }
    }
}
