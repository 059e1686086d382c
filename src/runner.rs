//! Multi-algorithm execution.
//!
//! Runs all six algorithms over one process set, either one after another
//! ([`run_sequential`]) or in parallel on scoped threads
//! ([`ConcurrentRunner`]). Both paths attach throughput and CPU efficiency
//! through [`Scheduler::analyze`] and return the same map shape, keyed by
//! algorithm.
//!
//! # Isolation
//!
//! Every task gets its own copy of the processes and its own switch counter;
//! the shared [`Scheduler`] is immutable. A panic inside one algorithm is
//! captured as a [`RunError`] for that algorithm and never aborts the others.
//!
//! # Validation
//!
//! The process set and configuration are validated before anything runs; a
//! rejected batch returns every [`ValidationError`] instead of outcomes.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Instant;

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::models::{Algorithm, Process, RunReport, RunResult};
use crate::scheduler::Scheduler;
use crate::validation::{validate_processes, ValidationError, ValidationResult};

/// Result of one algorithm within a batch.
pub type RunOutcome = Result<RunReport, RunError>;

/// Results of a batch, keyed by algorithm.
pub type RunOutcomes = BTreeMap<Algorithm, RunOutcome>;

/// Outcomes of a batch, or the input errors that kept it from starting.
pub type BatchResult = Result<RunOutcomes, Vec<ValidationError>>;

/// Single algorithm run, as performed by [`Scheduler::run`].
type RunFn = dyn Fn(&Scheduler, Algorithm, &[Process], i64) -> RunResult + Sync;

/// How a batch of algorithms is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// One algorithm at a time on the calling thread.
    Sequential,
    /// All algorithms in parallel.
    Concurrent,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ExecutionMode::Sequential => "Sequential",
            ExecutionMode::Concurrent => "Concurrent",
        })
    }
}

/// A failed algorithm run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunError {
    /// Algorithm that failed.
    pub algorithm: Algorithm,
    /// Captured failure description.
    pub message: String,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.algorithm, self.message)
    }
}

impl std::error::Error for RunError {}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn validate_batch(processes: &[Process], config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();
    if let Err(mut found) = validate_processes(processes) {
        errors.append(&mut found);
    }
    if let Err(mut found) = config.validate() {
        errors.append(&mut found);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        error!("Batch rejected: {} input errors", errors.len());
        Err(errors)
    }
}

/// Runs one algorithm and attaches its analysis, capturing panics.
fn execute(
    scheduler: &Scheduler,
    algorithm: Algorithm,
    processes: &[Process],
    config: &SimulationConfig,
    timed: bool,
    run: &RunFn,
) -> RunOutcome {
    let started = Instant::now();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        run(scheduler, algorithm, processes, config.quantum)
    }))
    .map_err(|payload| RunError {
        algorithm,
        message: panic_message(payload.as_ref()),
    })?;
    let elapsed = started.elapsed();

    Ok(scheduler.analyze(result, &config.horizons, timed.then_some(elapsed)))
}

fn log_outcome(outcome: &RunOutcome) {
    match outcome {
        Ok(report) => info!(
            "{} finished: total time {}, avg wait {:.2}, {} context switches",
            report.result.algorithm,
            report.result.total_time,
            report.result.metrics.avg_wait,
            report.result.context_switches
        ),
        Err(err) => error!("{err}"),
    }
}

/// Runs every algorithm one after another on the calling thread.
///
/// No wall-clock duration is recorded.
pub fn run_sequential(
    scheduler: &Scheduler,
    processes: &[Process],
    config: &SimulationConfig,
) -> BatchResult {
    validate_batch(processes, config)?;
    Ok(sequential_with(scheduler, processes, config, &Scheduler::run))
}

fn sequential_with(
    scheduler: &Scheduler,
    processes: &[Process],
    config: &SimulationConfig,
    run: &RunFn,
) -> RunOutcomes {
    Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            info!("Running {algorithm}");
            let outcome = execute(scheduler, algorithm, processes, config, false, run);
            log_outcome(&outcome);
            (algorithm, outcome)
        })
        .collect()
}

/// Runs all algorithms in parallel over the same input.
///
/// # Example
///
/// ```
/// use cpu_schedule::config::SimulationConfig;
/// use cpu_schedule::models::{Algorithm, Process};
/// use cpu_schedule::runner::ConcurrentRunner;
///
/// let processes = vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)];
/// let runner = ConcurrentRunner::new(processes, SimulationConfig::default());
/// let outcomes = runner.run_all().unwrap();
///
/// assert_eq!(outcomes.len(), 6);
/// let fcfs = outcomes[&Algorithm::Fcfs].as_ref().unwrap();
/// assert_eq!(fcfs.result.total_time, 8);
/// assert!(fcfs.execution_time.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ConcurrentRunner {
    scheduler: Scheduler,
    processes: Vec<Process>,
    config: SimulationConfig,
}

impl ConcurrentRunner {
    /// Creates a runner; the scheduler takes its switch cost from `config`.
    pub fn new(processes: Vec<Process>, config: SimulationConfig) -> Self {
        Self {
            scheduler: Scheduler::from_config(&config),
            processes,
            config,
        }
    }

    /// Replaces the scheduler.
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Validates the input, then launches one thread per algorithm and waits
    /// for all of them.
    pub fn run_all(&self) -> BatchResult {
        validate_batch(&self.processes, &self.config)?;
        Ok(self.run_with(&Scheduler::run))
    }

    fn run_with(&self, run: &RunFn) -> RunOutcomes {
        info!(
            "Launching {} algorithms concurrently over {} processes",
            Algorithm::ALL.len(),
            self.processes.len()
        );

        thread::scope(|scope| {
            let handles: Vec<_> = Algorithm::ALL
                .iter()
                .map(|&algorithm| {
                    let processes = self.processes.clone();
                    let scheduler = &self.scheduler;
                    let config = &self.config;
                    let handle = thread::Builder::new()
                        .name(algorithm.slug().to_string())
                        .spawn_scoped(scope, move || {
                            execute(scheduler, algorithm, &processes, config, true, run)
                        });
                    (algorithm, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(algorithm, handle)| {
                    let outcome = match handle {
                        Ok(handle) => handle.join().unwrap_or_else(|payload| {
                            Err(RunError {
                                algorithm,
                                message: panic_message(payload.as_ref()),
                            })
                        }),
                        Err(err) => Err(RunError {
                            algorithm,
                            message: format!("failed to spawn thread: {err}"),
                        }),
                    };
                    log_outcome(&outcome);
                    (algorithm, outcome)
                })
                .collect()
        })
    }
}

/// Runs all algorithms over `processes` in the given mode.
pub fn run_batch(
    mode: ExecutionMode,
    processes: &[Process],
    config: &SimulationConfig,
) -> BatchResult {
    match mode {
        ExecutionMode::Sequential => {
            run_sequential(&Scheduler::from_config(config), processes, config)
        }
        ExecutionMode::Concurrent => {
            ConcurrentRunner::new(processes.to_vec(), config.clone()).run_all()
        }
    }
}
