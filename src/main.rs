//! `cpu-schedule` command-line driver.
//!
//! Loads one or more CSV process files, runs every scheduling algorithm on
//! each, and writes per-algorithm reports, comparison reports and a JSON
//! execution log.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use cpu_schedule::config::SimulationConfig;
use cpu_schedule::input::read_processes;
use cpu_schedule::report::{create_output_dir, write_comparison, write_run_report};
use cpu_schedule::run_log::{LogStatus, RunLog};
use cpu_schedule::runner::{run_batch, ExecutionMode};
use cpu_schedule::validation::ValidationError;

const RUNNER: &str = "RUNNER";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Sequential,
    Concurrent,
}

impl From<Mode> for ExecutionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Sequential => ExecutionMode::Sequential,
            Mode::Concurrent => ExecutionMode::Concurrent,
        }
    }
}

/// CPU scheduling simulator
#[derive(Debug, Parser)]
#[command(name = "cpu-schedule", version, about)]
struct Args {
    /// CSV process files; each file stem names a case
    #[arg(default_values = ["data/case1.csv", "data/case2.csv"])]
    cases: Vec<PathBuf>,

    /// Run algorithms one after another or in parallel
    #[arg(short, long, value_enum, default_value_t = Mode::Sequential)]
    mode: Mode,

    /// JSON file with simulation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Round Robin time quantum
    #[arg(short, long)]
    quantum: Option<i64>,

    /// Time charged per context switch in the efficiency figure
    #[arg(long)]
    switch_cost: Option<f64>,

    /// Throughput horizon (repeatable)
    #[arg(long = "horizon")]
    horizons: Vec<i64>,

    /// Root directory for per-algorithm reports
    #[arg(long, default_value = "outputs")]
    output_dir: PathBuf,

    /// Directory for comparison reports
    #[arg(long, default_value = "docs")]
    report_dir: PathBuf,

    /// Execution log destination
    #[arg(long, default_value = "execution_log.json")]
    log_file: PathBuf,
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(quantum) = args.quantum {
        config = config.with_quantum(quantum);
    }
    if let Some(cost) = args.switch_cost {
        config = config.with_switch_cost(cost);
    }
    if !args.horizons.is_empty() {
        config = config.with_horizons(args.horizons.clone());
    }

    if let Err(errors) = config.validate() {
        bail!("invalid configuration: {}", describe(&errors));
    }
    Ok(config)
}

fn case_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Runs one case. Returns `Ok(false)` when the input was rejected.
fn run_case(
    path: &Path,
    args: &Args,
    config: &SimulationConfig,
    log: &mut RunLog,
) -> Result<bool> {
    let case = case_name(path);
    let mode = ExecutionMode::from(args.mode);
    info!("Processing {case} from {}", path.display());

    let processes = match read_processes(path) {
        Ok(processes) => processes,
        Err(err) => {
            log.record(RUNNER, &case, LogStatus::Error, err.to_string());
            return Ok(false);
        }
    };
    for p in &processes {
        info!("  {p}");
    }

    log.record(
        RUNNER,
        &case,
        LogStatus::Start,
        format!("{} processes, {mode} mode", processes.len()),
    );
    let outcomes = match run_batch(mode, &processes, config) {
        Ok(outcomes) => outcomes,
        Err(errors) => {
            log.record(RUNNER, &case, LogStatus::Error, describe(&errors));
            return Ok(false);
        }
    };

    let output_dir = create_output_dir(&args.output_dir, &case)
        .with_context(|| format!("failed to create output directory for {case}"))?;

    for (algorithm, outcome) in &outcomes {
        match outcome {
            Ok(report) => {
                write_run_report(report, &case, &output_dir)
                    .with_context(|| format!("failed to write {algorithm} report for {case}"))?;
                let message = match report.execution_time {
                    Some(elapsed) => format!("completed in {:.3}s", elapsed.as_secs_f64()),
                    None => "completed".to_string(),
                };
                log.record(algorithm.name(), &case, LogStatus::Success, message);
            }
            Err(err) => log.record(algorithm.name(), &case, LogStatus::Error, &err.message),
        }
    }

    write_comparison(&outcomes, &case, mode, &args.report_dir)
        .with_context(|| format!("failed to write comparison report for {case}"))?;
    Ok(true)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(
        "quantum={}, horizons={:?}, switch cost={}",
        config.quantum, config.horizons, config.switch_cost
    );

    let mut log = RunLog::new();
    let mut skipped = 0;
    for path in &args.cases {
        if !run_case(path, &args, &config, &mut log)? {
            skipped += 1;
        }
    }

    log.save(&args.log_file)
        .with_context(|| format!("failed to save run log to {}", args.log_file.display()))?;

    if skipped > 0 {
        warn!("{skipped} of {} cases skipped", args.cases.len());
    }
    info!(
        "Results in {}, reports in {}",
        args.output_dir.display(),
        args.report_dir.display()
    );
    Ok(())
}
