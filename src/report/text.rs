//! Plain-text reports.

use std::fmt;

use super::comparison_horizon;
use crate::models::{Algorithm, RunReport};
use crate::runner::{ExecutionMode, RunOutcomes};

const RULE: &str = "--------------------------------------------------";
const WIDE_RULE: &str =
    "--------------------------------------------------------------------------------------------";

fn or_na(value: Option<i64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

struct RunDocument<'a> {
    report: &'a RunReport,
    case: &'a str,
}

impl fmt::Display for RunDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let run = &report.result;

        writeln!(
            f,
            "=== {} - {} ===\n",
            run.algorithm.name().to_uppercase(),
            self.case.to_uppercase()
        )?;
        if let Some(quantum) = run.quantum {
            writeln!(f, "Quantum: {quantum}\n")?;
        }

        writeln!(f, "TIMELINE:\n{RULE}")?;
        for entry in &run.timeline {
            writeln!(
                f,
                "[{:3}] --- {:6} --- [{:3}]",
                entry.start,
                entry.occupant,
                entry.end()
            )?;
        }
        writeln!(f, "{RULE}\n")?;

        let m = &run.metrics;
        writeln!(f, "METRICS:\n{RULE}")?;
        writeln!(f, "Average Waiting Time: {:.2}", m.avg_wait)?;
        writeln!(f, "Maximum Waiting Time: {:.2}", m.max_wait as f64)?;
        writeln!(f, "Average Turnaround Time: {:.2}", m.avg_turnaround)?;
        writeln!(f, "Maximum Turnaround Time: {:.2}", m.max_turnaround as f64)?;
        writeln!(f, "Total Waiting Time: {:.2}", m.total_wait as f64)?;
        writeln!(f, "Total Turnaround Time: {:.2}", m.total_turnaround as f64)?;
        writeln!(f, "{RULE}\n")?;

        writeln!(f, "THROUGHPUT:\n{RULE}")?;
        for (horizon, count) in &report.throughput {
            writeln!(f, "T={horizon}: {count} processes completed")?;
        }
        writeln!(f, "{RULE}\n")?;

        writeln!(f, "CPU EFFICIENCY:\n{RULE}")?;
        writeln!(f, "Average CPU Efficiency: {:.2}%", report.cpu_efficiency)?;
        writeln!(f, "Total Context Switches: {}", run.context_switches)?;
        writeln!(f, "Total Time: {}", run.total_time)?;
        if let Some(elapsed) = report.execution_time {
            writeln!(f, "Execution Time: {:.6}s", elapsed.as_secs_f64())?;
        }
        writeln!(f, "{RULE}\n")?;

        writeln!(f, "PROCESS DETAILS:\n{WIDE_RULE}")?;
        writeln!(
            f,
            "PID | Arrival | Burst | Priority | Start | Response | Completion | Turnaround | Waiting"
        )?;
        writeln!(f, "{WIDE_RULE}")?;

        let mut processes: Vec<_> = run.processes.iter().collect();
        processes.sort_by(|a, b| a.pid.cmp(&b.pid));
        for p in processes {
            writeln!(
                f,
                "{:>3} | {:>7} | {:>5} | {:>8} | {:>5} | {:>8} | {:>10} | {:>10} | {:>7}",
                p.pid,
                p.arrival,
                p.burst,
                p.priority,
                or_na(p.start_time),
                or_na(p.response_time),
                or_na(p.completion_time),
                or_na(p.turnaround_time),
                or_na(p.waiting_time),
            )?;
        }
        writeln!(f, "{WIDE_RULE}")
    }
}

/// Renders the full report for one algorithm run.
pub fn render_run_report(report: &RunReport, case: &str) -> String {
    RunDocument { report, case }.to_string()
}

/// Best and worst successful runs under `key`, lowest first.
fn extremes<F>(reports: &[&RunReport], key: F) -> Option<(Algorithm, Algorithm)>
where
    F: Fn(&RunReport) -> f64,
{
    let lowest = reports.iter().min_by(|a, b| key(a).total_cmp(&key(b)))?;
    let highest = reports.iter().max_by(|a, b| key(a).total_cmp(&key(b)))?;
    Some((lowest.result.algorithm, highest.result.algorithm))
}

struct ComparisonDocument<'a> {
    outcomes: &'a RunOutcomes,
    case: &'a str,
    mode: ExecutionMode,
}

impl ComparisonDocument<'_> {
    fn write_analysis(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reports: Vec<&RunReport> = self.outcomes.values().flatten().collect();

        writeln!(f, "ANALYSIS AND COMMENTS\n{WIDE_RULE}")?;
        if reports.is_empty() {
            return writeln!(f, "No algorithm completed successfully.");
        }

        writeln!(f, "1. Waiting Times:")?;
        if let Some((low, high)) = extremes(&reports, |r| r.result.metrics.avg_wait) {
            writeln!(f, "   - Lowest average wait: {low}; highest: {high}.")?;
        }
        writeln!(f, "   - Shortest-job policies minimise average waiting time.")?;
        writeln!(f, "   - Round Robin shares the CPU fairly at the cost of longer waits.\n")?;

        writeln!(f, "2. Throughput:")?;
        let horizon = reports.iter().find_map(|r| comparison_horizon(r));
        if let Some(h) = horizon {
            if let Some((low, high)) = extremes(&reports, |r| r.throughput_at(h) as f64) {
                writeln!(f, "   - Most completions by T={h}: {high}; fewest: {low}.")?;
            }
        }
        writeln!(f, "   - Over long horizons all algorithms converge to the same count.\n")?;

        writeln!(f, "3. CPU Efficiency:")?;
        if let Some((low, high)) = extremes(&reports, |r| r.cpu_efficiency) {
            writeln!(f, "   - Highest efficiency: {high}; lowest: {low}.")?;
        }
        writeln!(f, "   - Fewer context switches mean less overhead and higher efficiency.\n")?;

        writeln!(f, "4. Context Switches:")?;
        if let Some((low, high)) = extremes(&reports, |r| r.result.context_switches as f64) {
            writeln!(f, "   - Fewest switches: {low}; most: {high}.")?;
        }
        writeln!(f, "   - Non-preemptive algorithms switch least; Round Robin and")?;
        writeln!(f, "     preemptive algorithms switch most.")
    }
}

impl fmt::Display for ComparisonDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CPU SCHEDULING REPORT")?;
        writeln!(f, "Case: {}", self.case.to_uppercase())?;
        writeln!(f, "Mode: {}", self.mode)?;
        writeln!(f, "{}\n", "=".repeat(WIDE_RULE.len()))?;

        writeln!(f, "ALGORITHM COMPARISON\n{WIDE_RULE}")?;
        writeln!(
            f,
            "{:23} | {:>9} | {:>15} | {:>15} | {:>10} | {:>8}",
            "Algorithm", "Avg. Wait", "Avg. Turnaround", "Throughput", "CPU Eff.", "Switches"
        )?;
        writeln!(f, "{WIDE_RULE}")?;

        for (algorithm, outcome) in self.outcomes {
            match outcome {
                Ok(report) => {
                    let run = &report.result;
                    let throughput = match comparison_horizon(report) {
                        Some(h) => format!("{} (T={h})", report.throughput_at(h)),
                        None => "-".to_string(),
                    };
                    writeln!(
                        f,
                        "{:23} | {:>9.2} | {:>15.2} | {:>15} | {:>9.2}% | {:>8}",
                        algorithm,
                        run.metrics.avg_wait,
                        run.metrics.avg_turnaround,
                        throughput,
                        report.cpu_efficiency,
                        run.context_switches
                    )?;
                }
                Err(err) => writeln!(f, "{:23} | error: {}", algorithm, err.message)?,
            }
        }
        writeln!(f, "{WIDE_RULE}\n")?;

        self.write_analysis(f)
    }
}

/// Renders the side-by-side comparison of a batch, followed by an analysis
/// of which algorithms did best on each figure.
pub fn render_comparison(outcomes: &RunOutcomes, case: &str, mode: ExecutionMode) -> String {
    ComparisonDocument {
        outcomes,
        case,
        mode,
    }
    .to_string()
}
