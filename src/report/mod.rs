//! Report rendering.
//!
//! Turns run reports into plain-text and HTML documents:
//!
//! - **Per-algorithm** ([`render_run_report`]): timeline, metrics, throughput,
//!   efficiency and a per-process table.
//! - **Comparison** ([`render_comparison`], [`render_html`]): one row per
//!   algorithm for a whole batch.
//!
//! Rendering is pure; the `write_*` helpers put the result on disk.

mod html;
mod text;

pub use html::render_html;
pub use text::{render_comparison, render_run_report};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::models::RunReport;
use crate::runner::{ExecutionMode, RunOutcomes};

/// Horizon shown in comparison tables when configured.
pub const COMPARISON_HORIZON: i64 = 100;

/// Horizon used for a comparison row: [`COMPARISON_HORIZON`] when the run
/// counted it, otherwise the largest horizon counted.
pub(crate) fn comparison_horizon(report: &RunReport) -> Option<i64> {
    if report.throughput.contains_key(&COMPARISON_HORIZON) {
        Some(COMPARISON_HORIZON)
    } else {
        report.throughput.keys().next_back().copied()
    }
}

/// Creates (if needed) and returns `root/case`.
pub fn create_output_dir(root: impl AsRef<Path>, case: &str) -> io::Result<PathBuf> {
    let dir = root.as_ref().join(case);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Writes `<dir>/<algorithm slug>.txt`.
pub fn write_run_report(report: &RunReport, case: &str, dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(format!("{}.txt", report.result.algorithm.slug()));
    fs::write(&path, render_run_report(report, case))?;
    info!("Saved {} results to {}", report.result.algorithm, path.display());
    Ok(path)
}

/// Writes `<dir>/<case>_report.txt` and `<dir>/<case>_report.html`.
pub fn write_comparison(
    outcomes: &RunOutcomes,
    case: &str,
    mode: ExecutionMode,
    dir: &Path,
) -> io::Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;

    let text_path = dir.join(format!("{case}_report.txt"));
    fs::write(&text_path, render_comparison(outcomes, case, mode))?;

    let html_path = dir.join(format!("{case}_report.html"));
    fs::write(&html_path, render_html(outcomes, case, mode))?;

    info!(
        "Comparison reports written to {} and {}",
        text_path.display(),
        html_path.display()
    );
    Ok((text_path, html_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::models::Process;
    use crate::scheduler::Scheduler;

    fn report_with(horizons: &[i64]) -> RunReport {
        let scheduler = Scheduler::new();
        scheduler.analyze(
            scheduler.fcfs(&[Process::new("P1", 0, 3)]),
            horizons,
            None,
        )
    }

    #[test]
    fn test_comparison_horizon() {
        assert_eq!(comparison_horizon(&report_with(&[50, 100, 150])), Some(100));
        assert_eq!(comparison_horizon(&report_with(&[10, 20])), Some(20));
        assert_eq!(comparison_horizon(&report_with(&[])), None);
    }

    #[test]
    fn test_write_reports() {
        let root = std::env::temp_dir().join(format!("cpu-schedule-report-{}", std::process::id()));
        let dir = create_output_dir(&root, "case1").unwrap();
        assert!(dir.ends_with("case1"));

        let config = SimulationConfig::default();
        let scheduler = Scheduler::from_config(&config);
        let outcomes = crate::runner::run_sequential(
            &scheduler,
            &[Process::new("P1", 0, 5), Process::new("P2", 1, 3)],
            &config,
        )
        .unwrap();

        let report = outcomes[&crate::models::Algorithm::Fcfs].as_ref().unwrap();
        let path = write_run_report(report, "case1", &dir).unwrap();
        assert!(path.ends_with("fcfs.txt"));
        assert!(fs::read_to_string(&path).unwrap().contains("=== FCFS - CASE1 ==="));

        let (text, html) =
            write_comparison(&outcomes, "case1", ExecutionMode::Sequential, &root).unwrap();
        assert!(text.exists());
        assert!(html.exists());

        fs::remove_dir_all(&root).unwrap();
    }
}
