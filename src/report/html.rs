//! HTML comparison report.

use std::fmt;

use super::comparison_horizon;
use crate::runner::{ExecutionMode, RunOutcomes};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 40px; background-color: #f5f5f5; }
.container { max-width: 1200px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; }
h1 { color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }
table { width: 100%; border-collapse: collapse; margin: 20px 0; }
th, td { padding: 12px 15px; text-align: center; border: 1px solid #ddd; }
th { background-color: #3498db; color: white; }
tr:nth-child(even) { background-color: #f2f2f2; }
.algorithm { margin-bottom: 30px; padding: 20px; background-color: #f9f9f9; border-left: 5px solid #3498db; }
.error { color: #e74c3c; font-weight: bold; }";

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

struct HtmlDocument<'a> {
    outcomes: &'a RunOutcomes,
    case: &'a str,
    mode: ExecutionMode,
}

impl HtmlDocument<'_> {
    fn write_comparison(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<h2>Algorithm Comparison</h2>\n<table>\n<thead>\n<tr><th>Algorithm</th>\
             <th>Avg. Waiting Time</th><th>Avg. Turnaround Time</th><th>Throughput</th>\
             <th>CPU Efficiency</th><th>Context Switches</th></tr>\n</thead>\n<tbody>\n"
        )?;
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
                        "<tr><td><strong>{algorithm}</strong></td><td>{:.2}</td><td>{:.2}</td>\
                         <td>{throughput}</td><td>{:.2}%</td><td>{}</td></tr>",
                        run.metrics.avg_wait,
                        run.metrics.avg_turnaround,
                        report.cpu_efficiency,
                        run.context_switches
                    )?;
                }
                Err(err) => writeln!(
                    f,
                    "<tr><td><strong>{algorithm}</strong></td>\
                     <td colspan=\"5\" class=\"error\">{}</td></tr>",
                    escape(&err.message)
                )?,
            }
        }
        writeln!(f, "</tbody>\n</table>")
    }

    fn write_details(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<h2>Detailed Results</h2>")?;
        for report in self.outcomes.values().flatten() {
            let run = &report.result;
            writeln!(
                f,
                "<div class=\"algorithm\">\n<h3>{}</h3>",
                run.algorithm.name().to_uppercase()
            )?;
            if let Some(elapsed) = report.execution_time {
                writeln!(
                    f,
                    "<p><strong>Execution Time:</strong> {:.3} seconds</p>",
                    elapsed.as_secs_f64()
                )?;
            }
            writeln!(
                f,
                "<p><strong>Total Time:</strong> {} units</p>",
                run.total_time
            )?;
            for (horizon, count) in &report.throughput {
                writeln!(
                    f,
                    "<p><strong>Throughput (T={horizon}):</strong> {count} processes</p>"
                )?;
            }
            writeln!(f, "</div>")?;
        }
        Ok(())
    }
}

impl fmt::Display for HtmlDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = escape(self.case);
        let heading = escape(&self.case.to_uppercase());
        write!(
            f,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
             <title>CPU Scheduling Report - {title}</title>\n<style>\n{STYLE}\n</style>\n</head>\n\
             <body>\n<div class=\"container\">\n<h1>CPU Scheduling Report</h1>\n\
             <p><strong>Case:</strong> {heading}</p>\n<p><strong>Mode:</strong> {}</p>\n\
             <p><strong>Algorithms:</strong> {}</p>\n",
            self.mode,
            self.outcomes.len()
        )?;
        self.write_comparison(f)?;
        self.write_details(f)?;
        writeln!(f, "</div>\n</body>\n</html>")
    }
}

/// Renders the comparison of a batch as a standalone HTML page.
pub fn render_html(outcomes: &RunOutcomes, case: &str, mode: ExecutionMode) -> String {
    HtmlDocument {
        outcomes,
        case,
        mode,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::models::{Algorithm, Process};
    use crate::runner::{ConcurrentRunner, RunError};

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a & 'b'>"), "&lt;a &amp; &#39;b&#39;&gt;");
    }

    #[test]
    fn test_render_html() {
        let processes = vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)];
        let mut outcomes = ConcurrentRunner::new(processes, SimulationConfig::default())
            .run_all()
            .unwrap();
        outcomes.insert(
            Algorithm::Priority,
            Err(RunError {
                algorithm: Algorithm::Priority,
                message: "<bad>".into(),
            }),
        );

        let html = render_html(&outcomes, "case<1>", ExecutionMode::Concurrent);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("CPU Scheduling Report - case&lt;1&gt;"));
        assert!(html.contains("<td><strong>Round Robin</strong></td>"));
        assert!(html.contains("&lt;bad&gt;"));
        assert!(html.contains("Execution Time:"));
        assert!(html.contains("<p><strong>Throughput (T=200):</strong> 2 processes</p>"));
        assert_eq!(html.matches("<div class=\"algorithm\">").count(), 5);
        assert!(html.trim_end().ends_with("</html>"));
    }
}
