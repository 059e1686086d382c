//! Input validation for scheduling runs.
//!
//! Checks process definitions before they reach the algorithms, which assume
//! well-formed input. Detects:
//! - Empty or duplicate PIDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Times large enough to overflow the simulation clock
//!
//! Configuration checks (`SimulationConfig::validate`) report through the same
//! error type.

use crate::models::Process;
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same PID.
    DuplicateId,
    /// A process has an empty PID.
    EmptyId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requires no CPU time (or negative time).
    NonPositiveBurst,
    /// Round-robin quantum is not positive.
    InvalidQuantum,
    /// Context-switch cost is negative or not finite.
    InvalidSwitchCost,
    /// A throughput horizon is negative.
    InvalidHorizon,
    /// Simulated time or the metric totals would overflow `i64`.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates process definitions.
///
/// Checks:
/// 1. Every PID is non-empty
/// 2. No duplicate PIDs
/// 3. Every arrival is `>= 0`
/// 4. Every burst is `> 0`
/// 5. The latest arrival plus the total burst, times the process count, fits
///    in `i64` (bounds the clock and the wait/turnaround sums)
///
/// An empty slice is valid: every computation degrades to zero.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for p in processes {
        if p.pid.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Process with empty PID",
            ));
        } else if !pids.insert(p.pid.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.pid),
            ));
        }

        if p.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process '{}' has negative arrival {}", p.pid, p.arrival),
            ));
        }

        if p.burst <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}' has non-positive burst {}", p.pid, p.burst),
            ));
        }
    }

    if errors.is_empty() && time_bound(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Arrival and burst times are too large to simulate",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `(latest arrival + total burst) * count`, or `None` on overflow.
fn time_bound(processes: &[Process]) -> Option<i64> {
    let latest = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    let horizon = processes
        .iter()
        .try_fold(latest, |acc, p| acc.checked_add(p.burst))?;
    horizon.checked_mul(i64::try_from(processes.len()).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_processes() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 5),
            Process::new("P2", 1, 3).with_priority(2),
            Process::new("P3", 2, 1),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_processes(&sample_processes()).is_ok());
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_processes(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_pid() {
        let mut ps = sample_processes();
        ps.push(Process::new("P1", 4, 2));

        let errors = validate_processes(&ps).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("P1")));
    }

    #[test]
    fn test_empty_pid() {
        let errors = validate_processes(&[Process::new("  ", 0, 1)]).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::EmptyId));
    }

    #[test]
    fn test_negative_arrival() {
        let errors = validate_processes(&[Process::new("P1", -1, 1)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeArrival));
    }

    #[test]
    fn test_non_positive_burst() {
        let errors =
            validate_processes(&[Process::new("P1", 0, 0), Process::new("P2", 0, -3)]).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::NonPositiveBurst)
                .count(),
            2
        );
    }

    #[test]
    fn test_time_overflow() {
        let errors = validate_processes(&[Process::new("P1", 1, i64::MAX)]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);

        let ps = vec![
            Process::new("P1", 0, i64::MAX / 2),
            Process::new("P2", 0, i64::MAX / 2),
        ];
        let errors = validate_processes(&ps).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);
    }

    #[test]
    fn test_large_times_within_bound() {
        let ps = vec![Process::new("P1", 1_000_000, 5_000_000), Process::new("P2", 0, 7)];
        assert!(validate_processes(&ps).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let ps = vec![Process::new("P1", -2, 0), Process::new("P1", 0, 1)];
        let errors = validate_processes(&ps).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].to_string(), errors[0].message);
    }
}
