//! Built-in dispatching rules.
//!
//! | Rule | Score | Used by |
//! |------|-------|---------|
//! | FIFO | arrival time | FCFS |
//! | SPT | burst time | SJF (non-preemptive) |
//! | LWKR | remaining time | SRTF |
//! | PRIORITY | priority value | Priority (both variants) |
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore};
use crate::models::Process;

/// First In First Out.
///
/// Ranks by arrival time. Over an arrival-sorted slice this is "next in
/// arrival order".
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.arrival
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

/// Shortest Processing Time.
///
/// Ranks by total burst, ignoring work already done.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.burst
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Least Work Remaining.
///
/// Ranks by remaining burst. Any new arrival may hold less work than the
/// running process, so every arrival is a preemption boundary.
#[derive(Debug, Clone, Copy)]
pub struct Lwkr;

impl DispatchingRule for Lwkr {
    fn name(&self) -> &'static str {
        "LWKR"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.remaining
    }

    fn description(&self) -> &'static str {
        "Least Work Remaining"
    }
}

/// Process priority.
///
/// Ranks by priority value (lower value = more important). Only arrivals with
/// a strictly lower value can preempt.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        RuleScore::from(process.priority)
    }

    fn preempts(&self, arriving: &Process, running: &Process) -> bool {
        arriving.priority < running.priority
    }

    fn description(&self) -> &'static str {
        "Process Priority"
    }
}
