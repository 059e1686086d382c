//! Process model.
//!
//! A process is the unit of work dispatched onto the simulated CPU. It carries
//! its input definition (arrival, burst, priority) and accumulates the timing
//! results computed by a scheduling run.
//!
//! # Time Representation
//! All times are integer time units relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A schedulable process.
///
/// Input fields are set at construction. Result fields start as `None` and
/// are filled in by a scheduling algorithm; each run operates on its own copy,
/// so results from one algorithm never leak into another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Process identifier, unique within a run.
    pub pid: String,
    /// Time unit at which the process becomes eligible.
    pub arrival: i64,
    /// Total CPU time required.
    pub burst: i64,
    /// Scheduling priority (lower value = higher priority).
    pub priority: i32,
    /// CPU time still owed. Starts at `burst`.
    pub remaining: i64,
    /// First dispatch time.
    pub start_time: Option<i64>,
    /// Time from arrival to first dispatch.
    ///
    /// Populated only by preemptive and round-robin algorithms.
    pub response_time: Option<i64>,
    /// Time at which the last slice ended.
    pub completion_time: Option<i64>,
    /// `completion_time - arrival`.
    pub turnaround_time: Option<i64>,
    /// `turnaround_time - burst`.
    pub waiting_time: Option<i64>,
}

impl Process {
    /// Creates a process with priority 0.
    pub fn new(pid: impl Into<String>, arrival: i64, burst: i64) -> Self {
        Self {
            pid: pid.into(),
            arrival,
            burst,
            priority: 0,
            remaining: burst,
            start_time: None,
            response_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether all burst time has been served.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining <= 0
    }

    /// Whether the process is eligible for dispatch at `time`.
    #[inline]
    pub fn is_ready_at(&self, time: i64) -> bool {
        self.arrival <= time && self.remaining > 0
    }

    /// Records the first dispatch, if not recorded yet.
    pub(crate) fn mark_started(&mut self, time: i64) {
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
    }

    /// Records the response time, if not recorded yet.
    pub(crate) fn mark_responded(&mut self, time: i64) {
        if self.response_time.is_none() {
            self.response_time = Some(time - self.arrival);
        }
    }

    /// Finalizes completion, turnaround and waiting time.
    pub(crate) fn complete(&mut self, completion_time: i64) {
        let turnaround = completion_time - self.arrival;
        self.remaining = 0;
        self.completion_time = Some(completion_time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst);
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Process({}, arrival={}, burst={})",
            self.pid, self.arrival, self.burst
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new("P1", 3, 7).with_priority(2);
        assert_eq!(p.pid, "P1");
        assert_eq!(p.arrival, 3);
        assert_eq!(p.burst, 7);
        assert_eq!(p.priority, 2);
        assert_eq!(p.remaining, 7);
        assert!(p.start_time.is_none());
        assert!(p.response_time.is_none());
        assert!(p.completion_time.is_none());
    }

    #[test]
    fn test_process_complete() {
        let mut p = Process::new("P1", 2, 4);
        p.complete(10);
        assert!(p.is_finished());
        assert_eq!(p.completion_time, Some(10));
        assert_eq!(p.turnaround_time, Some(8));
        assert_eq!(p.waiting_time, Some(4));
    }

    #[test]
    fn test_non_positive_burst_is_finished() {
        for burst in [0, -1] {
            let p = Process::new("P1", 0, burst);
            assert!(p.is_finished());
            assert!(!p.is_ready_at(10));
        }
    }

    #[test]
    fn test_first_dispatch_recorded_once() {
        let mut p = Process::new("P1", 2, 4);
        p.mark_started(5);
        p.mark_responded(5);
        p.mark_started(9);
        p.mark_responded(9);
        assert_eq!(p.start_time, Some(5));
        assert_eq!(p.response_time, Some(3));
    }

    #[test]
    fn test_ready_at() {
        let p = Process::new("P1", 2, 4);
        assert!(!p.is_ready_at(1));
        assert!(p.is_ready_at(2));
    }

    #[test]
    fn test_display() {
        let p = Process::new("P7", 0, 5);
        assert_eq!(p.to_string(), "Process(P7, arrival=0, burst=5)");
    }
}
