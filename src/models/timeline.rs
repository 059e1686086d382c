//! Dispatch timeline model.
//!
//! A timeline is the ordered list of CPU slices produced by a run, including
//! idle gaps. Consecutive entries are contiguous: each starts where the
//! previous one ended.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What occupies the CPU during a slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// No process was eligible.
    Idle,
    /// The named process was running.
    Process(String),
}

impl Occupant {
    /// Whether this slice is an idle gap.
    pub fn is_idle(&self) -> bool {
        matches!(self, Occupant::Idle)
    }

    /// Process identifier, if any.
    pub fn pid(&self) -> Option<&str> {
        match self {
            Occupant::Idle => None,
            Occupant::Process(pid) => Some(pid),
        }
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Width flags apply in report tables.
            Occupant::Idle => f.pad("IDLE"),
            Occupant::Process(pid) => f.pad(pid),
        }
    }
}

/// One contiguous CPU slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Slice start time.
    pub start: i64,
    /// Slice occupant.
    pub occupant: Occupant,
    /// Slice length.
    pub duration: i64,
}

impl TimelineEntry {
    /// Creates a slice for a running process.
    pub fn busy(start: i64, pid: impl Into<String>, duration: i64) -> Self {
        Self {
            start,
            occupant: Occupant::Process(pid.into()),
            duration,
        }
    }

    /// Creates an idle slice.
    pub fn idle(start: i64, duration: i64) -> Self {
        Self {
            start,
            occupant: Occupant::Idle,
            duration,
        }
    }

    /// Slice end time.
    #[inline]
    pub fn end(&self) -> i64 {
        self.start + self.duration
    }
}
