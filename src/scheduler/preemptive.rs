//! Preemptive dispatching: SRTF and preemptive Priority.
//!
//! # Algorithm
//!
//! 1. Sort a fresh copy of the processes by arrival (stable).
//! 2. At each decision point, select the ready process with the lowest rule
//!    score; if none is ready, idle until the next arrival.
//! 3. Run it until it finishes or until the next arrival that the rule says
//!    may outrank it, whichever comes first.
//!
//! The selection between boundaries cannot change: the running process's score
//! only improves and no new process becomes ready. Advancing boundary to
//! boundary therefore dispatches exactly as a unit-tick loop would.
//!
//! # Context switches
//!
//! A switch is recorded when the selected process differs from the previous
//! dispatch, plus one trailing switch once the loop ends (also for an empty
//! process set).

use log::debug;

use super::{prepare, SwitchCounter, Trace};
use crate::dispatching::{next_arrival, next_preemption, select_ready, DispatchingRule};
use crate::models::{Process, TimelineEntry};

/// Runs the preemptive loop for the given rule.
pub(crate) fn run_preemptive<R: DispatchingRule + ?Sized>(
    processes: &[Process],
    rule: &R,
) -> Trace {
    let mut procs = prepare(processes);
    let mut timeline = Vec::new();
    let mut switches = SwitchCounter::default();
    let mut time: i64 = 0;
    let mut previous: Option<usize> = None;

    loop {
        let Some(idx) = select_ready(&procs, time, rule) else {
            match next_arrival(&procs) {
                Some(arrival) => {
                    timeline.push(TimelineEntry::idle(time, arrival - time));
                    time = arrival;
                    continue;
                }
                None => break,
            }
        };

        if matches!(previous, Some(prev) if prev != idx) {
            switches.record();
        }

        let slice = match next_preemption(&procs, idx, time, rule) {
            Some(boundary) => procs[idx].remaining.min(boundary - time),
            None => procs[idx].remaining,
        };

        let process = &mut procs[idx];
        process.mark_started(time);
        process.mark_responded(time);
        timeline.push(TimelineEntry::busy(time, process.pid.as_str(), slice));
        process.remaining -= slice;
        time += slice;

        if process.remaining == 0 {
            process.complete(time);
            debug!("{}: {} completed at {}", rule.name(), process.pid, time);
        }

        previous = Some(idx);
    }

    switches.record();

    Trace {
        processes: procs,
        timeline,
        total_time: time,
        switches,
    }
}
