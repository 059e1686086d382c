//! Non-preemptive dispatching: FCFS, SJF and Priority.
//!
//! # Algorithm
//!
//! 1. Sort a fresh copy of the processes by arrival (stable).
//! 2. At `current_time`, select the ready process with the lowest rule score.
//! 3. If none is ready, record an idle slice up to the next arrival.
//! 4. Otherwise run the selection to completion in a single slice.
//!
//! One context switch is recorded per dispatch. Response time is never set by
//! this family.
//!
//! # Complexity
//! O(n²): one linear scan per dispatch.

use log::debug;

use super::{prepare, SwitchCounter, Trace};
use crate::dispatching::{next_arrival, select_ready, DispatchingRule};
use crate::models::{Process, TimelineEntry};

/// Runs each selected process to completion.
pub(crate) fn run_to_completion<R: DispatchingRule + ?Sized>(
    processes: &[Process],
    rule: &R,
) -> Trace {
    let mut procs = prepare(processes);
    let mut timeline = Vec::with_capacity(procs.len());
    let mut switches = SwitchCounter::default();
    let mut time: i64 = 0;

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

        let process = &mut procs[idx];
        process.mark_started(time);
        timeline.push(TimelineEntry::busy(time, process.pid.as_str(), process.burst));
        time += process.burst;
        process.complete(time);
        switches.record();

        debug!("{}: {} ran to completion at {}", rule.name(), process.pid, time);
    }

    Trace {
        processes: procs,
        timeline,
        total_time: time,
        switches,
    }
}
