//! Round-robin dispatching with a fixed quantum.
//!
//! # Algorithm
//!
//! A FIFO ready queue of process indices, with a membership flag per process
//! so nothing is enqueued twice.
//!
//! 1. Seed the queue with every process arriving at t <= 0.
//! 2. Empty queue: idle until the next unfinished arrival, then enqueue every
//!    process that has arrived.
//! 3. Otherwise dequeue the head and run it for `min(quantum, remaining)`.
//! 4. Enqueue, in index order, every process that arrived meanwhile.
//! 5. Re-enqueue the process just run behind those arrivals if it still has
//!    work; otherwise finalize it.
//!
//! Every dispatch records a context switch, including an immediate
//! redispatch of the same process.

use std::collections::VecDeque;

use log::debug;

use super::{prepare, SwitchCounter, Trace};
use crate::dispatching::next_arrival;
use crate::models::{Process, TimelineEntry};

struct ReadyQueue {
    queue: VecDeque<usize>,
    queued: Vec<bool>,
}

impl ReadyQueue {
    fn new(len: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(len),
            queued: vec![false; len],
        }
    }

    fn push(&mut self, idx: usize) {
        self.queue.push_back(idx);
        self.queued[idx] = true;
    }

    fn pop(&mut self) -> Option<usize> {
        let idx = self.queue.pop_front()?;
        self.queued[idx] = false;
        Some(idx)
    }

    /// Enqueues every unqueued, unfinished process arrived by `time`.
    fn admit(&mut self, procs: &[Process], time: i64, except: Option<usize>) {
        for (idx, p) in procs.iter().enumerate() {
            if Some(idx) != except && !self.queued[idx] && p.is_ready_at(time) {
                self.push(idx);
            }
        }
    }
}

/// Runs round robin. `quantum` must be positive.
pub(crate) fn run_round_robin(processes: &[Process], quantum: i64) -> Trace {
    let mut procs = prepare(processes);
    let mut timeline = Vec::new();
    let mut switches = SwitchCounter::default();
    let mut ready = ReadyQueue::new(procs.len());
    let mut time: i64 = 0;
    let mut completed = 0;

    ready.admit(&procs, time, None);

    while completed < procs.len() {
        let Some(idx) = ready.pop() else {
            let Some(arrival) = next_arrival(&procs) else {
                break;
            };
            if arrival > time {
                timeline.push(TimelineEntry::idle(time, arrival - time));
                time = arrival;
            }
            ready.admit(&procs, time, None);
            continue;
        };

        let slice = quantum.min(procs[idx].remaining);
        {
            let process = &mut procs[idx];
            process.mark_started(time);
            process.mark_responded(time);
            timeline.push(TimelineEntry::busy(time, process.pid.as_str(), slice));
            process.remaining -= slice;
        }
        time += slice;

        ready.admit(&procs, time, Some(idx));

        if procs[idx].remaining > 0 {
            ready.push(idx);
        } else {
            procs[idx].complete(time);
            completed += 1;
            debug!("RR(q={}): {} completed at {}", quantum, procs[idx].pid, time);
        }

        switches.record();
    }

    Trace {
        processes: procs,
        timeline,
        total_time: time,
        switches,
    }
}
