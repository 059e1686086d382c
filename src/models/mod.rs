//! Scheduling domain models.
//!
//! Provides the data types shared by every algorithm: the input/result
//! [`Process`], the dispatch [`TimelineEntry`], and the per-run
//! [`RunResult`] / [`RunReport`].
//!
//! # Glossary
//!
//! | Term | Definition |
//! |------|-----------|
//! | Burst | Total CPU time a process requires |
//! | Turnaround | Completion time minus arrival time |
//! | Waiting | Turnaround time minus burst time |
//! | Response | Time from arrival to first dispatch |
//! | Throughput (T) | Processes completed by time T |

mod process;
mod run;
mod timeline;

pub use process::Process;
pub use run::{Algorithm, Metrics, RunReport, RunResult};
pub use timeline::{Occupant, TimelineEntry};
