//! CPU scheduling simulator.
//!
//! Simulates six classic uniprocessor scheduling policies over a set of
//! processes, records the resulting Gantt timeline, and computes per-process
//! and aggregate metrics for side-by-side comparison.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `TimelineEntry`, `Algorithm`,
//!   `RunResult`, `RunReport`, `Metrics`
//! - **`dispatching`**: Priority rules (`Fifo`, `Spt`, `Lwkr`, `Priority`) and
//!   ready-set selection shared by every algorithm
//! - **`scheduler`**: FCFS, SJF, SRTF, Round Robin and both Priority variants,
//!   plus metrics, throughput and CPU efficiency
//! - **`runner`**: Sequential and concurrent batch execution
//! - **`input`**: CSV process loading
//! - **`report`**: Plain-text and HTML reports
//! - **`run_log`**: JSON execution log
//! - **`config`**: Simulation parameters
//! - **`validation`**: Input integrity checks (duplicate IDs, arrivals, bursts)
//!
//! # Quick Start
//!
//! ```
//! use cpu_schedule::models::Process;
//! use cpu_schedule::scheduler::Scheduler;
//!
//! let processes = vec![
//!     Process::new("P1", 0, 5),
//!     Process::new("P2", 1, 3),
//!     Process::new("P3", 2, 1),
//! ];
//! let result = Scheduler::new().sjf(&processes);
//! assert_eq!(result.dispatch_order(), vec!["P1", "P3", "P2"]);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", ch. 2.4
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod dispatching;
pub mod input;
pub mod models;
pub mod report;
pub mod run_log;
pub mod runner;
pub mod scheduler;
pub mod validation;
