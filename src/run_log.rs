//! Execution log for a simulator invocation.
//!
//! Records one entry per notable event (batch start, algorithm success or
//! failure), mirrors each to the `log` facade, and persists the whole record
//! as pretty-printed JSON.
//!
//! ```
//! use cpu_schedule::run_log::{LogStatus, RunLog};
//!
//! let mut log = RunLog::new();
//! log.record("FCFS", "case1", LogStatus::Success, "done");
//! assert_eq!(log.entries().len(), 1);
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

/// Entry status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogStatus {
    /// Work started.
    Start,
    /// Work completed.
    Success,
    /// Work failed.
    Error,
    /// Informational.
    Info,
}

/// One logged event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    /// Algorithm (or component) name.
    pub algorithm: String,
    /// Case name.
    pub case: String,
    /// Event status.
    pub status: LogStatus,
    /// Free-form message.
    pub message: String,
}

/// Persisted form of a [`RunLog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLogDocument {
    /// Seconds since the Unix epoch when the log was created.
    pub start_time: u64,
    /// Seconds since the Unix epoch when the log was saved.
    pub end_time: u64,
    /// Elapsed wall-clock seconds.
    pub duration_secs: f64,
    /// Recorded events, oldest first.
    pub logs: Vec<LogEntry>,
}

fn unix_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// In-memory execution log.
#[derive(Debug, Clone)]
pub struct RunLog {
    started: SystemTime,
    entries: Vec<LogEntry>,
}

impl RunLog {
    /// Starts an empty log.
    pub fn new() -> Self {
        Self {
            started: SystemTime::now(),
            entries: Vec::new(),
        }
    }

    /// Records an event and forwards it to the `log` facade.
    pub fn record(
        &mut self,
        algorithm: impl Into<String>,
        case: impl Into<String>,
        status: LogStatus,
        message: impl Into<String>,
    ) {
        let entry = LogEntry {
            timestamp: unix_secs(SystemTime::now()),
            algorithm: algorithm.into(),
            case: case.into(),
            status,
            message: message.into(),
        };

        let line = format!(
            "[{:?}] {} - {}: {}",
            status, entry.algorithm, entry.case, entry.message
        );
        match status {
            LogStatus::Error => error!("{line}"),
            LogStatus::Info => warn!("{line}"),
            LogStatus::Start | LogStatus::Success => info!("{line}"),
        }

        self.entries.push(entry);
    }

    /// Recorded events, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Snapshot of the log as it would be saved now.
    pub fn to_document(&self) -> RunLogDocument {
        let now = SystemTime::now();
        let elapsed = now.duration_since(self.started).unwrap_or(Duration::ZERO);
        RunLogDocument {
            start_time: unix_secs(self.started),
            end_time: unix_secs(now),
            duration_secs: elapsed.as_secs_f64(),
            logs: self.entries.clone(),
        }
    }

    /// Writes the log as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.to_document())?;
        writer.flush()?;
        info!("Run log saved to {}", path.display());
        Ok(())
    }
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}
