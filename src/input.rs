//! Process definitions from delimited text.
//!
//! The expected layout is a header row followed by one process per line:
//!
//! ```text
//! PID,Arrival,Burst,Priority
//! P1,0,5,2
//! P2,1,3,1
//! ```
//!
//! `PID`, `Arrival` and `Burst` are required; `Priority` is optional and
//! defaults to 0. Columns may appear in any order. Blank lines are skipped and
//! fields may be double-quoted.
//! Parsing does not validate values; run [`validate_processes`] afterwards.
//!
//! [`validate_processes`]: crate::validation::validate_processes

use std::fmt;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::models::Process;

/// An input error.
#[derive(Debug)]
pub struct InputError {
    /// Error category.
    pub kind: InputErrorKind,
    /// 1-based line number, when the error is tied to a line.
    pub line: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of input errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputErrorKind {
    /// The file could not be read.
    Io,
    /// The input has no header row.
    MissingHeader,
    /// A required column is absent from the header.
    MissingColumn,
    /// A row has fewer fields than the header.
    MalformedRow,
    /// A numeric field is not an integer.
    InvalidNumber,
}

impl InputError {
    fn new(kind: InputErrorKind, line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for InputError {}

struct Columns {
    pid: usize,
    arrival: usize,
    burst: usize,
    priority: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord, line: usize) -> Result<Self, InputError> {
        let find = |name: &str| header.iter().position(|n| n == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                InputError::new(
                    InputErrorKind::MissingColumn,
                    Some(line),
                    format!("missing required column '{name}'"),
                )
            })
        };

        Ok(Self {
            pid: require("PID")?,
            arrival: require("Arrival")?,
            burst: require("Burst")?,
            priority: find("Priority"),
        })
    }
}

fn parse_int<T: std::str::FromStr>(
    value: &str,
    column: &str,
    line: usize,
) -> Result<T, InputError> {
    value.parse().map_err(|_| {
        InputError::new(
            InputErrorKind::InvalidNumber,
            Some(line),
            format!("column '{column}': '{value}' is not an integer"),
        )
    })
}

fn record_line(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

/// Parses process definitions from CSV text.
pub fn parse_processes(content: &str) -> Result<Vec<Process>, InputError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.trim_start_matches('\u{feff}').as_bytes());

    let mut records = reader.records().filter(|record| {
        !matches!(record, Ok(r) if r.iter().all(str::is_empty))
    });

    let mut next_record = || -> Result<Option<StringRecord>, InputError> {
        records.next().transpose().map_err(|err| {
            let line = err.position().map(|p| p.line() as usize);
            InputError::new(InputErrorKind::MalformedRow, line, err.to_string())
        })
    };

    let Some(header) = next_record()? else {
        return Err(InputError::new(
            InputErrorKind::MissingHeader,
            None,
            "input has no header row",
        ));
    };
    let columns = Columns::from_header(&header, record_line(&header))?;

    let mut processes = Vec::new();
    while let Some(record) = next_record()? {
        let line_no = record_line(&record);
        let field = |idx: usize| {
            record.get(idx).ok_or_else(|| {
                InputError::new(
                    InputErrorKind::MalformedRow,
                    Some(line_no),
                    format!("expected at least {} fields, found {}", idx + 1, record.len()),
                )
            })
        };

        let pid = field(columns.pid)?;
        let arrival = parse_int(field(columns.arrival)?, "Arrival", line_no)?;
        let burst = parse_int(field(columns.burst)?, "Burst", line_no)?;
        let priority = match columns.priority.and_then(|idx| record.get(idx)) {
            Some(value) if !value.is_empty() => parse_int(value, "Priority", line_no)?,
            _ => 0,
        };

        processes.push(Process::new(pid, arrival, burst).with_priority(priority));
    }

    Ok(processes)
}

/// Reads process definitions from a file.
pub fn read_processes(path: impl AsRef<Path>) -> Result<Vec<Process>, InputError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|err| {
        InputError::new(
            InputErrorKind::Io,
            None,
            format!("cannot read {}: {err}", path.display()),
        )
    })?;
    parse_processes(&content)
}
