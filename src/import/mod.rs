//! Scenario input sources
//!
//! This module turns external input into a [`Scenario`]:
//! - [`table`]: strict parser for the CSV import format
//! - [`args`]: `--available` / `--process` command-line values
//!
//! Import errors are format errors and are reported separately from the
//! validator's [`ConfigError`]. A parsed scenario still has to pass validation
//! before a run starts.
//!
//! [`Scenario`]: crate::model::scenario::Scenario
//! [`ConfigError`]: crate::engine::errors::ConfigError

pub mod args;
pub mod table;

use std::path::Path;
use thiserror::Error;

use crate::model::scenario::Scenario;

/// Input that could not be turned into a scenario
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Invalid file format: the table has no header row")]
    MissingHeader,

    #[error("Invalid file format: missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Invalid file format: no resource columns found")]
    NoResources,

    #[error("Invalid file format: header has {got} columns, expected {expected} for the declared resources")]
    ColumnCount { expected: usize, got: usize },

    #[error("Invalid file format: column {column} is '{found}', expected '{expected}'")]
    MisplacedColumn {
        column: usize,
        expected: String,
        found: String,
    },

    #[error("Invalid file format: the table has no data rows")]
    NoData,

    #[error("Invalid file format: line {line} has {got} cells, expected {expected}")]
    ShortRow {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("Invalid file format: line {line}, column '{column}': '{value}' is not an integer")]
    InvalidCell {
        line: usize,
        column: String,
        value: String,
    },

    #[error("Invalid argument '{value}': {reason}")]
    InvalidArgument { value: String, reason: String },

    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },
}

/// Read and parse a CSV scenario file
pub fn load_table(path: &Path) -> Result<Scenario, ImportError> {
    let source = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    table::parse_table(&source)
}
