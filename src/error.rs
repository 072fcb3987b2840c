//! Error handling for samplesheet processing operations.
//!
//! Provides error types with file context for raw-sheet parsing,
//! column-layout validation, and output writing failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Unreadable samplesheet: {path} - {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error(
        "Column mismatch in {path}: expected {expected} columns, found {found} on line {line}"
    )]
    ColumnMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
        line: usize,
    },

    #[error("Samplesheet contains no data rows: {path}")]
    EmptySheet { path: PathBuf },

    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Failed to write output {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, SheetError>;
