//! Samplesheet Processor Library
//!
//! A Rust library for validating and normalizing raw sequencing
//! samplesheets and splitting them into per-project instrument files.
//!
//! This library provides tools for:
//! - Parsing raw semicolon-delimited samplesheets with a fixed positional
//!   column contract
//! - Filtering and repairing index barcode sequences, including the
//!   mixed-kit adapter-suffix correction
//! - Validating run identifiers, project/primer combinations, and
//!   laboratory identifiers against fixed allowed-value tables
//! - Rewriting sheets as sectioned instrument CSVs with atomic file
//!   replacement
//! - Splitting normalized sheets into per-(project, primer, lane) files
//!   with deterministic per-sample labels
//! - Advisory-only validation: violations are recorded, never fatal

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod report;
pub mod splitter;

pub mod validation {
    pub mod barcode;
    pub mod row;
    pub mod run_id;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::ProcessorConfig;
pub use error::{Result, SheetError};
pub use models::{NormalizeOutcome, SampleRow, SampleSheet, Severity, ValidationEvent};
pub use normalizer::Normalizer;
pub use report::EventLog;
pub use splitter::{SplitOptions, Splitter};
