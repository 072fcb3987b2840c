//! Configuration for samplesheet processing runs.
//!
//! Log destinations are explicit configuration handed to the entry points,
//! never process-global paths, so tests can run against isolated directories.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_ERROR_LOG, DEFAULT_LOG_DIR, DEFAULT_READ_LENGTH};

/// Settings shared by the normalizer and splitter entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Directory receiving the append-only activity log
    pub log_dir: PathBuf,

    /// Append-only error log file
    pub error_log_path: PathBuf,

    /// Read lengths written into the `[Reads]` preamble section
    pub read_lengths: (u32, u32),
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            error_log_path: PathBuf::from(DEFAULT_ERROR_LOG),
            read_lengths: (DEFAULT_READ_LENGTH, DEFAULT_READ_LENGTH),
        }
    }
}

impl ProcessorConfig {
    /// Set the activity log directory
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    /// Set the error log file
    pub fn with_error_log(mut self, error_log_path: impl Into<PathBuf>) -> Self {
        self.error_log_path = error_log_path.into();
        self
    }

    /// Set the read lengths of the `[Reads]` section
    pub fn with_read_lengths(mut self, read1: u32, read2: u32) -> Self {
        self.read_lengths = (read1, read2);
        self
    }
}
