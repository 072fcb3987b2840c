//! Append-only side logs for operator review.
//!
//! Two files: an activity log recording every operational message and
//! correction, and an error log recording advisory and fatal errors (each
//! error line is mirrored into the activity log). The core writes them and
//! never reads them back. A failed append must not abort the transform, so
//! write failures are downgraded to tracing warnings.

use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::ProcessorConfig;
use crate::constants::ACTIVITY_LOG_FILENAME;
use crate::models::{Severity, ValidationEvent};

/// Timestamp format of the side-log lines
const LINE_TIMESTAMP: &str = "%a %b %e %H:%M:%S %Y";

/// Sink for validation events and operational messages.
#[derive(Debug, Clone)]
pub struct EventLog {
    activity_log_path: PathBuf,
    error_log_path: PathBuf,
}

impl EventLog {
    pub fn new(config: &ProcessorConfig) -> Self {
        Self {
            activity_log_path: config.log_dir.join(ACTIVITY_LOG_FILENAME),
            error_log_path: config.error_log_path.clone(),
        }
    }

    /// Record an operational or correction message in the activity log.
    pub fn activity(&self, message: &str) {
        info!("{message}");
        self.append(&self.activity_log_path, message);
    }

    /// Record an error in the error log, mirrored into the activity log.
    pub fn failure(&self, message: &str) {
        error!("{message}");
        self.append(&self.error_log_path, message);
        self.append(&self.activity_log_path, &format!("ERROR: {message}"));
    }

    /// Record a batch of validation events under their own severities.
    pub fn record_events(&self, events: &[ValidationEvent]) {
        for event in events {
            match event.severity {
                Severity::Info => self.activity(&event.message),
                Severity::Error => self.failure(&event.message),
            }
        }
    }

    fn append(&self, path: &Path, message: &str) {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warn!("Could not create log directory {}: {e}", parent.display());
            return;
        }

        let line = format!("{}: {message}\n", Local::now().format(LINE_TIMESTAMP));
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(e) = result {
            warn!("Could not append to log {}: {e}", path.display());
        }
    }
}
