//! Core data structures for samplesheet processing.
//!
//! Defines the sample row and sheet types, validation events, and the
//! grouping key used by the splitter.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::REDUNDANT_LANE;

/// One sample's metadata, one row of the positional 12-column contract.
///
/// Cells are kept as raw strings; typed access goes through helpers so that
/// malformed values survive the round trip instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRow {
    pub lane: String,
    pub sample_id: String,
    pub id_glims: String,
    pub index: String,
    pub index2: String,
    pub sample_project: String,
    pub set_index: String,
    pub protocol: String,
    pub primers: String,
    pub sequencer: String,
    pub run_id: String,
    pub bioinfo_project: String,
}

impl SampleRow {
    /// Build a row from a positional record of the raw sheet.
    pub fn from_record(record: &csv::StringRecord) -> Self {
        let cell = |i: usize| record.get(i).unwrap_or("").to_string();
        Self {
            lane: cell(0),
            sample_id: cell(1),
            id_glims: cell(2),
            index: cell(3),
            index2: cell(4),
            sample_project: cell(5),
            set_index: cell(6),
            protocol: cell(7),
            primers: cell(8),
            sequencer: cell(9),
            run_id: cell(10),
            bioinfo_project: cell(11),
        }
    }

    /// Lane number, when the cell holds a positive integer.
    pub fn lane_number(&self) -> Option<u32> {
        self.lane.trim().parse().ok().filter(|n| *n > 0)
    }

    /// Cell value by canonical column name.
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            "Lane" => Some(&self.lane),
            "Sample_ID" => Some(&self.sample_id),
            "ID_GLIMS" => Some(&self.id_glims),
            "index" => Some(&self.index),
            "index2" => Some(&self.index2),
            "Sample_Project" => Some(&self.sample_project),
            "Set_index" => Some(&self.set_index),
            "protocol" => Some(&self.protocol),
            "primers" => Some(&self.primers),
            "sequencer" => Some(&self.sequencer),
            "run_id" => Some(&self.run_id),
            "bioinfo_project" => Some(&self.bioinfo_project),
            _ => None,
        }
    }
}

/// Ordered collection of sample rows parsed from one raw sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSheet {
    pub rows: Vec<SampleRow>,
}

impl SampleSheet {
    pub fn new(rows: Vec<SampleRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Run identifier of the sheet, taken from the first row.
    pub fn run_id(&self) -> Option<&str> {
        self.rows.first().map(|row| row.run_id.as_str())
    }

    /// Rewrite the run identifier on every row.
    pub fn set_run_id(&mut self, run_id: &str) {
        for row in &mut self.rows {
            row.run_id = run_id.to_string();
        }
    }

    /// True when the lane column carries no information (every row is lane 1).
    pub fn lane_is_redundant(&self) -> bool {
        !self.rows.is_empty()
            && self
                .rows
                .iter()
                .all(|row| row.lane_number() == Some(REDUNDANT_LANE))
    }
}

/// Severity of a validation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Automatic correction applied in place, recorded for traceability
    Info,
    /// Advisory violation; the sheet is still produced
    Error,
}

/// A single advisory violation or in-place correction raised during
/// validation. Events never stop processing and never drop rows; they are
/// aggregated by the caller and written to the side logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationEvent {
    pub severity: Severity,
    pub message: String,
}

impl ValidationEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Grouping key of one split output file.
///
/// `lane` is `None` when the normalized sheet had its lane column elided.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub project: String,
    pub primers: String,
    pub lane: Option<String>,
}

impl GroupKey {
    /// Output filename for this group.
    pub fn file_name(&self) -> String {
        match &self.lane {
            Some(lane) => format!("Lane{}_{}_{}.csv", lane, self.project, self.primers),
            None => format!("{}_{}.csv", self.project, self.primers),
        }
    }
}

/// Result of a successful normalization pass.
#[derive(Debug)]
pub struct NormalizeOutcome {
    /// Path of the written instrument sheet
    pub output_path: PathBuf,
    /// Number of sample rows in the sheet
    pub rows: usize,
    /// Whether the redundant lane column was elided
    pub lane_dropped: bool,
    /// Whether the run identifier passed structural validation
    pub run_id_valid: bool,
    /// Every advisory error and correction raised during the pass
    pub events: Vec<ValidationEvent>,
}

impl NormalizeOutcome {
    /// Count of advisory errors among the recorded events.
    pub fn error_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_error()).count()
    }

    /// Count of in-place corrections among the recorded events.
    pub fn correction_count(&self) -> usize {
        self.events.iter().filter(|e| !e.is_error()).count()
    }
}
