//! Stage 1: raw samplesheet normalization.
//!
//! Reads a raw semicolon-delimited sheet, repairs barcodes and the run
//! identifier, runs the row validators, and rewrites the sheet as a
//! sectioned instrument CSV named `{run_id}.csv`. The output is written
//! through a uniquely named temporary sibling and renamed into place, so a
//! crash mid-write never leaves a partial target.

use csv::ReaderBuilder;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::ProcessorConfig;
use crate::constants::{
    CANONICAL_COLUMNS, COLUMN_COUNT, FALLBACK_RUN_ID, NORMALIZED_DELIMITER, RAW_DELIMITER,
    preamble,
};
use crate::error::{Result, SheetError};
use crate::models::{NormalizeOutcome, SampleRow, SampleSheet, ValidationEvent};
use crate::report::EventLog;
use crate::validation::{barcode, row, run_id};

/// Stage-1 normalizer over one raw samplesheet.
#[derive(Debug)]
pub struct Normalizer {
    config: ProcessorConfig,
    event_log: EventLog,
}

impl Normalizer {
    pub fn new(config: ProcessorConfig) -> Self {
        let event_log = EventLog::new(&config);
        Self { config, event_log }
    }

    /// Normalize one raw sheet into `{output_dir}/{run_id}.csv`.
    ///
    /// Advisory violations never fail the pass; the error return is reserved
    /// for unreadable input, a broken column layout, or an unwritable
    /// output. No output file exists after an error return.
    pub fn normalize(&self, raw_path: &Path, output_dir: &Path) -> Result<NormalizeOutcome> {
        info!("Normalizing raw samplesheet {}", raw_path.display());

        let mut sheet = match self.read_raw(raw_path) {
            Ok(sheet) => sheet,
            Err(e) => {
                self.event_log.failure(&format!("Normalizer read error: {e}"));
                return Err(e);
            }
        };
        debug!("Parsed {} sample rows", sheet.len());

        let mut events = Vec::new();
        events.extend(barcode::normalize_sheet(&mut sheet));

        // The run identifier is shared: validate the first row's value and
        // rewrite the whole column on success. On failure the sheet keeps
        // the original identifier and the error stays advisory.
        let mut run_id_valid = false;
        if let Some(first) = sheet.run_id().map(str::to_owned) {
            match run_id::validate(&first) {
                Some(normalized) => {
                    sheet.set_run_id(&normalized);
                    run_id_valid = true;
                }
                None => {
                    events.push(ValidationEvent::error(format!(
                        "Invalid run_id format: {first}"
                    )));
                }
            }
        }

        events.extend(row::validate_sheet(&mut sheet));
        self.event_log.record_events(&events);

        let lane_dropped = sheet.lane_is_redundant();
        if lane_dropped {
            debug!("Lane column is uniformly 1, eliding it from the output");
        }

        let run_id = match sheet.run_id() {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => FALLBACK_RUN_ID.to_string(),
        };
        let output_path = output_dir.join(format!("{run_id}.csv"));

        if let Err(e) = self.write_normalized(&sheet, &output_path, lane_dropped) {
            self.event_log.failure(&format!("Normalizer write error: {e}"));
            return Err(e);
        }
        self.event_log
            .activity(&format!("Normalizer output: {}", output_path.display()));

        Ok(NormalizeOutcome {
            output_path,
            rows: sheet.len(),
            lane_dropped,
            run_id_valid,
            events,
        })
    }

    /// Read and positionally parse the raw semicolon-delimited sheet.
    ///
    /// The first line is always treated as a header and discarded; a stray
    /// `é` anywhere in the file is stripped first, a known artifact of the
    /// upstream export encoding.
    fn read_raw(&self, raw_path: &Path) -> Result<SampleSheet> {
        if !raw_path.exists() {
            return Err(SheetError::InputNotFound {
                path: raw_path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(raw_path).map_err(|e| SheetError::ReadFailed {
            path: raw_path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let text = text.replace('é', "");

        let mut reader = ReaderBuilder::new()
            .delimiter(RAW_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| SheetError::ReadFailed {
                path: raw_path.to_path_buf(),
                reason: e.to_string(),
            })?;
            if record.len() != COLUMN_COUNT {
                return Err(SheetError::ColumnMismatch {
                    path: raw_path.to_path_buf(),
                    expected: COLUMN_COUNT,
                    found: record.len(),
                    // line 1 is the discarded header
                    line: i + 2,
                });
            }
            rows.push(SampleRow::from_record(&record));
        }

        if rows.is_empty() {
            return Err(SheetError::EmptySheet {
                path: raw_path.to_path_buf(),
            });
        }
        Ok(SampleSheet::new(rows))
    }

    /// Write the instrument preamble and the comma-delimited table through a
    /// temporary sibling file, then rename it over the target.
    fn write_normalized(
        &self,
        sheet: &SampleSheet,
        output_path: &Path,
        lane_dropped: bool,
    ) -> Result<()> {
        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(preamble(self.config.read_lengths).as_bytes())?;

        {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(NORMALIZED_DELIMITER)
                .from_writer(tmp.as_file_mut());

            let columns: &[&str] = if lane_dropped {
                &CANONICAL_COLUMNS[1..]
            } else {
                CANONICAL_COLUMNS
            };
            writer.write_record(columns)?;

            for row in &sheet.rows {
                let mut record: Vec<&str> = Vec::with_capacity(COLUMN_COUNT);
                if !lane_dropped {
                    record.push(&row.lane);
                }
                record.extend([
                    row.sample_id.as_str(),
                    row.id_glims.as_str(),
                    row.index.as_str(),
                    row.index2.as_str(),
                    row.sample_project.as_str(),
                    row.set_index.as_str(),
                    row.protocol.as_str(),
                    row.primers.as_str(),
                    row.sequencer.as_str(),
                    row.run_id.as_str(),
                    row.bioinfo_project.as_str(),
                ]);
                writer.write_record(&record)?;
            }
            writer.flush()?;
        }

        // rename into place; the temp file is removed automatically if
        // anything above bailed out early
        tmp.persist(output_path)
            .map_err(|e| SheetError::WriteFailed {
                path: output_path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
