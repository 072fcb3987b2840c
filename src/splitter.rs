//! Stage 2: split the normalized sheet into per-group files.
//!
//! Re-groups the normalized sheet by (project, primers, lane) and writes one
//! semicolon-delimited CSV per group, with a deterministic per-sample label
//! derived from the set index. Depends only on the normalizer's output
//! contract, never on its internals.

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::ProcessorConfig;
use crate::constants::{PREAMBLE_LINE_COUNT, SPLIT_DELIMITER, SPLIT_HEADER};
use crate::error::{Result, SheetError};
use crate::models::GroupKey;
use crate::report::EventLog;
use crate::validation::barcode;

/// Options controlling one split pass.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Field delimiter of the input file
    pub delimiter: u8,
    /// Reverse-complement `index2` before writing, for instruments reading
    /// the i5 index in the opposite orientation
    pub reverse_complement_index2: bool,
    /// Input starts with the fixed instrument preamble
    pub skip_preamble: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            reverse_complement_index2: false,
            skip_preamble: true,
        }
    }
}

/// The subset of columns carried into the split files.
#[derive(Debug, Clone)]
struct SplitRow {
    sample_id: String,
    id_glims: String,
    index: String,
    index2: String,
    set_index: String,
}

/// Stage-2 splitter over one normalized samplesheet.
#[derive(Debug)]
pub struct Splitter {
    event_log: EventLog,
}

impl Splitter {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            event_log: EventLog::new(&config),
        }
    }

    /// Split the normalized sheet into one file per (project, primers, lane)
    /// group under `output_dir`, returning the written paths.
    ///
    /// A failed split never invalidates the normalized input file.
    pub fn split(
        &self,
        input: &Path,
        output_dir: &Path,
        options: &SplitOptions,
    ) -> Result<Vec<PathBuf>> {
        info!("Splitting normalized samplesheet {}", input.display());

        let groups = match self.read_groups(input, options) {
            Ok(groups) => groups,
            Err(e) => {
                self.event_log.failure(&format!("Splitter read error: {e}"));
                return Err(e);
            }
        };
        debug!("Found {} output groups", groups.len());

        fs::create_dir_all(output_dir)?;
        let mut written = Vec::new();
        for (key, rows) in &groups {
            let path = output_dir.join(key.file_name());
            if let Err(e) = self.write_group(&path, rows, options) {
                self.event_log.failure(&format!("Splitter write error: {e}"));
                return Err(e);
            }
            self.event_log
                .activity(&format!("Splitter output: {}", path.display()));
            written.push(path);
        }
        Ok(written)
    }

    /// Parse the input into groups keyed by (project, primers, lane),
    /// preserving insertion order of first appearance.
    fn read_groups(
        &self,
        input: &Path,
        options: &SplitOptions,
    ) -> Result<Vec<(GroupKey, Vec<SplitRow>)>> {
        let file = fs::File::open(input).map_err(|e| SheetError::ReadFailed {
            path: input.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut reader = BufReader::new(file);

        if options.skip_preamble {
            let mut line = String::new();
            for _ in 0..PREAMBLE_LINE_COUNT {
                line.clear();
                if reader.read_line(&mut line)? == 0 {
                    return Err(SheetError::ReadFailed {
                        path: input.to_path_buf(),
                        reason: "file ends inside the instrument preamble".to_string(),
                    });
                }
            }
        }

        let mut csv_reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| SheetError::ReadFailed {
                path: input.to_path_buf(),
                reason: e.to_string(),
            })?
            .clone();
        let column = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &str| {
            column(name).ok_or_else(|| SheetError::MissingColumn {
                path: input.to_path_buf(),
                column: name.to_string(),
            })
        };

        let col_sample_id = required("Sample_ID")?;
        let col_index = required("index")?;
        let col_index2 = required("index2")?;
        let col_project = required("Sample_Project")?;
        let col_set_index = required("Set_index")?;
        let col_primers = required("primers")?;
        // lane column may have been elided by the normalizer
        let col_lane = column("Lane");
        let col_glims = column("ID_GLIMS");

        let mut slots: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<(GroupKey, Vec<SplitRow>)> = Vec::new();

        for record in csv_reader.records() {
            let record = record.map_err(|e| SheetError::ReadFailed {
                path: input.to_path_buf(),
                reason: e.to_string(),
            })?;
            let cell = |i: usize| record.get(i).unwrap_or("").to_string();

            let key = GroupKey {
                project: cell(col_project),
                primers: cell(col_primers),
                lane: col_lane.map(cell).filter(|lane| !lane.is_empty()),
            };
            let row = SplitRow {
                sample_id: cell(col_sample_id),
                id_glims: col_glims.map(cell).unwrap_or_default(),
                index: cell(col_index),
                index2: cell(col_index2),
                set_index: cell(col_set_index),
            };

            let slot = *slots.entry(key.clone()).or_insert_with(|| {
                groups.push((key.clone(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(row);
        }

        Ok(groups)
    }

    /// Write one group file with the fixed 6-column header and a per-sample
    /// label `{set_index}_{n}`, where the occurrence counter is scoped to
    /// this group alone.
    fn write_group(&self, path: &Path, rows: &[SplitRow], options: &SplitOptions) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(SPLIT_DELIMITER)
            .from_path(path)?;
        writer.write_record(SPLIT_HEADER)?;

        let mut occurrences: HashMap<&str, u32> = HashMap::new();
        for row in rows {
            let count = occurrences.entry(row.set_index.as_str()).or_insert(0);
            *count += 1;
            let label = format!("{}_{}", row.set_index, count);

            let index2 = if options.reverse_complement_index2 {
                barcode::reverse_complement(&row.index2)
            } else {
                row.index2.clone()
            };

            writer.write_record([
                row.sample_id.as_str(),
                row.id_glims.as_str(),
                label.as_str(),
                row.index.as_str(),
                label.as_str(),
                index2.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}
