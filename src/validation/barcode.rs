//! Barcode sequence filtering and length repair.
//!
//! Index barcodes are sequences over {A,C,G,T}. Upstream exports sometimes
//! smuggle separators or whitespace into the cells, and sheets mixing an
//! older 8-base kit with the current 10-base kit need a fixed adapter suffix
//! appended to the short barcodes so both kits demultiplex together.

use std::collections::HashSet;

use crate::constants::{INDEX2_SUFFIX, INDEX_SUFFIX, LONG_BARCODE_LEN, SHORT_BARCODE_LEN};
use crate::models::{SampleSheet, ValidationEvent};

/// Keep only A/C/G/T characters, preserving relative order.
pub fn clean(sequence: &str) -> String {
    sequence
        .chars()
        .filter(|c| matches!(c, 'A' | 'C' | 'G' | 'T'))
        .collect()
}

/// Reverse-complement a barcode; any base outside A/C/G/T maps to N.
pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .chars()
        .rev()
        .map(|base| match base {
            'A' => 'T',
            'T' => 'A',
            'C' => 'G',
            'G' => 'C',
            _ => 'N',
        })
        .collect()
}

/// Filter every `index`/`index2` cell, then apply the sheet-wide suffix
/// repair when the filtered sheet mixes 8-base and 10-base barcodes.
pub fn normalize_sheet(sheet: &mut SampleSheet) -> Vec<ValidationEvent> {
    let mut events = Vec::new();

    for (i, row) in sheet.rows.iter_mut().enumerate() {
        for (column, cell) in [("index", &mut row.index), ("index2", &mut row.index2)] {
            let filtered = clean(cell);
            if filtered != *cell {
                events.push(ValidationEvent::info(format!(
                    "Filtered {column} at row {}: {cell} -> {filtered}",
                    i + 1
                )));
                *cell = filtered;
            }
        }
    }

    let lengths: HashSet<usize> = sheet
        .rows
        .iter()
        .flat_map(|row| [row.index.len(), row.index2.len()])
        .collect();

    if lengths.contains(&SHORT_BARCODE_LEN) && lengths.contains(&LONG_BARCODE_LEN) {
        for row in &mut sheet.rows {
            if row.index.len() == SHORT_BARCODE_LEN {
                row.index.push_str(INDEX_SUFFIX);
            }
            if row.index2.len() == SHORT_BARCODE_LEN {
                row.index2.push_str(INDEX2_SUFFIX);
            }
        }
        events.push(ValidationEvent::info(format!(
            "Appended suffix '{INDEX_SUFFIX}' to index and '{INDEX2_SUFFIX}' to index2 \
             for sequences of length {SHORT_BARCODE_LEN}"
        )));
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SampleRow;

    fn row(index: &str, index2: &str) -> SampleRow {
        SampleRow {
            lane: "1".to_string(),
            sample_id: "S1".to_string(),
            id_glims: String::new(),
            index: index.to_string(),
            index2: index2.to_string(),
            sample_project: "VIRO-NCOV".to_string(),
            set_index: "A1".to_string(),
            protocol: "p".to_string(),
            primers: "articV41".to_string(),
            sequencer: "seq01".to_string(),
            run_id: "231100_AB12CD_0001_ZZZZZZZZZZ".to_string(),
            bioinfo_project: "ncov".to_string(),
        }
    }

    #[test]
    fn test_clean_drops_foreign_characters() {
        assert_eq!(clean("AC*GT 12"), "ACGT");
        assert_eq!(clean("ACGT"), "ACGT");
        assert_eq!(clean("acgt"), "");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("ACGTN"), "NACGT");
        assert_eq!(reverse_complement("AAAA"), "TTTT");
        assert_eq!(reverse_complement("ACGX"), "NCGT");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn test_filtering_emits_one_event_per_changed_cell() {
        let mut sheet = SampleSheet::new(vec![row("AC*GT ACGTAT", "TGCATGCATG")]);
        let events = normalize_sheet(&mut sheet);

        assert_eq!(sheet.rows[0].index, "ACGTACGTAT");
        assert_eq!(sheet.rows[0].index2, "TGCATGCATG");
        assert_eq!(events.len(), 1);
        assert!(!events[0].is_error());
        assert!(events[0].message.contains("AC*GT ACGTAT -> ACGTACGTAT"));
    }

    #[test]
    fn test_mixed_lengths_trigger_suffix_repair() {
        let mut sheet = SampleSheet::new(vec![
            row("ACGTACGT", "TGCATGCA"),
            row("ACGTACGTAC", "TGCATGCATG"),
        ]);
        let events = normalize_sheet(&mut sheet);

        assert_eq!(sheet.rows[0].index, "ACGTACGTAT");
        assert_eq!(sheet.rows[0].index2, "TGCATGCAGT");
        assert_eq!(sheet.rows[1].index, "ACGTACGTAC");
        assert_eq!(sheet.rows[1].index2, "TGCATGCATG");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_uniform_lengths_left_untouched() {
        let mut sheet = SampleSheet::new(vec![
            row("ACGTACGTAC", "TGCATGCATG"),
            row("GGGGGGGGGG", "CCCCCCCCCC"),
        ]);
        let events = normalize_sheet(&mut sheet);

        assert!(events.is_empty());
        assert_eq!(sheet.rows[0].index, "ACGTACGTAC");

        let mut short_only = SampleSheet::new(vec![row("ACGTACGT", "TGCATGCA")]);
        assert!(normalize_sheet(&mut short_only).is_empty());
        assert_eq!(short_only.rows[0].index, "ACGTACGT");
    }

    #[test]
    fn test_repair_triggers_across_both_columns() {
        // 8 only in index, 10 only in index2: the union still mixes kits
        let mut sheet = SampleSheet::new(vec![row("ACGTACGT", "TGCATGCATG")]);
        let events = normalize_sheet(&mut sheet);

        assert_eq!(sheet.rows[0].index, "ACGTACGTAT");
        assert_eq!(sheet.rows[0].index2, "TGCATGCATG");
        assert_eq!(events.len(), 1);
    }
}
