//! Cross-field row validation.
//!
//! Checks completeness of the required columns, sanitizes sample
//! identifiers, and validates project, primer, and laboratory-identifier
//! combinations against the fixed tables in [`crate::constants`]. Every
//! violation is advisory: rows are corrected in place where a rule says so
//! and never dropped.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::{CANONICAL_COLUMNS, GLIMS_PROJECT, VALID_BIOINFO_PROJECTS, allowed_primers, is_optional_column};
use crate::models::{SampleSheet, ValidationEvent};

static SAMPLE_ID_FORBIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+* ]").expect("valid regex"));

static GLIMS_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{12}$").expect("valid regex"));

/// Validate every row of the sheet, applying in-place corrections.
pub fn validate_sheet(sheet: &mut SampleSheet) -> Vec<ValidationEvent> {
    let mut events = Vec::new();

    check_required_columns(sheet, &mut events);
    clean_sample_ids(sheet, &mut events);
    check_grouping_columns(sheet, &mut events);
    check_bioinfo_projects(sheet, &mut events);
    check_project_primer_pairs(sheet, &mut events);
    check_glims_ids(sheet, &mut events);

    events
}

/// Every column outside the optional set must be non-empty on every row.
/// Reported once per offending column.
fn check_required_columns(sheet: &SampleSheet, events: &mut Vec<ValidationEvent>) {
    for column in CANONICAL_COLUMNS {
        if is_optional_column(column) {
            continue;
        }
        let has_empty = sheet
            .rows
            .iter()
            .any(|row| row.field(column).is_none_or(|v| v.trim().is_empty()));
        if has_empty {
            events.push(ValidationEvent::error(format!(
                "Column {column} contains empty values"
            )));
        }
    }
}

/// Sample identifiers must be barcode-safe: `+`, `*`, and spaces are
/// stripped in place.
fn clean_sample_ids(sheet: &mut SampleSheet, events: &mut Vec<ValidationEvent>) {
    for row in &mut sheet.rows {
        if SAMPLE_ID_FORBIDDEN.is_match(&row.sample_id) {
            let cleaned = SAMPLE_ID_FORBIDDEN
                .replace_all(&row.sample_id, "")
                .into_owned();
            events.push(ValidationEvent::info(format!(
                "Cleaned Sample_ID {} -> {}",
                row.sample_id, cleaned
            )));
            row.sample_id = cleaned;
        }
    }
}

/// The two grouping columns get their own completeness diagnostics, distinct
/// from the generic required-column check.
fn check_grouping_columns(sheet: &SampleSheet, events: &mut Vec<ValidationEvent>) {
    if sheet
        .rows
        .iter()
        .any(|row| row.sample_project.trim().is_empty())
    {
        events.push(ValidationEvent::error("Sample_Project column incomplete"));
    }
    if sheet.rows.iter().any(|row| row.primers.trim().is_empty()) {
        events.push(ValidationEvent::error("primers column incomplete"));
    }
}

/// `bioinfo_project` must be a known code. Offending values are reported
/// once per sheet, batched.
fn check_bioinfo_projects(sheet: &SampleSheet, events: &mut Vec<ValidationEvent>) {
    let mut unknown: Vec<&str> = Vec::new();
    for row in &sheet.rows {
        let value = row.bioinfo_project.as_str();
        if !VALID_BIOINFO_PROJECTS.contains(&value) && !unknown.contains(&value) {
            unknown.push(value);
        }
    }
    if !unknown.is_empty() {
        events.push(ValidationEvent::error(format!(
            "Unknown bioinfo_project values: {}",
            unknown.join(", ")
        )));
    }
}

/// `Sample_Project` must key the combinations table and `primers` must be in
/// that project's allowed list.
fn check_project_primer_pairs(sheet: &SampleSheet, events: &mut Vec<ValidationEvent>) {
    for row in &sheet.rows {
        match allowed_primers(&row.sample_project) {
            Some(allowed) => {
                if !allowed.contains(&row.primers.as_str()) {
                    events.push(ValidationEvent::error(format!(
                        "Invalid primers '{}' for Sample_ID {} in project {}",
                        row.primers, row.sample_id, row.sample_project
                    )));
                }
            }
            None => {
                events.push(ValidationEvent::error(format!(
                    "Invalid Sample_Project '{}' for Sample_ID {}",
                    row.sample_project, row.sample_id
                )));
            }
        }
    }
}

/// Samples of the GLIMS project must carry a 12-digit laboratory identifier;
/// every other project has the identifier cleared.
fn check_glims_ids(sheet: &mut SampleSheet, events: &mut Vec<ValidationEvent>) {
    for row in &mut sheet.rows {
        if row.sample_project == GLIMS_PROJECT {
            if !GLIMS_ID.is_match(row.id_glims.trim()) {
                events.push(ValidationEvent::error(format!(
                    "Invalid ID_GLIMS for Sample_ID {}",
                    row.sample_id
                )));
            }
        } else {
            row.id_glims.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SampleRow;

    fn row() -> SampleRow {
        SampleRow {
            lane: "1".to_string(),
            sample_id: "S1".to_string(),
            id_glims: String::new(),
            index: "ACGTACGTAC".to_string(),
            index2: "TGCATGCATG".to_string(),
            sample_project: "VIRO-NCOV".to_string(),
            set_index: "A1".to_string(),
            protocol: "p".to_string(),
            primers: "articV41".to_string(),
            sequencer: "seq01".to_string(),
            run_id: "231100_AB12CD_0001_ZZZZZZZZZZ".to_string(),
            bioinfo_project: "ncov".to_string(),
        }
    }

    fn errors(events: &[ValidationEvent]) -> Vec<&str> {
        events
            .iter()
            .filter(|e| e.is_error())
            .map(|e| e.message.as_str())
            .collect()
    }

    #[test]
    fn test_clean_sheet_produces_no_events() {
        let mut sheet = SampleSheet::new(vec![row()]);
        assert!(validate_sheet(&mut sheet).is_empty());
    }

    #[test]
    fn test_empty_required_column_is_reported_once() {
        let mut bad1 = row();
        bad1.protocol = String::new();
        let mut bad2 = row();
        bad2.protocol = "  ".to_string();

        let mut sheet = SampleSheet::new(vec![bad1, bad2]);
        let events = validate_sheet(&mut sheet);

        let protocol_errors: Vec<_> = errors(&events)
            .into_iter()
            .filter(|m| m.contains("protocol"))
            .collect();
        assert_eq!(protocol_errors, vec!["Column protocol contains empty values"]);
    }

    #[test]
    fn test_optional_columns_may_be_empty() {
        let mut r = row();
        r.run_id = String::new();
        r.id_glims = String::new();

        let mut sheet = SampleSheet::new(vec![r]);
        let events = validate_sheet(&mut sheet);
        assert!(
            !events
                .iter()
                .any(|e| e.message.contains("contains empty values"))
        );
    }

    #[test]
    fn test_sample_id_is_stripped_in_place() {
        let mut r = row();
        r.sample_id = "S 1+A*".to_string();

        let mut sheet = SampleSheet::new(vec![r]);
        let events = validate_sheet(&mut sheet);

        assert_eq!(sheet.rows[0].sample_id, "S1A");
        assert!(
            events
                .iter()
                .any(|e| !e.is_error() && e.message.contains("S 1+A* -> S1A"))
        );
    }

    #[test]
    fn test_unknown_bioinfo_projects_are_batched() {
        let mut bad1 = row();
        bad1.bioinfo_project = "mystery".to_string();
        let mut bad2 = row();
        bad2.bioinfo_project = "mystery".to_string();
        let mut bad3 = row();
        bad3.bioinfo_project = "other".to_string();

        let mut sheet = SampleSheet::new(vec![bad1, bad2, bad3]);
        let events = validate_sheet(&mut sheet);

        let batched: Vec<_> = errors(&events)
            .into_iter()
            .filter(|m| m.contains("bioinfo_project"))
            .collect();
        assert_eq!(
            batched,
            vec!["Unknown bioinfo_project values: mystery, other"]
        );
    }

    #[test]
    fn test_unknown_project_names_the_sample() {
        let mut r = row();
        r.sample_project = "VIRO-UNKNOWN".to_string();

        let mut sheet = SampleSheet::new(vec![r]);
        let events = validate_sheet(&mut sheet);

        assert!(errors(&events)
            .iter()
            .any(|m| m.contains("Invalid Sample_Project 'VIRO-UNKNOWN' for Sample_ID S1")));
    }

    #[test]
    fn test_bad_primer_names_sample_project_and_primer() {
        let mut r = row();
        r.primers = "multiplex".to_string();

        let mut sheet = SampleSheet::new(vec![r]);
        let events = validate_sheet(&mut sheet);

        assert!(errors(&events).iter().any(|m| {
            m.contains("Invalid primers 'multiplex'")
                && m.contains("Sample_ID S1")
                && m.contains("VIRO-NCOV")
        }));
    }

    #[test]
    fn test_glims_id_must_be_twelve_digits() {
        let mut r = row();
        r.sample_project = GLIMS_PROJECT.to_string();
        r.primers = "multiplex".to_string();
        r.id_glims = "12345".to_string();

        let mut sheet = SampleSheet::new(vec![r]);
        let events = validate_sheet(&mut sheet);

        assert!(errors(&events)
            .iter()
            .any(|m| m.contains("Invalid ID_GLIMS for Sample_ID S1")));
        // the row is retained, identifier untouched
        assert_eq!(sheet.rows[0].id_glims, "12345");
    }

    #[test]
    fn test_glims_id_accepts_padded_twelve_digits() {
        let mut r = row();
        r.sample_project = GLIMS_PROJECT.to_string();
        r.primers = "multiplex".to_string();
        r.id_glims = " 123456789012 ".to_string();

        let mut sheet = SampleSheet::new(vec![r]);
        let events = validate_sheet(&mut sheet);
        assert!(!events.iter().any(|e| e.message.contains("ID_GLIMS")));
    }

    #[test]
    fn test_glims_id_cleared_for_other_projects() {
        let mut r = row();
        r.id_glims = "123456789012".to_string();

        let mut sheet = SampleSheet::new(vec![r]);
        validate_sheet(&mut sheet);
        assert_eq!(sheet.rows[0].id_glims, "");
    }
}
