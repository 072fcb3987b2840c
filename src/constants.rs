//! Application constants for the samplesheet processor
//!
//! This module contains the fixed column contract, the instrument preamble,
//! the barcode repair parameters, and the allowed-value tables used by the
//! validators. All static lookup data lives here rather than scattered
//! through the validation code.

// =============================================================================
// Column Contract
// =============================================================================

/// Canonical column names of the raw sheet, in positional order.
///
/// Incoming header content is discarded; columns are renamed by position.
pub const CANONICAL_COLUMNS: &[&str] = &[
    "Lane",
    "Sample_ID",
    "ID_GLIMS",
    "index",
    "index2",
    "Sample_Project",
    "Set_index",
    "protocol",
    "primers",
    "sequencer",
    "run_id",
    "bioinfo_project",
];

/// Expected column count of the raw sheet
pub const COLUMN_COUNT: usize = 12;

/// Columns allowed to be empty in the completeness check
pub const OPTIONAL_COLUMNS: &[&str] = &["Sample_Project", "run_id", "ID_GLIMS"];

/// Lane value treated as redundant when shared by every row
pub const REDUNDANT_LANE: u32 = 1;

// =============================================================================
// Delimiters and Output Format
// =============================================================================

/// Field delimiter of the raw sheet
pub const RAW_DELIMITER: u8 = b';';

/// Field delimiter of the normalized instrument sheet
pub const NORMALIZED_DELIMITER: u8 = b',';

/// Field delimiter of the per-group split files
pub const SPLIT_DELIMITER: u8 = b';';

/// Number of instrument preamble lines before the data header
pub const PREAMBLE_LINE_COUNT: usize = 6;

/// Default read length written into the `[Reads]` preamble section
pub const DEFAULT_READ_LENGTH: u32 = 100;

/// Run identifier used for the output filename when the sheet carries none
pub const FALLBACK_RUN_ID: &str = "unknown";

/// Header row of the per-group split files
pub const SPLIT_HEADER: &[&str] = &[
    "Identifiant",
    "Identifiant_GLIMS",
    "Index_1",
    "Sequence_index_1",
    "Index_2",
    "Sequence_index_2",
];

// =============================================================================
// Barcode Repair
// =============================================================================

/// Barcode length of the older library kit
pub const SHORT_BARCODE_LEN: usize = 8;

/// Barcode length of the current library kit
pub const LONG_BARCODE_LEN: usize = 10;

/// Adapter suffix appended to short `index` barcodes in mixed-kit sheets
pub const INDEX_SUFFIX: &str = "AT";

/// Adapter suffix appended to short `index2` barcodes in mixed-kit sheets
pub const INDEX2_SUFFIX: &str = "GT";

// =============================================================================
// Allowed-Value Tables
// =============================================================================

/// Known bioinformatics project codes
pub const VALID_BIOINFO_PROJECTS: &[&str] = &[
    "ncov", "hsv12", "fluabv", "vzv", "20236", "16206", "22188", "21098", "21710", "23067",
    "23128", "10042", "15228", "23127", "23161",
];

/// Sample projects and the primer sets each one accepts
pub const VALID_COMBINATIONS: &[(&str, &[&str])] = &[
    ("VIRO-NCOV", &["articV41", "articV532", "articV542"]),
    ("VIRO-GRIPPE", &["simplex", "multiplex"]),
    ("VIRO-HSV", &["multiplex"]),
    ("VIRO-VZV", &["multiplex"]),
    ("VIRO-EV", &["multiplex", "meta"]),
    (
        "VIRO-META-RD",
        &[
            "routine-LCR",
            "meta",
            "Non-meta",
            "WTA",
            "revelo",
            "multiplex",
            "urgent",
        ],
    ),
    ("VIRO-VRS", &["multiplex", "meta"]),
    ("VIRO-HEPATITE", &["Non-meta", "multiplex", "simplex"]),
    ("VIRO-VIH", &["Non-meta", "multiplex"]),
    ("MYCOBACTERIUM", &["multiplex"]),
    ("VIRO-CMV", &["multiplex", "simplex"]),
    ("NGS-BK", &["multiplex"]),
    (
        "VIRO-META-DIAG",
        &["routine-LCR", "meta", "WTA", "revelo", "multiplex", "urgent"],
    ),
];

/// The one project whose samples must carry a laboratory identifier
pub const GLIMS_PROJECT: &str = "MYCOBACTERIUM";

// =============================================================================
// Log Destinations
// =============================================================================

/// Default directory for the append-only activity log
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Filename of the activity log inside the log directory
pub const ACTIVITY_LOG_FILENAME: &str = "samplesheet.log";

/// Default path of the append-only error log
pub const DEFAULT_ERROR_LOG: &str = "samplesheet_errors.err";

// =============================================================================
// Helper Functions
// =============================================================================

/// Look up the primer sets accepted by a sample project
pub fn allowed_primers(project: &str) -> Option<&'static [&'static str]> {
    VALID_COMBINATIONS
        .iter()
        .find(|(name, _)| *name == project)
        .map(|(_, primers)| *primers)
}

/// Check whether a column may legitimately be empty
pub fn is_optional_column(column: &str) -> bool {
    OPTIONAL_COLUMNS.contains(&column)
}

/// Render the fixed instrument preamble with the configured read lengths
pub fn preamble(read_lengths: (u32, u32)) -> String {
    format!(
        "[Header]\n[Reads]\n{}\n{}\n[Settings]\n[Data]\n",
        read_lengths.0, read_lengths.1
    )
}
