//! Command-line argument definitions for the samplesheet processor
//!
//! This module defines the CLI interface using the clap derive API. Each
//! subcommand owns its arguments and a `validate()` consistency check.

use crate::constants::{DEFAULT_ERROR_LOG, DEFAULT_LOG_DIR, DEFAULT_READ_LENGTH};
use crate::error::{Result, SheetError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the samplesheet processor
///
/// Validates and normalizes raw sequencing samplesheets into the instrument
/// format, and splits normalized sheets into per-project/per-primer files.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "samplesheet-processor",
    version,
    about = "Validate, normalize, and split sequencing samplesheets",
    long_about = "Processes raw semicolon-delimited sequencing samplesheets: validates and \
                  repairs sample metadata, rewrites the sheet as a sectioned instrument CSV \
                  named after the run identifier, and optionally splits the normalized sheet \
                  into one file per project/primer combination."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the samplesheet processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Normalize a raw samplesheet into the instrument format
    Normalize(NormalizeArgs),
    /// Split a normalized samplesheet into per-project/primer files
    Split(SplitArgs),
    /// Normalize then split in one pass (the full pipeline)
    Run(RunArgs),
}

/// Arguments for the normalize command
#[derive(Debug, Clone, Parser)]
pub struct NormalizeArgs {
    /// Raw semicolon-delimited samplesheet to process
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory for the normalized sheet
    ///
    /// Created if it doesn't exist. The generated file is named
    /// {run_id}.csv, or unknown.csv when the sheet carries no run id.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = "output"
    )]
    pub output_dir: PathBuf,

    /// Read length written into the [Reads] preamble section
    #[arg(long = "read-length", value_name = "BASES", default_value_t = DEFAULT_READ_LENGTH)]
    pub read_length: u32,

    /// Directory for the append-only activity log
    #[arg(long = "log-dir", value_name = "DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Append-only error log file
    #[arg(long = "error-log", value_name = "FILE", default_value = DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the split command
#[derive(Debug, Clone, Parser)]
pub struct SplitArgs {
    /// Normalized samplesheet to split
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory for the generated group files
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = "output"
    )]
    pub output_dir: PathBuf,

    /// Field delimiter of the input file
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ',')]
    pub delimiter: char,

    /// Reverse-complement index2 before writing (i5 orientation fix)
    #[arg(long = "rc-index2")]
    pub rc_index2: bool,

    /// Input has no instrument preamble to skip
    #[arg(long = "no-preamble")]
    pub no_preamble: bool,

    /// Directory for the append-only activity log
    #[arg(long = "log-dir", value_name = "DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Append-only error log file
    #[arg(long = "error-log", value_name = "FILE", default_value = DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the run command (normalize + split)
#[derive(Debug, Clone, Parser)]
pub struct RunArgs {
    /// Raw semicolon-delimited samplesheet to process
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory for the normalized sheet and the split subdirectory
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = "output"
    )]
    pub output_dir: PathBuf,

    /// Skip the split stage and only normalize
    #[arg(long = "skip-split")]
    pub skip_split: bool,

    /// Reverse-complement index2 in the split files (i5 orientation fix)
    #[arg(long = "rc-index2")]
    pub rc_index2: bool,

    /// Read length written into the [Reads] preamble section
    #[arg(long = "read-length", value_name = "BASES", default_value_t = DEFAULT_READ_LENGTH)]
    pub read_length: u32,

    /// Directory for the append-only activity log
    #[arg(long = "log-dir", value_name = "DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Append-only error log file
    #[arg(long = "error-log", value_name = "FILE", default_value = DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

fn check_input_file(input: &PathBuf) -> Result<()> {
    if !input.exists() {
        return Err(SheetError::Configuration {
            message: format!("Input file does not exist: {}", input.display()),
        });
    }
    if !input.is_file() {
        return Err(SheetError::Configuration {
            message: format!("Input path is not a file: {}", input.display()),
        });
    }
    Ok(())
}

fn log_level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl NormalizeArgs {
    /// Validate the normalize command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        check_input_file(&self.input)?;
        if self.read_length == 0 {
            return Err(SheetError::Configuration {
                message: "Read length must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose, self.quiet)
    }
}

impl SplitArgs {
    /// Validate the split command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        check_input_file(&self.input)?;
        if !self.delimiter.is_ascii() {
            return Err(SheetError::Configuration {
                message: format!("Delimiter must be a single ASCII character: {}", self.delimiter),
            });
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose, self.quiet)
    }
}

impl RunArgs {
    /// Validate the run command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        check_input_file(&self.input)?;
        if self.read_length == 0 {
            return Err(SheetError::Configuration {
                message: "Read length must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose, self.quiet)
    }
}
