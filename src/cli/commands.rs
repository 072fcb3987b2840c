//! Command dispatch for the samplesheet processor CLI
//!
//! Wires the parsed arguments into the normalizer and splitter entry points,
//! sets up logging, and prints the human-facing summary: every validation
//! event and the final list of generated files.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cli::args::{Args, Commands, NormalizeArgs, RunArgs, SplitArgs};
use crate::config::ProcessorConfig;
use crate::models::{NormalizeOutcome, Severity};
use crate::normalizer::Normalizer;
use crate::splitter::{SplitOptions, Splitter};

/// Run the selected subcommand to completion.
pub fn run(args: Args) -> Result<()> {
    match args.get_command() {
        Commands::Normalize(args) => run_normalize(args),
        Commands::Split(args) => run_split(args),
        Commands::Run(args) => run_pipeline(args),
    }
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    setup_logging(args.get_log_level());
    args.validate()?;

    let config = ProcessorConfig::default()
        .with_log_dir(&args.log_dir)
        .with_error_log(&args.error_log)
        .with_read_lengths(args.read_length, args.read_length);

    let outcome = Normalizer::new(config)
        .normalize(&args.input, &args.output_dir)
        .context("normalization stage failed")?;

    print_normalize_summary(&outcome);
    Ok(())
}

fn run_split(args: SplitArgs) -> Result<()> {
    setup_logging(args.get_log_level());
    args.validate()?;

    let config = ProcessorConfig::default()
        .with_log_dir(&args.log_dir)
        .with_error_log(&args.error_log);
    let options = SplitOptions {
        delimiter: args.delimiter as u8,
        reverse_complement_index2: args.rc_index2,
        skip_preamble: !args.no_preamble,
    };

    let written = Splitter::new(config)
        .split(&args.input, &args.output_dir, &options)
        .context("split stage failed")?;

    print_split_summary(&written);
    Ok(())
}

/// Normalize, then split the produced sheet into a subdirectory named after
/// it. A split failure is reported but leaves the normalized file valid.
fn run_pipeline(args: RunArgs) -> Result<()> {
    setup_logging(args.get_log_level());
    args.validate()?;

    let config = ProcessorConfig::default()
        .with_log_dir(&args.log_dir)
        .with_error_log(&args.error_log)
        .with_read_lengths(args.read_length, args.read_length);

    let outcome = Normalizer::new(config.clone())
        .normalize(&args.input, &args.output_dir)
        .context("normalization stage failed")?;
    print_normalize_summary(&outcome);

    if args.skip_split {
        debug!("Split stage disabled, stopping after normalization");
        return Ok(());
    }

    let split_dir = split_dir_for(&outcome.output_path, &args.output_dir);
    info!("Splitting into {}", split_dir.display());

    let options = SplitOptions {
        reverse_complement_index2: args.rc_index2,
        ..SplitOptions::default()
    };
    let written = Splitter::new(config)
        .split(&outcome.output_path, &split_dir, &options)
        .context("split stage failed")?;

    print_split_summary(&written);
    Ok(())
}

/// Subdirectory receiving the split files: the normalized filename stem
/// under the chosen output directory.
fn split_dir_for(normalized_path: &Path, output_dir: &Path) -> PathBuf {
    match normalized_path.file_stem() {
        Some(stem) => output_dir.join(stem),
        None => output_dir.to_path_buf(),
    }
}

fn print_normalize_summary(outcome: &NormalizeOutcome) {
    println!("{}", "Normalization complete".bright_green().bold());
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        outcome.output_path.display()
    );
    println!(
        "  {} {}{}",
        "Rows:".bright_cyan(),
        outcome.rows,
        if outcome.lane_dropped {
            " (redundant lane column removed)"
        } else {
            ""
        }
    );

    for event in &outcome.events {
        match event.severity {
            Severity::Error => println!("  {} {}", "error:".bright_red(), event.message),
            Severity::Info => println!("  {} {}", "corrected:".bright_yellow(), event.message),
        }
    }
    if outcome.error_count() > 0 {
        println!(
            "  {} {} advisory error(s) recorded, review before sequencing",
            "Warning:".bright_red().bold(),
            outcome.error_count()
        );
    }
}

fn print_split_summary(written: &[PathBuf]) {
    println!(
        "{} {} file(s)",
        "Split complete:".bright_green().bold(),
        written.len()
    );
    for path in written {
        println!("  {} {}", "-".bright_cyan(), path.display());
    }
}

fn setup_logging(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("samplesheet_processor={log_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
