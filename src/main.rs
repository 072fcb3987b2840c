use clap::Parser;
use samplesheet_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => {
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Samplesheet Processor - Sequencing Samplesheet Normalizer");
    println!("=========================================================");
    println!();
    println!("Validate and repair raw sequencing samplesheets, rewrite them in the");
    println!("instrument format, and split them into per-project/per-primer files.");
    println!();
    println!("USAGE:");
    println!("    samplesheet-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    normalize   Normalize a raw samplesheet into the instrument format");
    println!("    split       Split a normalized samplesheet into per-project files");
    println!("    run         Normalize then split in one pass (main command)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Full pipeline on a raw sheet:");
    println!("    samplesheet-processor run --input raw_sheet.csv --output ./processed");
    println!();
    println!("    # Normalize only:");
    println!("    samplesheet-processor normalize --input raw_sheet.csv --output ./processed");
    println!();
    println!("    # Split an existing normalized sheet, reverse-complementing index2:");
    println!("    samplesheet-processor split --input processed/231100_AB12CD_0001_ZZZZZZZZZZ.csv \\");
    println!("                                --output ./subsheets --rc-index2");
    println!();
    println!("For detailed help on any command, use:");
    println!("    samplesheet-processor <COMMAND> --help");
}
