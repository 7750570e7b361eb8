//! CLI argument parsing for pdfmerge.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use pdfmerge::config::{
    CompressionLevel, Config, DEFAULT_FILE_NAME, LoadPolicy, MAX_FILE_SIZE, OverwriteMode,
};
use pdfmerge::error::{MergeError, Result};

/// Merge two PDF files into a single document.
///
/// All pages of FIRST are followed by all pages of SECOND. The result is
/// saved as NAME.pdf in the output directory.
#[derive(Parser, Debug)]
#[command(name = "pdfmerge")]
#[command(version)]
#[command(about = "Merge two PDF files into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// First PDF; its pages come first
    #[arg(value_name = "FIRST", required_unless_present = "interactive")]
    pub first: Option<PathBuf>,

    /// Second PDF; its pages follow the first PDF's pages
    #[arg(value_name = "SECOND", required_unless_present = "interactive")]
    pub second: Option<PathBuf>,

    /// Name of the merged file
    ///
    /// Surrounding whitespace is trimmed and ".pdf" is appended when
    /// missing. A blank name falls back to "merged-document".
    #[arg(short = 'o', long = "name", value_name = "NAME", default_value = DEFAULT_FILE_NAME)]
    pub name: String,

    /// Directory the merged PDF is saved into
    #[arg(
        short = 'd',
        long,
        value_name = "DIR",
        default_value = ".",
        env = "PDFMERGE_OUTPUT_DIR"
    )]
    pub output_dir: PathBuf,

    /// Dry run - validate and load both inputs without merging or writing
    #[arg(short = 'n', long, conflicts_with = "interactive")]
    pub dry_run: bool,

    /// Print the dry-run report as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Verbose output - show file details and diagnostic logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Compression level for output PDF
    ///
    /// - none: Streams are written as produced
    /// - standard: Compress streams (default)
    /// - maximum: Compress streams and renumber objects
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Largest accepted input file, in bytes
    #[arg(long, value_name = "BYTES", default_value_t = MAX_FILE_SIZE)]
    pub max_size: u64,

    /// Start an interactive session
    ///
    /// Reads commands from stdin: first <path>, second <path>, merge,
    /// download [name], clear, status, help, quit. FIRST and SECOND, when
    /// given, are loaded before the first prompt.
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is invalid or the
    /// resulting configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = Config {
            first: self.first.clone(),
            second: self.second.clone(),
            file_name: self.name.clone(),
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
            interactive: self.interactive,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode,
            compression,
            policy: LoadPolicy {
                max_file_size: self.max_size,
                ..Default::default()
            },
        };

        config.validate().map_err(|e| {
            MergeError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Performs early validation that doesn't require file I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<()> {
        if !self.interactive && (self.first.is_none() || self.second.is_none()) {
            return Err(MergeError::invalid_config(
                "Two input files are required (or use --interactive)",
            ));
        }

        if self.max_size == 0 {
            return Err(MergeError::invalid_config(
                "Maximum file size must be at least 1 byte",
            ));
        }

        if self.json && !self.dry_run {
            return Err(MergeError::invalid_config("--json requires --dry-run"));
        }

        if !["none", "standard", "maximum"].contains(&self.compression.as_str()) {
            return Err(MergeError::invalid_config(format!(
                "Invalid compression level: {}",
                self.compression
            )));
        }

        Ok(())
    }
}
