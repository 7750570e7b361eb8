//! Configuration module for pdfmerge.
//!
//! This module holds the validated settings that drive a merge session:
//! - Source validation limits ([`LoadPolicy`])
//! - Output naming and placement
//! - Compression of the serialized result
//! - Overwrite behavior and console verbosity

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{MergeError, Result};

/// Largest accepted source file, in bytes (50 MiB).
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// File name used for downloads when the requested name is blank.
pub const DEFAULT_FILE_NAME: &str = "merged-document";

/// MIME type handed to the save target.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams are written as produced.
    None,
    /// Compress streams (default).
    #[default]
    Standard,
    /// Compress streams and renumber objects densely.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = MergeError;

    /// Parse compression level from "none", "standard", or "maximum".
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(MergeError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Rules applied to every source before it reaches the PDF backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPolicy {
    /// Sources larger than this many bytes are rejected.
    pub max_file_size: u64,
    /// Ask the backend to refuse encrypted documents.
    pub reject_encrypted: bool,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            reject_encrypted: true,
        }
    }
}

/// Complete configuration for a merge run.
///
/// Built from CLI arguments and checked with [`Config::validate`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Source for the first slot.
    pub first: Option<PathBuf>,

    /// Source for the second slot.
    pub second: Option<PathBuf>,

    /// Requested output file name (may be blank).
    pub file_name: String,

    /// Directory the merged PDF is saved into.
    pub output_dir: PathBuf,

    /// Validate and report without writing anything.
    pub dry_run: bool,

    /// Drive the session from stdin commands instead of a single merge.
    pub interactive: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Source validation rules.
    pub policy: LoadPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first: None,
            second: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
            output_dir: PathBuf::from("."),
            dry_run: false,
            interactive: false,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            policy: LoadPolicy::default(),
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidConfig`] if:
    /// - A one-shot run is missing either source
    /// - Both verbose and quiet are set
    /// - The size ceiling is zero
    /// - The file name contains a path separator
    /// - An interactive run also asks for a dry run
    pub fn validate(&self) -> Result<()> {
        if !self.interactive && (self.first.is_none() || self.second.is_none()) {
            return Err(MergeError::invalid_config(
                "Two input files are required (or use --interactive)",
            ));
        }

        if self.interactive && self.dry_run {
            return Err(MergeError::invalid_config(
                "--dry-run cannot be combined with --interactive",
            ));
        }

        if self.verbose && self.quiet {
            return Err(MergeError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.policy.max_file_size == 0 {
            return Err(MergeError::invalid_config(
                "Maximum file size must be at least 1 byte",
            ));
        }

        if self.file_name.contains(['/', '\\']) {
            return Err(MergeError::invalid_config(format!(
                "File name must not contain a path separator: {}",
                self.file_name
            )));
        }

        Ok(())
    }

    /// Both configured sources, when present.
    pub fn sources(&self) -> Option<(&Path, &Path)> {
        match (&self.first, &self.second) {
            (Some(first), Some(second)) => Some((first.as_path(), second.as_path())),
            _ => None,
        }
    }

    /// Check if output should be printed.
    ///
    /// Dry runs always print their report.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
