//! Error types for pdfmerge.
//!
//! Every failure the merge session can report is a variant of
//! [`MergeError`]. The load-time kinds map one-to-one onto the messages a
//! user sees when a file is rejected, so callers can show
//! [`MergeError::user_message`] without inspecting the variant themselves.
//!
//! # Error Categories
//!
//! - **Source validation**: empty, oversized, or non-PDF input
//! - **Load errors**: password-protected, corrupted, zero-page, generic
//! - **Session errors**: merge without both sources, failed merge,
//!   download before a merge
//! - **Host errors**: reading inputs, writing the output, configuration

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfmerge operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Main error type for pdfmerge operations.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The selected file has no bytes.
    #[error("File is empty: {name}")]
    EmptyFile {
        /// Name of the rejected file.
        name: String,
    },

    /// The selected file is larger than the configured ceiling.
    #[error("File is too large: {name} ({size} bytes, limit {limit} bytes)")]
    FileTooLarge {
        /// Name of the rejected file.
        name: String,
        /// Size of the file in bytes.
        size: u64,
        /// Ceiling that was exceeded.
        limit: u64,
    },

    /// The file does not start with the `%PDF` signature.
    #[error("Not a PDF file (missing %PDF signature): {name}")]
    InvalidSignature {
        /// Name of the rejected file.
        name: String,
    },

    /// The PDF is encrypted and cannot be opened without a password.
    #[error("PDF is password-protected: {name}")]
    PasswordProtected {
        /// Name of the rejected file.
        name: String,
    },

    /// The PDF structure could not be parsed.
    #[error("Corrupted or invalid PDF: {name}\n  Details: {details}")]
    CorruptedOrInvalid {
        /// Name of the rejected file.
        name: String,
        /// Parser details.
        details: String,
    },

    /// The PDF parsed but has no pages.
    #[error("PDF has no pages: {name}")]
    ZeroPageDocument {
        /// Name of the rejected file.
        name: String,
    },

    /// Loading failed for a reason that is neither encryption nor corruption.
    #[error("Failed to load PDF: {name}\n  Reason: {reason}")]
    GenericLoadFailure {
        /// Name of the rejected file.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// A merge was requested before both sources were loaded.
    #[error("Both source PDFs must be selected before merging")]
    MissingSources,

    /// The merge was aborted; no output was produced.
    #[error("Merge operation failed: {reason}")]
    MergeFailure {
        /// Description of what went wrong.
        reason: String,
    },

    /// A download was requested before a merge produced any output.
    #[error("No merged PDF available for download")]
    NothingToDownload,

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file exists but could not be read.
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different file name",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Writing the output file failed.
    #[error("Failed to write output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl MergeError {
    /// Create a MergeFailure error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailure {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// The message shown to the user for this error.
    ///
    /// Load failures get distinct wording for password-protected,
    /// corrupted, and generic failures.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyFile { .. } => "Selected file is empty.".to_string(),
            Self::FileTooLarge { limit, .. } => format!(
                "File is too large. Please select a file smaller than {}.",
                format_limit(*limit)
            ),
            Self::InvalidSignature { .. } => {
                "This file is not a valid PDF. Please select a proper PDF file.".to_string()
            }
            Self::PasswordProtected { .. } => {
                "This PDF is password-protected. Please use an unprotected PDF.".to_string()
            }
            Self::CorruptedOrInvalid { .. } => {
                "This PDF file appears to be corrupted. Please try a different file.".to_string()
            }
            Self::ZeroPageDocument { .. } => {
                "This PDF has no pages. Please select a PDF with at least one page.".to_string()
            }
            Self::GenericLoadFailure { name, .. } => {
                format!("Error loading PDF: {name}. Please try a different file.")
            }
            Self::MissingSources => "Please select both PDF files before merging.".to_string(),
            Self::MergeFailure { .. } => "Failed to merge PDFs. Please try again.".to_string(),
            Self::NothingToDownload => "No merged PDF available for download.".to_string(),
            other => other.to_string(),
        }
    }

    /// Check if this error leaves the session usable.
    ///
    /// Per-source load failures and session precondition failures are
    /// recovered at the slot or action boundary.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptyFile { .. }
                | Self::FileTooLarge { .. }
                | Self::InvalidSignature { .. }
                | Self::PasswordProtected { .. }
                | Self::CorruptedOrInvalid { .. }
                | Self::ZeroPageDocument { .. }
                | Self::GenericLoadFailure { .. }
                | Self::MissingSources
                | Self::MergeFailure { .. }
                | Self::NothingToDownload
                | Self::FileNotFound { .. }
                | Self::NotAFile { .. }
                | Self::FileNotAccessible { .. }
                | Self::OutputExists { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::EmptyFile { .. } => 3,
            Self::FileTooLarge { .. } => 3,
            Self::InvalidSignature { .. } => 3,
            Self::PasswordProtected { .. } => 3,
            Self::CorruptedOrInvalid { .. } => 3,
            Self::ZeroPageDocument { .. } => 3,
            Self::GenericLoadFailure { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::MissingSources => 6,
            Self::MergeFailure { .. } => 6,
            Self::NothingToDownload => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
        }
    }
}

/// Render a byte ceiling the way the user-facing messages quote it.
fn format_limit(limit: u64) -> String {
    const MB: u64 = 1024 * 1024;

    if limit > 0 && limit % MB == 0 {
        format!("{}MB", limit / MB)
    } else {
        format!("{limit} bytes")
    }
}
