//! Source validation for pdfmerge.
//!
//! These checks run before a source is handed to the PDF backend, so a
//! rejected file never costs a parse. They cover:
//! - Empty files
//! - Files above the size ceiling
//! - Files without the `%PDF` signature
//!
//! # Examples
//!
//! ```
//! use pdfmerge::config::LoadPolicy;
//! use pdfmerge::session::SourceFile;
//! use pdfmerge::validation::validate_source;
//!
//! let file = SourceFile::new("notes.txt", b"hello".to_vec());
//! assert!(validate_source(&file, &LoadPolicy::default()).is_err());
//! ```

use crate::config::LoadPolicy;
use crate::error::{MergeError, Result};
use crate::session::SourceFile;

/// The four bytes every PDF file starts with.
pub const PDF_SIGNATURE: [u8; 4] = *b"%PDF";

/// Check whether `bytes` start with the PDF signature.
pub fn has_pdf_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(&PDF_SIGNATURE)
}

/// Validate a source before it reaches the backend.
///
/// Checks run in order: emptiness, size ceiling, signature.
///
/// # Errors
///
/// Returns [`MergeError::EmptyFile`], [`MergeError::FileTooLarge`], or
/// [`MergeError::InvalidSignature`].
pub fn validate_source(file: &SourceFile, policy: &LoadPolicy) -> Result<()> {
    let size = file.size();

    if size == 0 {
        return Err(MergeError::EmptyFile {
            name: file.name().to_string(),
        });
    }

    if size > policy.max_file_size {
        return Err(MergeError::FileTooLarge {
            name: file.name().to_string(),
            size,
            limit: policy.max_file_size,
        });
    }

    if !has_pdf_signature(file.bytes()) {
        return Err(MergeError::InvalidSignature {
            name: file.name().to_string(),
        });
    }

    Ok(())
}
