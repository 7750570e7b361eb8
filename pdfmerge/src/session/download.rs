//! Handing merged bytes to the host.

use std::path::PathBuf;

use crate::config::DEFAULT_FILE_NAME;
use crate::error::Result;

/// Extension every downloaded file carries.
const PDF_EXTENSION: &str = ".pdf";

/// A place the merged PDF can be saved to.
///
/// The CLI saves into an output directory through
/// [`PdfWriter`](crate::io::PdfWriter); tests collect the bytes in memory.
pub trait SaveTarget {
    /// Save `bytes` under `file_name`, returning where they ended up.
    fn save(&mut self, bytes: &[u8], file_name: &str, mime_type: &str) -> Result<PathBuf>;
}

/// Outcome of a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// Final file name, always ending in `.pdf`.
    pub file_name: String,
    /// Location reported by the save target.
    pub location: PathBuf,
    /// Bytes written.
    pub size: u64,
}

/// Derive the download file name from what the user typed.
///
/// Surrounding whitespace is trimmed, a blank name falls back to
/// `merged-document`, and `.pdf` is appended unless already present.
///
/// ```
/// use pdfmerge::session::resolve_file_name;
///
/// assert_eq!(resolve_file_name("report"), "report.pdf");
/// assert_eq!(resolve_file_name("  "), "merged-document.pdf");
/// assert_eq!(resolve_file_name("x.pdf"), "x.pdf");
/// ```
pub fn resolve_file_name(requested: &str) -> String {
    let trimmed = requested.trim();
    let base = if trimmed.is_empty() {
        DEFAULT_FILE_NAME
    } else {
        trimmed
    };

    if base.ends_with(PDF_EXTENSION) {
        base.to_string()
    } else {
        format!("{base}{PDF_EXTENSION}")
    }
}
