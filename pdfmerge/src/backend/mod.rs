//! The PDF library seam.
//!
//! The merge session never parses or writes PDF bytes itself. It drives a
//! [`PdfBackend`], which owns document parsing, cross-document page copying,
//! and serialization. The production implementation is
//! [`LopdfBackend`]; tests inject fakes.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::backend::{LoadOptions, LopdfBackend, PdfBackend};
//!
//! # fn example(a: &[u8], b: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let backend = LopdfBackend::default();
//! let first = backend.load(a, LoadOptions::default())?;
//! let second = backend.load(b, LoadOptions::default())?;
//!
//! let mut merged = backend.new_document()?;
//! for source in [&first, &second] {
//!     let run: Vec<usize> = (0..backend.page_count(source)).collect();
//!     for page in backend.copy_pages(&mut merged, source, &run)? {
//!         backend.add_page(&mut merged, page)?;
//!     }
//! }
//! let bytes = backend.serialize(&mut merged)?;
//! # Ok(())
//! # }
//! ```

mod lopdf_backend;

#[cfg(test)]
pub(crate) mod fixtures;

pub use lopdf_backend::{LopdfBackend, PageRef};

use std::io;

/// Result type for backend calls.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Options for [`PdfBackend::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Fail with [`BackendError::Encrypted`] instead of opening an
    /// encrypted document.
    pub reject_encrypted: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            reject_encrypted: true,
        }
    }
}

/// Structured failures reported by a backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The document is encrypted.
    #[error("document is encrypted")]
    Encrypted,

    /// The bytes could not be parsed as a PDF.
    #[error("malformed PDF: {0}")]
    Malformed(String),

    /// An I/O failure inside the library.
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    /// A page index outside `0..page_count` was requested.
    #[error("page index {index} out of range (document has {page_count} pages)")]
    PageOutOfRange {
        /// Requested zero-based index.
        index: usize,
        /// Pages in the source document.
        page_count: usize,
    },

    /// The document structure could not be manipulated.
    #[error("invalid document structure: {0}")]
    Structure(String),

    /// The document could not be written.
    #[error("serialization failed: {0}")]
    Serialize(String),
}

/// Operations the merge session needs from a PDF library.
///
/// Calls for one action are always made in sequence; implementations do
/// not need to be reentrant.
pub trait PdfBackend {
    /// An opened document.
    type Document;

    /// A page copied into a target document but not yet attached to it.
    type Page;

    /// Parse a document from raw bytes.
    fn load(&self, bytes: &[u8], options: LoadOptions) -> BackendResult<Self::Document>;

    /// Number of pages in a document.
    fn page_count(&self, document: &Self::Document) -> usize;

    /// Create an empty document with no pages.
    fn new_document(&self) -> BackendResult<Self::Document>;

    /// Copy the pages at `indices` (zero-based, in the given order) from
    /// `source` into `target`, returning one handle per index.
    fn copy_pages(
        &self,
        target: &mut Self::Document,
        source: &Self::Document,
        indices: &[usize],
    ) -> BackendResult<Vec<Self::Page>>;

    /// Append a copied page to the end of `target`.
    fn add_page(&self, target: &mut Self::Document, page: Self::Page) -> BackendResult<()>;

    /// Serialize `target` to PDF bytes.
    fn serialize(&self, target: &mut Self::Document) -> BackendResult<Vec<u8>>;
}
