//! pdfmerge - Merge two PDF files into a single document.
//!
//! The library is built around a two-slot [`Session`]: load a first and a
//! second PDF, merge them (all pages of the first, then all pages of the
//! second), and download the result through a [`SaveTarget`]. It provides:
//!
//! - Validation of each source before it is parsed
//! - Distinct errors for password-protected, corrupted, and unreadable files
//! - Phase-by-phase merge progress
//! - A pluggable PDF backend, with a production one built on `lopdf`
//!
//! # Examples
//!
//! ## Basic Merge
//!
//! ```no_run
//! use pdfmerge::backend::LopdfBackend;
//! use pdfmerge::config::{LoadPolicy, OverwriteMode};
//! use pdfmerge::io::{PdfWriter, SourceReader};
//! use pdfmerge::session::{Session, Slot};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = LoadPolicy::default();
//! let reader = SourceReader::new(&policy);
//! let (first, second) = reader
//!     .read_pair(Path::new("a.pdf"), Path::new("b.pdf"))
//!     .await?;
//!
//! let mut session = Session::new(LopdfBackend::default(), policy);
//! session.load(Slot::First, first)?;
//! session.load(Slot::Second, second)?;
//! session.merge()?;
//!
//! let mut writer = PdfWriter::new(".", OverwriteMode::NoClobber);
//! let saved = session.download("report", &mut writer)?;
//! println!("Saved {}", saved.location.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Watching Progress
//!
//! ```no_run
//! # use pdfmerge::backend::LopdfBackend;
//! # use pdfmerge::session::Session;
//! # fn example(session: &mut Session<LopdfBackend>) -> pdfmerge::Result<()> {
//! session.merge_with_progress(|phase| {
//!     println!("{:>3}% {}", phase.percent(), phase.label());
//! })?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod config;
pub mod error;
pub mod io;
pub mod output;
pub mod session;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{MergeError, Result};
pub use session::{MergePhase, SaveTarget, Session, Slot, SourceFile};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
