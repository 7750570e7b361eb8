//! File I/O for pdfmerge.
//!
//! This module is the host side of a session:
//! - Reading the two source files from disk
//! - Writing the merged PDF into an output directory
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::config::{LoadPolicy, OverwriteMode};
//! use pdfmerge::io::{PdfWriter, SourceReader};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = SourceReader::new(&LoadPolicy::default());
//! let source = reader.read(Path::new("input.pdf")).await?;
//!
//! let mut writer = PdfWriter::new(".", OverwriteMode::Force);
//! writer.write(source.bytes(), "copy.pdf")?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::SourceReader;
pub use writer::{PdfWriter, WriteStatistics, check_file_name};
