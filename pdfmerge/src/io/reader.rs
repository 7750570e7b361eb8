//! Reading source files from disk.
//!
//! The reader turns a path into a [`SourceFile`] the session can validate.
//! It maps filesystem failures onto [`MergeError`] kinds and skips reading
//! files that are already known to be over the size ceiling.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::config::LoadPolicy;
//! use pdfmerge::io::SourceReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = SourceReader::new(&LoadPolicy::default());
//! let (first, second) = reader
//!     .read_pair(Path::new("a.pdf"), Path::new("b.pdf"))
//!     .await?;
//! println!("{} + {} bytes", first.size(), second.size());
//! # Ok(())
//! # }
//! ```

use std::io;
use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::config::LoadPolicy;
use crate::error::{MergeError, Result};
use crate::session::SourceFile;
use crate::utils::display_name;

/// Async reader for source PDFs.
#[derive(Debug, Clone)]
pub struct SourceReader {
    max_file_size: u64,
}

impl SourceReader {
    /// Create a reader that stops short of files above the policy ceiling.
    pub fn new(policy: &LoadPolicy) -> Self {
        Self {
            max_file_size: policy.max_file_size,
        }
    }

    /// Read one file.
    ///
    /// Files larger than the ceiling are returned with their size only, so
    /// the session can reject them without the bytes ever being loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist ([`MergeError::FileNotFound`])
    /// - The path is a directory ([`MergeError::NotAFile`])
    /// - The file cannot be read ([`MergeError::FileNotAccessible`])
    pub async fn read(&self, path: &Path) -> Result<SourceFile> {
        let start = Instant::now();
        let name = display_name(path);

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| access_error(path, e))?;

        if !metadata.is_file() {
            return Err(MergeError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        if metadata.len() > self.max_file_size {
            debug!(path = %path.display(), size = metadata.len(), "skipping oversized read");
            return Ok(SourceFile::oversized(name, metadata.len()));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| access_error(path, e))?;

        debug!(
            path = %path.display(),
            size = bytes.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "read source"
        );
        Ok(SourceFile::new(name, bytes))
    }

    /// Read both sources concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first error either read reports.
    pub async fn read_pair(&self, first: &Path, second: &Path) -> Result<(SourceFile, SourceFile)> {
        futures::try_join!(self.read(first), self.read(second))
    }
}

fn access_error(path: &Path, err: io::Error) -> MergeError {
    match err.kind() {
        io::ErrorKind::NotFound => MergeError::FileNotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::IsADirectory => MergeError::NotAFile {
            path: path.to_path_buf(),
        },
        _ => MergeError::FileNotAccessible {
            path: path.to_path_buf(),
            source: err,
        },
    }
}
