//! Saving the merged PDF into an output directory.
//!
//! [`PdfWriter`] is the [`SaveTarget`] the CLI downloads into. It provides:
//! - Atomic writes (write to temp file, then rename)
//! - Overwrite protection
//! - Confinement to the output directory
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::config::OverwriteMode;
//! use pdfmerge::io::PdfWriter;
//! use pdfmerge::session::SaveTarget;
//!
//! # fn example(bytes: &[u8]) -> pdfmerge::Result<()> {
//! let mut writer = PdfWriter::new("out", OverwriteMode::NoClobber);
//! let path = writer.save(bytes, "merged.pdf", "application/pdf")?;
//! println!("saved to {}", path.display());
//! # Ok(())
//! # }
//! ```

use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::{OverwriteMode, PDF_MIME_TYPE};
use crate::error::{MergeError, Result};
use crate::session::SaveTarget;
use crate::utils::format_file_size;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes merged PDFs into one directory.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    output_dir: PathBuf,
    overwrite_mode: OverwriteMode,
    last_write: Option<WriteStatistics>,
}

impl PdfWriter {
    /// Create a writer for `output_dir`.
    ///
    /// Only [`OverwriteMode::Force`] replaces existing files; `Prompt` must
    /// be resolved by the caller, who switches to `Force` once the user
    /// agrees.
    pub fn new(output_dir: impl Into<PathBuf>, overwrite_mode: OverwriteMode) -> Self {
        Self {
            output_dir: output_dir.into(),
            overwrite_mode,
            last_write: None,
        }
    }

    /// Directory files are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Current overwrite behavior.
    pub fn overwrite_mode(&self) -> OverwriteMode {
        self.overwrite_mode
    }

    /// Change the overwrite behavior for subsequent writes.
    pub fn set_overwrite_mode(&mut self, mode: OverwriteMode) {
        self.overwrite_mode = mode;
    }

    /// Where a file with this name would be written.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Statistics of the most recent successful write.
    pub fn last_write(&self) -> Option<&WriteStatistics> {
        self.last_write.as_ref()
    }

    /// Write `bytes` to `file_name` inside the output directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `file_name` is not a plain file name (see [`check_file_name`])
    /// - The file exists and the mode is not [`OverwriteMode::Force`]
    /// - The file cannot be created or written
    /// - The atomic rename fails
    pub fn write(&mut self, bytes: &[u8], file_name: &str) -> Result<&WriteStatistics> {
        let start = Instant::now();
        check_file_name(file_name)?;
        let path = self.path_for(file_name);

        if self.overwrite_mode != OverwriteMode::Force && path.exists() {
            return Err(MergeError::output_exists(path));
        }

        let write_path = temp_path(&path);
        let result = write_all(&write_path, bytes).and_then(|()| {
            std::fs::rename(&write_path, &path).map_err(|e| MergeError::FailedToWrite {
                path: path.clone(),
                source: e,
            })
        });

        if result.is_err() {
            // Drop the partial temp file.
            let _ = std::fs::remove_file(&write_path);
        }
        result?;

        let stats = WriteStatistics {
            write_time: start.elapsed(),
            file_size: bytes.len() as u64,
            output_path: path,
        };
        debug!(
            path = %stats.output_path.display(),
            size = stats.file_size,
            "wrote output"
        );

        Ok(&*self.last_write.insert(stats))
    }

    /// Check if a file can be written to the output directory.
    ///
    /// Performs pre-flight checks without actually writing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output directory doesn't exist or is not a directory
    /// - The output directory is read-only
    pub async fn can_write(&self) -> Result<()> {
        let metadata = tokio::fs::metadata(&self.output_dir).await.map_err(|_| {
            MergeError::invalid_config(format!(
                "Output directory does not exist: {}",
                self.output_dir.display()
            ))
        })?;

        if !metadata.is_dir() {
            return Err(MergeError::invalid_config(format!(
                "Output path is not a directory: {}",
                self.output_dir.display()
            )));
        }

        if metadata.permissions().readonly() {
            return Err(MergeError::invalid_config(format!(
                "Output directory is not writable: {}",
                self.output_dir.display()
            )));
        }

        Ok(())
    }

    /// Check if a file with this name already exists in the output directory.
    pub async fn exists(&self, file_name: &str) -> bool {
        tokio::fs::metadata(self.path_for(file_name)).await.is_ok()
    }
}

impl SaveTarget for PdfWriter {
    fn save(&mut self, bytes: &[u8], file_name: &str, mime_type: &str) -> Result<PathBuf> {
        if mime_type != PDF_MIME_TYPE {
            return Err(MergeError::invalid_config(format!(
                "Unsupported output type: {mime_type}"
            )));
        }

        Ok(self.write(bytes, file_name)?.output_path.clone())
    }
}

/// Accept only a single plain path component.
///
/// Parent references, absolute paths and nested names would place the file
/// outside the output directory.
///
/// # Errors
///
/// Returns [`MergeError::InvalidConfig`] for any other name.
pub fn check_file_name(file_name: &str) -> Result<()> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !file_name.contains(['/', '\\']) => Ok(()),
        _ => Err(MergeError::invalid_config(format!(
            "File name must not contain a directory: {file_name}"
        ))),
    }
}

/// Sibling temp path used for atomic writes.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_all(path: &Path, bytes: &[u8]) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| MergeError::FailedToWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = std::io::BufWriter::new(file);
    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| MergeError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })
}
