//! Session actions shared by the one-shot and interactive modes.

use std::path::Path;

use tokio::io::AsyncBufRead;
use tracing::debug;

use pdfmerge::backend::PdfBackend;
use pdfmerge::config::OverwriteMode;
use pdfmerge::error::{MergeError, Result};
use pdfmerge::io::{PdfWriter, SourceReader, check_file_name};
use pdfmerge::output::{self, OutputFormatter, ProgressBar};
use pdfmerge::session::{SavedFile, Session, Slot, resolve_file_name};

use crate::prompt::Prompter;

/// Read `path` and load it into `slot`.
///
/// A file that cannot be read leaves the slot empty, like one that fails
/// validation.
pub async fn load_slot<B: PdfBackend>(
    session: &mut Session<B>,
    reader: &SourceReader,
    slot: Slot,
    path: &Path,
    formatter: &OutputFormatter,
) -> Result<()> {
    output::display_loading(formatter, slot);

    let file = match reader.read(path).await {
        Ok(file) => file,
        Err(err) => {
            session.clear_slot(slot);
            return Err(err);
        }
    };

    session.load(slot, file)?;
    if let Some(status) = session.status().slot(slot) {
        output::display_loaded(formatter, status);
    }
    Ok(())
}

/// Merge both slots while drawing the progress indicator.
pub fn merge<B: PdfBackend>(session: &mut Session<B>, formatter: &OutputFormatter) -> Result<()> {
    if !session.can_merge() {
        return Err(MergeError::MissingSources);
    }

    let mut progress = if formatter.should_print() {
        ProgressBar::auto()
    } else {
        ProgressBar::disabled()
    };

    let result = session.merge_with_progress(|phase| progress.update(phase));
    let output = match result {
        Ok(output) => output,
        Err(err) => {
            progress.abandon();
            return Err(err);
        }
    };

    formatter.detail("Pages", &output.page_count().to_string());
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", output.merge_time().as_secs_f64()),
    );
    Ok(())
}

/// Save the merged output under `requested`, asking before replacing an
/// existing file when the writer is in prompt mode.
pub async fn download<B, R>(
    session: &Session<B>,
    writer: &mut PdfWriter,
    requested: &str,
    formatter: &OutputFormatter,
    prompter: &mut Prompter<R>,
) -> Result<SavedFile>
where
    B: PdfBackend,
    R: AsyncBufRead + Unpin,
{
    if session.output().is_none() {
        return Err(MergeError::NothingToDownload);
    }

    let file_name = resolve_file_name(requested);
    check_file_name(&file_name)?;
    let mode = writer.overwrite_mode();
    if handle_output_overwrite(writer, &file_name, formatter, prompter).await? {
        writer.set_overwrite_mode(OverwriteMode::Force);
    }

    let result = session.download(requested, writer);
    writer.set_overwrite_mode(mode);

    let saved = result?;
    output::display_saved(formatter, &saved);
    if let Some(stats) = writer.last_write() {
        formatter.detail(
            "Write time",
            &format!("{:.2}s", stats.write_time.as_secs_f64()),
        );
    }
    Ok(saved)
}

/// Handle output file overwrite scenarios.
///
/// Returns `true` when the user agreed to replace an existing file.
pub async fn handle_output_overwrite<R: AsyncBufRead + Unpin>(
    writer: &PdfWriter,
    file_name: &str,
    formatter: &OutputFormatter,
    prompter: &mut Prompter<R>,
) -> Result<bool> {
    if !writer.exists(file_name).await {
        return Ok(false);
    }

    let path = writer.path_for(file_name);
    match writer.overwrite_mode() {
        OverwriteMode::Force => Ok(false),
        OverwriteMode::NoClobber => Err(MergeError::output_exists(path)),
        OverwriteMode::Prompt => {
            // In quiet mode, treat as no-clobber
            if formatter.is_quiet() {
                return Err(MergeError::output_exists(path));
            }

            formatter.warning(&format!("Output file already exists: {}", path.display()));
            if prompter.confirm("Overwrite?").await? {
                debug!(path = %path.display(), "overwrite confirmed");
                Ok(true)
            } else {
                Err(MergeError::Cancelled)
            }
        }
    }
}
