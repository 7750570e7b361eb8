//! Output formatting and display for pdfmerge.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - The merge progress indicator
//! - Error display with per-kind user messages
//! - Session summaries
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::output::OutputFormatter;
//! use pdfmerge::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Loading first PDF...");
//! formatter.success("First PDF loaded successfully!");
//! # }
//! ```

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter, Verbosity};
pub use progress::{ProgressBar, ProgressStyle};

use crate::error::MergeError;
use crate::session::{SavedFile, SessionStatus, Slot, SlotStatus};
use crate::utils::format_file_size;

/// Show an error the way a user should see it.
///
/// The per-kind message is always printed; verbose mode adds the
/// underlying cause.
pub fn display_error(formatter: &OutputFormatter, err: &MergeError) {
    formatter.error(&err.user_message());

    let technical = err.to_string();
    if technical != err.user_message() {
        formatter.detail("Cause", &technical);
    }
}

/// Announce that a slot is being loaded.
pub fn display_loading(formatter: &OutputFormatter, slot: Slot) {
    formatter.info(&format!("Loading {slot} PDF..."));
}

/// Announce a successfully loaded slot.
pub fn display_loaded(formatter: &OutputFormatter, status: &SlotStatus) {
    formatter.success(&format!("{} PDF loaded successfully!", capitalize(status.slot.name())));
    formatter.detail("File", &status.file.name);
    formatter.detail("Size", &format_file_size(status.file.size));
    formatter.detail("Pages", &status.page_count.to_string());
}

/// Announce a saved download.
pub fn display_saved(formatter: &OutputFormatter, saved: &SavedFile) {
    formatter.success("PDF downloaded successfully!");
    formatter.field("File", &saved.location.display().to_string());
    formatter.field("Size", &format_file_size(saved.size));
}

/// Show both slots and the output state.
pub fn display_status(formatter: &OutputFormatter, status: &SessionStatus) {
    formatter.section("Session");

    for slot in Slot::ALL {
        let value = match status.slot(slot) {
            Some(loaded) => describe_slot(loaded),
            None => "(empty)".to_string(),
        };
        formatter.field(&capitalize(slot.name()), &value);
    }

    let output = match &status.output {
        Some(output) => format!(
            "{} page(s), {}",
            output.page_count,
            format_file_size(output.size)
        ),
        None if status.can_merge => "ready to merge".to_string(),
        None => "(none)".to_string(),
    };
    formatter.field("Output", &output);
}

/// One-line summary of a loaded slot.
pub fn describe_slot(status: &SlotStatus) -> String {
    format!(
        "{} ({} page(s), {})",
        status.file.name,
        status.page_count,
        format_file_size(status.file.size)
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
