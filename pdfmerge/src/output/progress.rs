//! Progress indicator for a running merge.
//!
//! The bar is driven by [`MergePhase`] values reported by
//! [`Session::merge_with_progress`](crate::session::Session::merge_with_progress).
//!
//! # Examples
//!
//! ```
//! use pdfmerge::output::progress::{ProgressBar, ProgressStyle};
//! use pdfmerge::session::MergePhase;
//!
//! let mut progress = ProgressBar::new(ProgressStyle::Lines);
//! progress.update(MergePhase::Preparing);
//! assert_eq!(progress.percent(), 25);
//! ```

use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

use crate::session::MergePhase;

/// Width of the bar between the brackets.
const BAR_WIDTH: usize = 30;

/// Style of progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStyle {
    /// Single redrawn line: `[=========>     ]  50% Adding pages...`
    Bar,
    /// One line per phase, for logs and pipes.
    Lines,
}

/// Progress indicator for merge phases.
#[derive(Debug)]
pub struct ProgressBar {
    /// Last reported phase.
    phase: Option<MergePhase>,
    /// Rendering style.
    style: ProgressStyle,
    /// Start time of the operation.
    start_time: Instant,
    /// Whether anything is printed.
    enabled: bool,
}

impl ProgressBar {
    /// Create a progress bar with the given style.
    pub fn new(style: ProgressStyle) -> Self {
        Self {
            phase: None,
            style,
            start_time: Instant::now(),
            enabled: true,
        }
    }

    /// Redrawn bar on a terminal, one line per phase otherwise.
    pub fn auto() -> Self {
        let style = if io::stdout().is_terminal() {
            ProgressStyle::Bar
        } else {
            ProgressStyle::Lines
        };
        Self::new(style)
    }

    /// Create a disabled progress bar (no output).
    pub fn disabled() -> Self {
        let mut pb = Self::new(ProgressStyle::Lines);
        pb.enabled = false;
        pb
    }

    /// Record a new phase and draw it.
    pub fn update(&mut self, phase: MergePhase) {
        self.phase = Some(phase);
        if !self.enabled {
            return;
        }

        let line = self.render();
        match self.style {
            ProgressStyle::Bar => {
                print!("\r\x1b[K{line}");
                if phase == MergePhase::Done {
                    println!();
                }
                io::stdout().flush().ok();
            }
            ProgressStyle::Lines => println!("{line}"),
        }
    }

    /// End the bar after a failed merge, leaving the cursor on a fresh line.
    pub fn abandon(&mut self) {
        if self.enabled
            && self.style == ProgressStyle::Bar
            && self.phase.is_some_and(|phase| phase != MergePhase::Done)
        {
            println!();
        }
    }

    /// The current line, without terminal control codes.
    pub fn render(&self) -> String {
        let percent = usize::from(self.percent());
        let label = self.phase.map_or("", MergePhase::label);

        match self.style {
            ProgressStyle::Bar => {
                let filled = BAR_WIDTH * percent / 100;
                let arrow = if filled > 0 && filled < BAR_WIDTH { ">" } else { "" };
                let bar = "=".repeat(filled.saturating_sub(arrow.len())) + arrow;
                format!(
                    "[{bar:<BAR_WIDTH$}] {percent:>3}% {label} ({})",
                    format_duration(self.elapsed())
                )
            }
            ProgressStyle::Lines => format!("[{percent:>3}%] {label}"),
        }
    }

    /// Last reported phase.
    pub fn phase(&self) -> Option<MergePhase> {
        self.phase
    }

    /// Current completion percentage.
    pub fn percent(&self) -> u8 {
        self.phase.map_or(0, MergePhase::percent)
    }

    /// Get the elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Format a duration as a human-readable string.
fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();

    if millis < 1000 {
        format!("{millis}ms")
    } else if millis < 60_000 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progress_bar() {
        let pb = ProgressBar::new(ProgressStyle::Bar);
        assert_eq!(pb.phase(), None);
        assert_eq!(pb.percent(), 0);
    }

    #[test]
    fn test_disabled_still_tracks_phase() {
        let mut pb = ProgressBar::disabled();
        pb.update(MergePhase::AddingSecond);

        assert!(!pb.enabled);
        assert_eq!(pb.phase(), Some(MergePhase::AddingSecond));
        assert_eq!(pb.percent(), 75);
    }

    #[test]
    fn test_render_lines() {
        let mut pb = ProgressBar::disabled();
        pb.update(MergePhase::Preparing);
        assert_eq!(pb.render(), "[ 25%] Preparing to merge...");

        pb.update(MergePhase::Done);
        assert_eq!(pb.render(), "[100%] PDF merged successfully!");
    }

    #[test]
    fn test_render_bar() {
        let mut pb = ProgressBar::new(ProgressStyle::Bar);
        pb.enabled = false;

        pb.update(MergePhase::AddingFirst);
        let line = pb.render();
        assert!(line.starts_with(&format!("[{}>{}]", "=".repeat(14), " ".repeat(15))));
        assert!(line.contains(" 50% Adding pages from first PDF..."));

        pb.update(MergePhase::Done);
        assert!(pb.render().starts_with(&format!("[{}]", "=".repeat(BAR_WIDTH))));
    }

    #[test]
    fn test_render_before_any_phase() {
        let pb = ProgressBar::new(ProgressStyle::Bar);
        assert!(pb.render().starts_with(&format!("[{}]   0%", " ".repeat(BAR_WIDTH))));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }
}
