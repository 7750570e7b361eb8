//! Terminal notices.
//!
//! Every message the user sees goes through [`OutputFormatter`], which
//! decides from its [`Verbosity`] whether a notice is shown and renders it
//! with a marker and, on a terminal, a color.
//!
//! # Examples
//!
//! ```
//! use pdfmerge::output::formatter::{OutputFormatter, Verbosity};
//!
//! let formatter = OutputFormatter::new(Verbosity::Normal);
//! formatter.info("Loading first PDF...");
//! formatter.success("First PDF loaded successfully!");
//! formatter.error("Please select both PDF files before merging.");
//! ```

use std::io::{self, IsTerminal};

use crate::config::Config;

/// How much the formatter prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Warnings and errors only.
    Quiet,
    /// Progress, results, warnings and errors.
    #[default]
    Normal,
    /// Everything, including timing and diagnostic details.
    Verbose,
}

impl Verbosity {
    /// Pick a verbosity from the two CLI flags; `quiet` wins.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    fn shows(self, kind: MessageLevel) -> bool {
        match kind {
            MessageLevel::Warning | MessageLevel::Error => true,
            MessageLevel::Info | MessageLevel::Success => self >= Self::Normal,
            MessageLevel::Debug => self == Self::Verbose,
        }
    }
}

/// Kind of notice, mirroring the page's success, error and info toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Neutral progress text.
    Info,
    /// A completed action.
    Success,
    /// Something the user should look at before continuing.
    Warning,
    /// A rejected action. Written to stderr.
    Error,
    /// Verbose-only detail.
    Debug,
}

impl MessageLevel {
    fn marker(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn ansi(self) -> Option<&'static str> {
        match self {
            Self::Info => None,
            Self::Success => Some("32"),
            Self::Warning => Some("33"),
            Self::Error => Some("31"),
            Self::Debug => Some("36"),
        }
    }
}

/// Prints notices according to a [`Verbosity`].
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    verbosity: Verbosity,
    colored: bool,
}

impl OutputFormatter {
    /// Formatter at `verbosity`, colored when stdout is a terminal.
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            colored: io::stdout().is_terminal() && std::env::var_os("TERM").is_some(),
        }
    }

    /// Formatter for a run's configuration.
    ///
    /// A dry run is never quiet, since its report is the whole output.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Verbosity::from_flags(
            !config.should_print(),
            config.verbose,
        ))
    }

    /// Warnings and errors only.
    pub fn quiet() -> Self {
        Self::new(Verbosity::Quiet)
    }

    /// Everything.
    pub fn verbose() -> Self {
        Self::new(Verbosity::Verbose)
    }

    /// Disable colors regardless of the terminal.
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Current verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Neutral progress text.
    pub fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }

    /// A completed action.
    pub fn success(&self, message: &str) {
        self.emit(MessageLevel::Success, message);
    }

    /// Shown at every verbosity.
    pub fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// Shown at every verbosity, on stderr.
    pub fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    /// Verbose-only.
    pub fn debug(&self, message: &str) {
        self.emit(MessageLevel::Debug, message);
    }

    fn emit(&self, kind: MessageLevel, message: &str) {
        if !self.verbosity.shows(kind) {
            return;
        }
        let line = self.format_message(kind, message);
        if kind == MessageLevel::Error {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Render a notice with its marker, colored if enabled.
    pub fn format_message(&self, kind: MessageLevel, message: &str) -> String {
        let marker = kind.marker();
        match kind.ansi() {
            Some(code) if self.colored => format!("\x1b[{code}m{marker}{message}\x1b[0m"),
            _ => format!("{marker}{message}"),
        }
    }

    /// Heading preceded by an empty line.
    pub fn section(&self, title: &str) {
        if self.should_print() {
            println!("\n{title}");
        }
    }

    /// `label: value`, verbose only.
    pub fn detail(&self, label: &str, value: &str) {
        if self.is_verbose() {
            println!("  {label}: {value}");
        }
    }

    /// Aligned `label value` line for status listings.
    pub fn field(&self, label: &str, value: &str) {
        if self.should_print() {
            println!("  {label:<8} {value}");
        }
    }

    /// Empty line unless quiet.
    pub fn blank_line(&self) {
        if self.should_print() {
            println!();
        }
    }

    /// Whether normal output is printed.
    pub fn should_print(&self) -> bool {
        self.verbosity != Verbosity::Quiet
    }

    /// Whether verbose details are printed.
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Whether only warnings and errors are printed.
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(Verbosity::default())
    }
}
