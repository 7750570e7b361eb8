//! Merge progress phases.

use std::fmt;

/// A step of a running merge, reported to the progress observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MergePhase {
    /// The output document has been created.
    Preparing,
    /// Pages of the first source have been copied.
    AddingFirst,
    /// Pages of the second source have been copied.
    AddingSecond,
    /// All pages are attached; serialization is running.
    Finalizing,
    /// The merged bytes are available.
    Done,
}

impl MergePhase {
    /// Completion percentage shown for this phase.
    pub fn percent(self) -> u8 {
        match self {
            Self::Preparing => 25,
            Self::AddingFirst => 50,
            Self::AddingSecond => 75,
            Self::Finalizing => 90,
            Self::Done => 100,
        }
    }

    /// Label shown next to the progress indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::Preparing => "Preparing to merge...",
            Self::AddingFirst => "Adding pages from first PDF...",
            Self::AddingSecond => "Adding pages from second PDF...",
            Self::Finalizing => "Finalizing merged PDF...",
            Self::Done => "PDF merged successfully!",
        }
    }
}

impl fmt::Display for MergePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}% {}", self.percent(), self.label())
    }
}
