//! Serializable snapshots of a session.

use serde::Serialize;

use super::source::{FileMeta, Slot};

/// State of one loaded slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    /// Which slot this is.
    pub slot: Slot,
    /// The loaded file.
    #[serde(flatten)]
    pub file: FileMeta,
    /// Pages in the loaded document.
    pub page_count: usize,
}

/// State of the merged output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputStatus {
    /// Size of the serialized PDF in bytes.
    pub size: u64,
    /// Pages in the merged document.
    pub page_count: usize,
}

/// Snapshot of a [`Session`](super::Session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    /// The first slot, if loaded.
    pub first: Option<SlotStatus>,
    /// The second slot, if loaded.
    pub second: Option<SlotStatus>,
    /// The merged output, if a merge has completed.
    pub output: Option<OutputStatus>,
    /// Whether both slots are loaded.
    pub can_merge: bool,
}

impl SessionStatus {
    /// Status of the given slot.
    pub fn slot(&self, slot: Slot) -> Option<&SlotStatus> {
        match slot {
            Slot::First => self.first.as_ref(),
            Slot::Second => self.second.as_ref(),
        }
    }

    /// Pages the merged document will have, once both slots are loaded.
    pub fn expected_pages(&self) -> Option<usize> {
        Some(self.first.as_ref()?.page_count + self.second.as_ref()?.page_count)
    }
}
