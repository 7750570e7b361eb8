//! Source slots and the files loaded into them.

use std::fmt;

use serde::Serialize;

/// One of the two source positions of a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Pages from this source come first.
    First,
    /// Pages from this source follow the first source's pages.
    Second,
}

impl Slot {
    /// Both slots in merge order.
    pub const ALL: [Slot; 2] = [Slot::First, Slot::Second];

    /// Lowercase name used in messages and commands.
    pub fn name(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A file selected by the user, before validation.
///
/// A reader that already knows a file is over the size ceiling may build
/// it with [`SourceFile::oversized`] and skip reading the bytes; the
/// declared size is what validation checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    size: u64,
    bytes: Vec<u8>,
}

impl SourceFile {
    /// Wrap the full contents of a file.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// Describe a file by size only, without its contents.
    pub fn oversized(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            bytes: Vec::new(),
        }
    }

    /// File name as shown to the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the file in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// File contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Metadata kept once the file is loaded.
    pub fn meta(&self) -> FileMeta {
        FileMeta {
            name: self.name.clone(),
            size: self.size,
        }
    }
}

/// Name and size of a loaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMeta {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

/// A validated, opened source held in a slot.
///
/// Only constructed by the session after the backend reported at least
/// one page.
#[derive(Debug)]
pub struct LoadedSource<D> {
    pub(crate) document: D,
    pub(crate) meta: FileMeta,
    pub(crate) page_count: usize,
}

impl<D> LoadedSource<D> {
    /// The opened document handle.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Metadata of the file the document came from.
    pub fn meta(&self) -> &FileMeta {
        &self.meta
    }

    /// Number of pages, always at least one.
    pub fn page_count(&self) -> usize {
        self.page_count
    }
}
