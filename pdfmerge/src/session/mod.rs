//! The two-slot merge session.
//!
//! A [`Session`] holds up to two validated source documents and, after a
//! successful merge, the serialized result. All PDF work goes through the
//! injected [`PdfBackend`].
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::backend::LopdfBackend;
//! use pdfmerge::config::LoadPolicy;
//! use pdfmerge::session::{Session, Slot, SourceFile};
//!
//! # fn example(a: Vec<u8>, b: Vec<u8>) -> pdfmerge::Result<()> {
//! let mut session = Session::new(LopdfBackend::default(), LoadPolicy::default());
//! session.load(Slot::First, SourceFile::new("a.pdf", a))?;
//! session.load(Slot::Second, SourceFile::new("b.pdf", b))?;
//!
//! let output = session.merge()?;
//! println!("merged {} pages", output.page_count());
//! # Ok(())
//! # }
//! ```

mod download;
mod phase;
mod source;
mod status;

pub use download::{SaveTarget, SavedFile, resolve_file_name};
pub use phase::MergePhase;
pub use source::{FileMeta, LoadedSource, Slot, SourceFile};
pub use status::{OutputStatus, SessionStatus, SlotStatus};

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::backend::{BackendError, BackendResult, LoadOptions, PdfBackend};
use crate::config::{LoadPolicy, PDF_MIME_TYPE};
use crate::error::{MergeError, Result};
use crate::validation::validate_source;

/// Serialized result of a completed merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedOutput {
    bytes: Vec<u8>,
    page_count: usize,
    merge_time: Duration,
}

impl MergedOutput {
    /// The merged PDF.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the merged PDF in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Pages in the merged document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Time spent copying pages and serializing.
    pub fn merge_time(&self) -> Duration {
        self.merge_time
    }
}

/// Merge orchestrator for two source PDFs.
pub struct Session<B: PdfBackend> {
    backend: B,
    policy: LoadPolicy,
    first: Option<LoadedSource<B::Document>>,
    second: Option<LoadedSource<B::Document>>,
    output: Option<MergedOutput>,
}

impl<B: PdfBackend> Session<B> {
    /// Create an empty session around a backend.
    pub fn new(backend: B, policy: LoadPolicy) -> Self {
        Self {
            backend,
            policy,
            first: None,
            second: None,
            output: None,
        }
    }

    /// The backend this session drives.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Validation rules applied on load.
    pub fn policy(&self) -> &LoadPolicy {
        &self.policy
    }

    /// Validate `file` and open it into `slot`.
    ///
    /// Whatever the slot held before is discarded first, together with any
    /// merged output. On failure the slot stays empty.
    ///
    /// # Errors
    ///
    /// - [`MergeError::EmptyFile`], [`MergeError::FileTooLarge`] or
    ///   [`MergeError::InvalidSignature`] before the backend is called
    /// - [`MergeError::PasswordProtected`], [`MergeError::CorruptedOrInvalid`]
    ///   or [`MergeError::GenericLoadFailure`] when the backend refuses it
    /// - [`MergeError::ZeroPageDocument`] when it opens without pages
    pub fn load(&mut self, slot: Slot, file: SourceFile) -> Result<&LoadedSource<B::Document>> {
        self.clear_slot(slot);

        let loaded = self.open(&file).inspect_err(|err| {
            warn!(%slot, name = file.name(), error = %err, "rejected source");
        })?;

        info!(
            %slot,
            name = file.name(),
            size = file.size(),
            pages = loaded.page_count,
            "loaded source"
        );
        Ok(&*self.slot_entry(slot).insert(loaded))
    }

    fn open(&self, file: &SourceFile) -> Result<LoadedSource<B::Document>> {
        validate_source(file, &self.policy)?;

        let options = LoadOptions {
            reject_encrypted: self.policy.reject_encrypted,
        };
        let document = self
            .backend
            .load(file.bytes(), options)
            .map_err(|err| classify_load_error(file.name(), err))?;

        let page_count = self.backend.page_count(&document);
        if page_count == 0 {
            return Err(MergeError::ZeroPageDocument {
                name: file.name().to_string(),
            });
        }

        Ok(LoadedSource {
            document,
            meta: file.meta(),
            page_count,
        })
    }

    /// Empty one slot and discard the merged output.
    pub fn clear_slot(&mut self, slot: Slot) {
        if self.slot_entry(slot).take().is_some() {
            debug!(%slot, "cleared slot");
        }
        self.output = None;
    }

    /// Empty both slots and discard the merged output.
    pub fn reset(&mut self) {
        self.first = None;
        self.second = None;
        self.output = None;
        debug!("session reset");
    }

    /// The source loaded into `slot`, if any.
    pub fn slot(&self, slot: Slot) -> Option<&LoadedSource<B::Document>> {
        match slot {
            Slot::First => self.first.as_ref(),
            Slot::Second => self.second.as_ref(),
        }
    }

    fn slot_entry(&mut self, slot: Slot) -> &mut Option<LoadedSource<B::Document>> {
        match slot {
            Slot::First => &mut self.first,
            Slot::Second => &mut self.second,
        }
    }

    /// Whether both slots are loaded.
    pub fn can_merge(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    /// The output of the last successful merge.
    pub fn output(&self) -> Option<&MergedOutput> {
        self.output.as_ref()
    }

    /// Merge both sources without progress reporting.
    ///
    /// See [`Session::merge_with_progress`].
    pub fn merge(&mut self) -> Result<&MergedOutput> {
        self.merge_with_progress(|_| {})
    }

    /// Merge the first source's pages followed by the second's.
    ///
    /// `on_progress` sees each [`MergePhase`] in order; [`MergePhase::Done`]
    /// is reported only when the output has been stored.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::MissingSources`] without touching the backend
    /// when a slot is empty, and [`MergeError::MergeFailure`] when any
    /// backend step fails. A failed merge keeps the previous output.
    pub fn merge_with_progress<F>(&mut self, mut on_progress: F) -> Result<&MergedOutput>
    where
        F: FnMut(MergePhase),
    {
        let (Some(first), Some(second)) = (&self.first, &self.second) else {
            debug!("merge requested with an empty slot");
            return Err(MergeError::MissingSources);
        };

        let start = Instant::now();
        let (bytes, page_count) = run_merge(&self.backend, first, second, &mut on_progress)
            .map_err(|err| {
                warn!(error = %err, "merge failed");
                MergeError::merge_failed(err.to_string())
            })?;

        let output = MergedOutput {
            bytes,
            page_count,
            merge_time: start.elapsed(),
        };
        info!(
            pages = output.page_count,
            size = output.size(),
            elapsed_ms = output.merge_time.as_millis() as u64,
            "merged sources"
        );

        let output = self.output.insert(output);
        on_progress(MergePhase::Done);
        Ok(&*output)
    }

    /// Save the merged output through `target`.
    ///
    /// The file name comes from [`resolve_file_name`]. The output stays in
    /// the session and can be downloaded again.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::NothingToDownload`] before any merge, without
    /// calling `target`, or whatever error `target` reports.
    pub fn download<T>(&self, requested: &str, target: &mut T) -> Result<SavedFile>
    where
        T: SaveTarget + ?Sized,
    {
        let output = self.output.as_ref().ok_or(MergeError::NothingToDownload)?;
        let file_name = resolve_file_name(requested);

        let location = target.save(&output.bytes, &file_name, PDF_MIME_TYPE)?;
        info!(file = %location.display(), size = output.size(), "saved merged PDF");

        Ok(SavedFile {
            file_name,
            location,
            size: output.size(),
        })
    }

    /// Snapshot of the slots and output.
    pub fn status(&self) -> SessionStatus {
        let slot_status = |slot: Slot| {
            self.slot(slot).map(|loaded| SlotStatus {
                slot,
                file: loaded.meta.clone(),
                page_count: loaded.page_count,
            })
        };

        SessionStatus {
            first: slot_status(Slot::First),
            second: slot_status(Slot::Second),
            output: self.output.as_ref().map(|output| OutputStatus {
                size: output.size(),
                page_count: output.page_count,
            }),
            can_merge: self.can_merge(),
        }
    }
}

/// Copy every page of `first`, then every page of `second`, into a fresh
/// document and serialize it.
fn run_merge<B, F>(
    backend: &B,
    first: &LoadedSource<B::Document>,
    second: &LoadedSource<B::Document>,
    on_progress: &mut F,
) -> BackendResult<(Vec<u8>, usize)>
where
    B: PdfBackend,
    F: FnMut(MergePhase),
{
    let mut merged = backend.new_document()?;
    on_progress(MergePhase::Preparing);

    for (source, phase) in [
        (first, MergePhase::AddingFirst),
        (second, MergePhase::AddingSecond),
    ] {
        let run: Vec<usize> = (0..source.page_count).collect();
        let pages = backend.copy_pages(&mut merged, &source.document, &run)?;
        if pages.len() != run.len() {
            return Err(BackendError::Structure(format!(
                "expected {} copied pages from {}, got {}",
                run.len(),
                source.meta.name,
                pages.len()
            )));
        }

        for page in pages {
            backend.add_page(&mut merged, page)?;
        }
        debug!(name = %source.meta.name, pages = run.len(), "appended source pages");
        on_progress(phase);
    }

    on_progress(MergePhase::Finalizing);
    let page_count = backend.page_count(&merged);
    let bytes = backend.serialize(&mut merged)?;

    Ok((bytes, page_count))
}

/// Sort a backend load failure into the kinds users are told about.
fn classify_load_error(name: &str, err: BackendError) -> MergeError {
    let name = name.to_string();
    match err {
        BackendError::Encrypted => MergeError::PasswordProtected { name },
        BackendError::Malformed(details) | BackendError::Structure(details) => {
            MergeError::CorruptedOrInvalid { name, details }
        }
        other => MergeError::GenericLoadFailure {
            name,
            reason: other.to_string(),
        },
    }
}
