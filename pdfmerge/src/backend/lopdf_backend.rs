//! [`PdfBackend`] implementation on top of `lopdf`.

use lopdf::{Document, Object, ObjectId, dictionary};
use tracing::debug;

use super::{BackendError, BackendResult, LoadOptions, PdfBackend};
use crate::config::CompressionLevel;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// A page object copied into a target document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRef(ObjectId);

impl PageRef {
    /// Object id of the page inside the target document.
    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

/// PDF backend built on `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfBackend {
    compression: CompressionLevel,
}

impl LopdfBackend {
    /// Create a backend that serializes with the given compression level.
    pub fn new(compression: CompressionLevel) -> Self {
        Self { compression }
    }
}

impl PdfBackend for LopdfBackend {
    type Document = Document;
    type Page = PageRef;

    fn load(&self, bytes: &[u8], options: LoadOptions) -> BackendResult<Document> {
        let document = Document::load_mem(bytes).map_err(classify_load_error)?;

        if options.reject_encrypted && document.trailer.has(b"Encrypt") {
            return Err(BackendError::Encrypted);
        }

        debug!(
            version = %document.version,
            objects = document.objects.len(),
            "parsed document"
        );
        Ok(document)
    }

    fn page_count(&self, document: &Document) -> usize {
        document.get_pages().len()
    }

    fn new_document(&self) -> BackendResult<Document> {
        let mut doc = Document::with_version("1.7");

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }

    fn copy_pages(
        &self,
        target: &mut Document,
        source: &Document,
        indices: &[usize],
    ) -> BackendResult<Vec<PageRef>> {
        // Work on a renumbered clone so the source handle stays reusable and
        // its ids cannot collide with the target's.
        let mut source = source.clone();
        source.renumber_objects_with(target.max_id + 1);

        let pages = source.get_pages();
        let page_count = pages.len();

        let mut page_ids = Vec::with_capacity(indices.len());
        for &index in indices {
            let page_id = u32::try_from(index + 1)
                .ok()
                .and_then(|number| pages.get(&number).copied())
                .ok_or(BackendError::PageOutOfRange { index, page_count })?;
            page_ids.push(page_id);
        }

        for &page_id in &page_ids {
            materialize_inherited(&mut source, page_id)?;
        }

        // The source catalog and page-tree nodes are replaced by the target's.
        let source_max_id = source.max_id;
        let mut moved = 0usize;
        for (id, object) in source.objects {
            if has_type(&object, b"Catalog") || has_type(&object, b"Pages") {
                continue;
            }
            target.objects.insert(id, object);
            moved += 1;
        }
        target.max_id = target.max_id.max(source_max_id);

        debug!(pages = page_ids.len(), objects = moved, "copied pages");
        Ok(page_ids.into_iter().map(PageRef).collect())
    }

    fn add_page(&self, target: &mut Document, page: PageRef) -> BackendResult<()> {
        let pages_id = target
            .catalog()
            .and_then(|catalog| catalog.get(b"Pages"))
            .and_then(Object::as_reference)
            .map_err(|e| structure("failed to get pages reference", e))?;

        target
            .get_dictionary_mut(page.0)
            .map_err(|e| structure("copied page is missing", e))?
            .set("Parent", pages_id);

        let pages_dict = target
            .get_dictionary_mut(pages_id)
            .map_err(|e| structure("failed to get pages object", e))?;

        pages_dict
            .get_mut(b"Kids")
            .and_then(Object::as_array_mut)
            .map_err(|e| structure("pages dictionary missing Kids array", e))?
            .push(Object::Reference(page.0));

        let count = pages_dict
            .get(b"Count")
            .and_then(Object::as_i64)
            .unwrap_or(0);
        pages_dict.set("Count", count + 1);

        Ok(())
    }

    fn serialize(&self, target: &mut Document) -> BackendResult<Vec<u8>> {
        let pruned = target.prune_objects();

        match self.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => target.compress(),
            CompressionLevel::Maximum => {
                target.renumber_objects();
                target.compress();
            }
        }

        let mut bytes = Vec::new();
        target
            .save_to(&mut bytes)
            .map_err(|e| BackendError::Serialize(e.to_string()))?;

        debug!(
            pruned = pruned.len(),
            bytes = bytes.len(),
            "serialized document"
        );
        Ok(bytes)
    }
}

/// Map a `lopdf` load failure onto the backend's structured kinds.
fn classify_load_error(err: lopdf::Error) -> BackendError {
    match err {
        lopdf::Error::Decryption(_) => BackendError::Encrypted,
        lopdf::Error::IO(source) => BackendError::Io(source),
        other => BackendError::Malformed(other.to_string()),
    }
}

fn structure(context: &str, err: lopdf::Error) -> BackendError {
    BackendError::Structure(format!("{context}: {err}"))
}

fn has_type(object: &Object, type_name: &[u8]) -> bool {
    match object {
        Object::Dictionary(dict) => dict
            .get(b"Type")
            .and_then(Object::as_name)
            .is_ok_and(|name| name == type_name),
        _ => false,
    }
}

/// Copy inheritable attributes from the page's ancestors onto the page
/// itself, so the page keeps its geometry and resources once it is
/// re-parented under another page tree.
fn materialize_inherited(doc: &mut Document, page_id: ObjectId) -> BackendResult<()> {
    let inherited = {
        let page = doc
            .get_dictionary(page_id)
            .map_err(|e| structure("failed to get page object", e))?;

        let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();

        let mut inherited: Vec<(Vec<u8>, Object)> = Vec::new();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        let mut depth = 0;

        while let Some(parent_id) = parent {
            if missing.is_empty() || depth >= MAX_TREE_DEPTH {
                break;
            }
            let Ok(node) = doc.get_dictionary(parent_id) else {
                break;
            };

            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    inherited.push((key.to_vec(), value.clone()));
                    false
                }
                Err(_) => true,
            });

            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
            depth += 1;
        }

        inherited
    };

    if inherited.is_empty() {
        return Ok(());
    }

    let page = doc
        .get_dictionary_mut(page_id)
        .map_err(|e| structure("failed to get page object", e))?;
    for (key, value) in inherited {
        page.set(key, value);
    }

    Ok(())
}
