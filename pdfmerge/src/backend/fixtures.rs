//! In-memory PDFs for tests.
//!
//! Compiled into the library's unit tests and, by path, into the
//! integration test harness.

use lopdf::{Document, Object, Stream, dictionary};

/// Page height used by every generated page.
pub const PAGE_HEIGHT: f32 = 842.0;

/// Build a PDF whose pages have the given MediaBox widths, in order.
///
/// Widths double as page identities: a merged document's page order can be
/// read back from its MediaBox widths.
pub fn pdf_with_widths(widths: &[f32]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let resources_id = doc.add_object(dictionary! {
        "ProcSet" => vec![Object::Name(b"PDF".to_vec())],
    });

    let mut kids = Vec::new();
    for &width in widths {
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), PAGE_HEIGHT.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    save(doc, pages_id)
}

/// Build a PDF whose pages inherit MediaBox and Resources from the page tree.
pub fn pdf_with_inherited_media_box(pages: usize, width: f32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let resources_id = doc.add_object(dictionary! {
        "ProcSet" => vec![Object::Name(b"PDF".to_vec())],
    });

    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
            });
            Object::Reference(page_id)
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), PAGE_HEIGHT.into()],
            "Resources" => resources_id,
        }),
    );

    save(doc, pages_id)
}

/// A one-page PDF whose trailer names a standard security handler.
pub fn pdf_with_encrypt_entry() -> Vec<u8> {
    let mut doc = Document::load_mem(&pdf_with_widths(&[100.0])).expect("fixture parses");
    let encrypt_id = doc.add_object(dictionary! { "Filter" => "Standard" });
    doc.trailer.set("Encrypt", encrypt_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("fixture serializes");
    bytes
}

/// Page widths of a serialized PDF, in page order.
pub fn widths_of(bytes: &[u8]) -> Vec<f32> {
    let doc = Document::load_mem(bytes).expect("output is a readable PDF");
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let page = doc.get_dictionary(page_id).expect("page object");
            let media_box = page
                .get(b"MediaBox")
                .and_then(Object::as_array)
                .expect("page has a MediaBox");
            media_box[2].as_float().expect("numeric width")
        })
        .collect()
}

fn save(mut doc: Document, pages_id: lopdf::ObjectId) -> Vec<u8> {
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("fixture serializes");
    bytes
}
