//! Integration tests for rejected inputs and out-of-order actions.

use lopdf::{Document, Object, dictionary};
use pdfmerge::backend::LopdfBackend;
use pdfmerge::config::{LoadPolicy, OverwriteMode};
use pdfmerge::error::MergeError;
use pdfmerge::io::{PdfWriter, SourceReader};
use pdfmerge::{Session, Slot, SourceFile};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{lopdf_session, pdf_with_encrypt_entry, pdf_with_widths, write_fixture};

/// A structurally valid PDF whose page tree is empty.
fn pdf_without_pages() -> Vec<u8> {
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

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[tokio::test]
async fn test_error_nonexistent_input() {
    let reader = SourceReader::new(&LoadPolicy::default());
    let result = reader.read("/nonexistent/file.pdf".as_ref()).await;
    assert!(matches!(result, Err(MergeError::FileNotFound { .. })));
}

#[tokio::test]
async fn test_error_directory_input() {
    let temp_dir = TempDir::new().unwrap();
    let reader = SourceReader::new(&LoadPolicy::default());
    let result = reader.read(temp_dir.path()).await;
    assert!(matches!(result, Err(MergeError::NotAFile { .. })));
}

#[rstest]
#[case::empty(b"".to_vec(), "Selected file is empty.")]
#[case::text(b"hello world".to_vec(), "This file is not a valid PDF. Please select a proper PDF file.")]
#[case::truncated(b"%PD".to_vec(), "This file is not a valid PDF. Please select a proper PDF file.")]
fn test_rejected_before_parsing(#[case] bytes: Vec<u8>, #[case] message: &str) {
    let mut session = lopdf_session();
    let err = session
        .load(Slot::First, SourceFile::new("bad.pdf", bytes))
        .unwrap_err();

    assert_eq!(err.user_message(), message);
    assert!(session.slot(Slot::First).is_none());
}

#[tokio::test]
async fn test_error_file_too_large_is_not_read() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "big.pdf", &pdf_with_widths(&[612.0]));
    let size = std::fs::metadata(&path).unwrap().len();

    let policy = LoadPolicy {
        max_file_size: size - 1,
        ..LoadPolicy::default()
    };
    let reader = SourceReader::new(&policy);
    let file = reader.read(&path).await.unwrap();
    assert!(file.bytes().is_empty());
    assert_eq!(file.size(), size);

    let mut session = Session::new(LopdfBackend::default(), policy);
    let err = session.load(Slot::Second, file).unwrap_err();
    assert!(matches!(err, MergeError::FileTooLarge { limit, .. } if limit == size - 1));
}

#[test]
fn test_error_corrupted_pdf() {
    let mut session = lopdf_session();
    let err = session
        .load(
            Slot::First,
            SourceFile::new("junk.pdf", b"%PDF-1.7\nthis is not a pdf body".to_vec()),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        MergeError::CorruptedOrInvalid { .. } | MergeError::GenericLoadFailure { .. }
    ));
    assert!(err.is_recoverable());
    assert!(session.slot(Slot::First).is_none());
}

#[test]
fn test_error_password_protected_pdf() {
    let mut session = lopdf_session();
    let err = session
        .load(Slot::First, SourceFile::new("p.pdf", pdf_with_encrypt_entry()))
        .unwrap_err();

    assert!(matches!(err, MergeError::PasswordProtected { ref name } if name == "p.pdf"));
    assert_eq!(
        err.user_message(),
        "This PDF is password-protected. Please use an unprotected PDF."
    );
    assert!(session.slot(Slot::First).is_none());
}

#[test]
fn test_error_zero_page_pdf() {
    let mut session = lopdf_session();
    let err = session
        .load(Slot::First, SourceFile::new("blank.pdf", pdf_without_pages()))
        .unwrap_err();

    assert!(matches!(err, MergeError::ZeroPageDocument { .. }));
    assert_eq!(
        err.user_message(),
        "This PDF has no pages. Please select a PDF with at least one page."
    );
}

#[test]
fn test_error_merge_with_one_source() {
    let mut session = lopdf_session();
    session
        .load(
            Slot::First,
            SourceFile::new("a.pdf", pdf_with_widths(&[100.0])),
        )
        .unwrap();

    assert!(!session.can_merge());
    assert!(matches!(session.merge(), Err(MergeError::MissingSources)));
    assert!(session.output().is_none());
}

#[test]
fn test_error_download_before_merge() {
    let temp_dir = TempDir::new().unwrap();
    let session = lopdf_session();
    let mut writer = PdfWriter::new(temp_dir.path(), OverwriteMode::Force);

    let result = session.download("report", &mut writer);
    assert!(matches!(result, Err(MergeError::NothingToDownload)));
    assert!(std::fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}

#[test]
fn test_failed_load_keeps_other_slot() {
    let mut session = lopdf_session();
    session
        .load(
            Slot::First,
            SourceFile::new("a.pdf", pdf_with_widths(&[100.0])),
        )
        .unwrap();

    let result = session.load(Slot::Second, SourceFile::new("b.pdf", Vec::new()));
    assert!(result.is_err());
    assert!(session.slot(Slot::First).is_some());
    assert!(session.slot(Slot::Second).is_none());
}
