//! Integration tests for saving the merged output.

use pdfmerge::Slot;
use pdfmerge::backend::LopdfBackend;
use pdfmerge::config::{DEFAULT_FILE_NAME, OverwriteMode};
use pdfmerge::error::MergeError;
use pdfmerge::io::PdfWriter;
use pdfmerge::{Session, SourceFile};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{lopdf_session, pdf_with_widths, widths_of};

fn merged_session() -> Session<LopdfBackend> {
    let mut session = lopdf_session();
    session
        .load(Slot::First, SourceFile::new("a.pdf", pdf_with_widths(&[100.0])))
        .unwrap();
    session
        .load(Slot::Second, SourceFile::new("b.pdf", pdf_with_widths(&[200.0])))
        .unwrap();
    session.merge().unwrap();
    session
}

#[rstest]
#[case("", "merged-document.pdf")]
#[case("   ", "merged-document.pdf")]
#[case("report", "report.pdf")]
#[case("  report  ", "report.pdf")]
#[case("report.pdf", "report.pdf")]
#[case("notes.txt", "notes.txt.pdf")]
fn test_download_file_names(#[case] requested: &str, #[case] expected: &str) {
    let temp_dir = TempDir::new().unwrap();
    let session = merged_session();
    let mut writer = PdfWriter::new(temp_dir.path(), OverwriteMode::NoClobber);

    let saved = session.download(requested, &mut writer).unwrap();

    assert_eq!(saved.file_name, expected);
    assert!(temp_dir.path().join(expected).exists());
}

#[test]
fn test_default_name_constant() {
    assert_eq!(format!("{DEFAULT_FILE_NAME}.pdf"), "merged-document.pdf");
}

#[test]
fn test_download_no_clobber_keeps_existing() {
    let temp_dir = TempDir::new().unwrap();
    let existing = temp_dir.path().join("report.pdf");
    std::fs::write(&existing, b"existing").unwrap();

    let session = merged_session();
    let mut writer = PdfWriter::new(temp_dir.path(), OverwriteMode::NoClobber);
    let result = session.download("report", &mut writer);

    assert!(matches!(result, Err(MergeError::OutputExists { .. })));
    assert_eq!(std::fs::read(&existing).unwrap(), b"existing");
    assert!(session.output().is_some());
}

#[test]
fn test_download_force_replaces_existing() {
    let temp_dir = TempDir::new().unwrap();
    let existing = temp_dir.path().join("report.pdf");
    std::fs::write(&existing, b"existing").unwrap();

    let session = merged_session();
    let mut writer = PdfWriter::new(temp_dir.path(), OverwriteMode::Force);
    session.download("report", &mut writer).unwrap();

    assert_eq!(widths_of(&std::fs::read(&existing).unwrap()), vec![100.0, 200.0]);
}

#[test]
fn test_download_twice_under_different_names() {
    let temp_dir = TempDir::new().unwrap();
    let session = merged_session();
    let mut writer = PdfWriter::new(temp_dir.path(), OverwriteMode::NoClobber);

    let first = session.download("one", &mut writer).unwrap();
    let second = session.download("two", &mut writer).unwrap();

    assert_eq!(first.size, second.size);
    assert_eq!(
        std::fs::read(&first.location).unwrap(),
        std::fs::read(&second.location).unwrap()
    );
}

#[test]
fn test_download_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let session = merged_session();
    let mut writer = PdfWriter::new(temp_dir.path(), OverwriteMode::Force);

    session.download("report", &mut writer).unwrap();

    let names: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["report.pdf"]);
}

#[rstest]
#[case("../escaped")]
#[case("nested/escaped")]
fn test_download_cannot_leave_output_dir(#[case] requested: &str) {
    let root = TempDir::new().unwrap();
    let out = root.path().join("out");
    std::fs::create_dir_all(out.join("nested")).unwrap();

    let session = merged_session();
    let mut writer = PdfWriter::new(&out, OverwriteMode::Force);
    let result = session.download(requested, &mut writer);

    assert!(matches!(result, Err(MergeError::InvalidConfig { .. })));
    assert!(!root.path().join("escaped.pdf").exists());
    assert!(!out.join("nested").join("escaped.pdf").exists());
}

#[test]
fn test_download_absolute_name_is_refused() {
    let root = TempDir::new().unwrap();
    let out = root.path().join("out");
    std::fs::create_dir(&out).unwrap();
    let target = root.path().join("abs");

    let session = merged_session();
    let mut writer = PdfWriter::new(&out, OverwriteMode::Force);
    let result = session.download(target.to_str().unwrap(), &mut writer);

    assert!(matches!(result, Err(MergeError::InvalidConfig { .. })));
    assert!(!root.path().join("abs.pdf").exists());
}

#[test]
fn test_download_into_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let session = merged_session();
    let mut writer = PdfWriter::new(temp_dir.path().join("missing"), OverwriteMode::Force);

    let result = session.download("report", &mut writer);
    assert!(matches!(result, Err(MergeError::FailedToWrite { .. })));
}
