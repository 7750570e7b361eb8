//! Integration tests for the two-file merge flow.

use pdfmerge::Slot;
use pdfmerge::config::{LoadPolicy, OverwriteMode};
use pdfmerge::io::{PdfWriter, SourceReader};
use pdfmerge::session::MergePhase;
use tempfile::TempDir;

use crate::common::{lopdf_session, pdf_with_widths, widths_of, write_fixture};

#[tokio::test]
async fn test_merge_keeps_first_then_second_order() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_fixture(temp_dir.path(), "a.pdf", &pdf_with_widths(&[101.0, 102.0, 103.0]));
    let second = write_fixture(temp_dir.path(), "b.pdf", &pdf_with_widths(&[201.0, 202.0]));

    let reader = SourceReader::new(&LoadPolicy::default());
    let (a, b) = reader.read_pair(&first, &second).await.unwrap();

    let mut session = lopdf_session();
    assert_eq!(session.load(Slot::First, a).unwrap().page_count(), 3);
    assert_eq!(session.load(Slot::Second, b).unwrap().page_count(), 2);
    assert!(session.can_merge());

    let output = session.merge().unwrap();
    assert_eq!(output.page_count(), 5);
    assert!(output.bytes().starts_with(b"%PDF"));
    assert_eq!(
        widths_of(output.bytes()),
        vec![101.0, 102.0, 103.0, 201.0, 202.0]
    );
}

#[tokio::test]
async fn test_merge_and_download_report() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let first = write_fixture(temp_dir.path(), "a.pdf", &pdf_with_widths(&[300.0]));
    let second = write_fixture(temp_dir.path(), "b.pdf", &pdf_with_widths(&[400.0, 500.0]));

    let reader = SourceReader::new(&LoadPolicy::default());
    let mut session = lopdf_session();
    session.load(Slot::First, reader.read(&first).await.unwrap()).unwrap();
    session.load(Slot::Second, reader.read(&second).await.unwrap()).unwrap();
    session.merge().unwrap();

    let mut writer = PdfWriter::new(out_dir.path(), OverwriteMode::NoClobber);
    let saved = session.download("report", &mut writer).unwrap();

    assert_eq!(saved.file_name, "report.pdf");
    assert_eq!(saved.location, out_dir.path().join("report.pdf"));

    let written = std::fs::read(&saved.location).unwrap();
    assert_eq!(written.len() as u64, saved.size);
    assert_eq!(widths_of(&written), vec![300.0, 400.0, 500.0]);
}

#[tokio::test]
async fn test_merge_same_file_twice() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "same.pdf", &pdf_with_widths(&[111.0, 222.0]));

    let reader = SourceReader::new(&LoadPolicy::default());
    let (a, b) = reader.read_pair(&path, &path).await.unwrap();

    let mut session = lopdf_session();
    session.load(Slot::First, a).unwrap();
    session.load(Slot::Second, b).unwrap();

    let output = session.merge().unwrap();
    assert_eq!(widths_of(output.bytes()), vec![111.0, 222.0, 111.0, 222.0]);
}

#[tokio::test]
async fn test_merge_reports_every_phase() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "one.pdf", &pdf_with_widths(&[612.0]));

    let reader = SourceReader::new(&LoadPolicy::default());
    let mut session = lopdf_session();
    session.load(Slot::First, reader.read(&path).await.unwrap()).unwrap();
    session.load(Slot::Second, reader.read(&path).await.unwrap()).unwrap();

    let mut phases = Vec::new();
    session.merge_with_progress(|phase| phases.push(phase)).unwrap();

    assert_eq!(
        phases.iter().map(|phase| phase.percent()).collect::<Vec<_>>(),
        vec![25, 50, 75, 90, 100]
    );
    assert_eq!(phases.last(), Some(&MergePhase::Done));
}

#[tokio::test]
async fn test_replacing_a_source_discards_output() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_fixture(temp_dir.path(), "a.pdf", &pdf_with_widths(&[100.0]));
    let b = write_fixture(temp_dir.path(), "b.pdf", &pdf_with_widths(&[200.0]));
    let c = write_fixture(temp_dir.path(), "c.pdf", &pdf_with_widths(&[300.0, 301.0]));

    let reader = SourceReader::new(&LoadPolicy::default());
    let mut session = lopdf_session();
    session.load(Slot::First, reader.read(&a).await.unwrap()).unwrap();
    session.load(Slot::Second, reader.read(&b).await.unwrap()).unwrap();
    session.merge().unwrap();
    assert!(session.output().is_some());

    session.load(Slot::Second, reader.read(&c).await.unwrap()).unwrap();
    assert!(session.output().is_none());

    let output = session.merge().unwrap();
    assert_eq!(widths_of(output.bytes()), vec![100.0, 300.0, 301.0]);
}

#[tokio::test]
async fn test_status_after_merge() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_fixture(temp_dir.path(), "a.pdf", &pdf_with_widths(&[100.0, 110.0]));
    let b = write_fixture(temp_dir.path(), "b.pdf", &pdf_with_widths(&[200.0]));

    let reader = SourceReader::new(&LoadPolicy::default());
    let mut session = lopdf_session();
    session.load(Slot::First, reader.read(&a).await.unwrap()).unwrap();
    session.load(Slot::Second, reader.read(&b).await.unwrap()).unwrap();
    assert_eq!(session.status().expected_pages(), Some(3));

    session.merge().unwrap();
    let status = serde_json::to_value(session.status()).unwrap();
    assert_eq!(status["first"]["name"], "a.pdf");
    assert_eq!(status["second"]["page_count"], 1);
    assert_eq!(status["output"]["page_count"], 3);
    assert_eq!(status["can_merge"], true);
}
