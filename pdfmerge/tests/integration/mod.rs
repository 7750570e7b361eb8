//! Integration tests for pdfmerge.
//!
//! These tests exercise the full read, load, merge and download flow
//! against PDFs generated on the fly.

use std::path::{Path, PathBuf};

use pdfmerge::Session;
use pdfmerge::backend::LopdfBackend;
use pdfmerge::config::LoadPolicy;

// The same builders the library's unit tests use.
#[path = "../../src/backend/fixtures.rs"]
#[allow(dead_code)]
mod fixtures;

pub use fixtures::{pdf_with_encrypt_entry, pdf_with_widths, widths_of};

/// Write `bytes` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("Failed to write fixture");
    path
}

/// A session over the real backend with the default load policy.
pub fn lopdf_session() -> Session<LopdfBackend> {
    Session::new(LopdfBackend::default(), LoadPolicy::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_widths() {
        let bytes = pdf_with_widths(&[100.0, 200.0]);
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(widths_of(&bytes), vec![100.0, 200.0]);
    }
}
