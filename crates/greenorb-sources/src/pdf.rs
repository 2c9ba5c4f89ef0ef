//! PDF text extraction

use crate::error::SourceError;
use greenorb_domain::DocumentSource;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

/// Linear text extraction from PDF files via `pdf-extract`
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    /// Create a new PDF source
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSource for PdfTextSource {
    type Error = SourceError;

    fn extract_pages(&self, path: &Path, max_pages: Option<usize>) -> Result<Vec<String>, SourceError> {
        let bytes = std::fs::read(path)?;

        // pdf-extract panics on some malformed files
        let pages = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem_by_pages(&bytes)))
            .map_err(|_| SourceError::Pdf {
                path: path.to_path_buf(),
                message: "parser panicked".to_string(),
            })?
            .map_err(|e| SourceError::Pdf {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(match max_pages {
            Some(limit) => pages.into_iter().take(limit).collect(),
            None => pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = PdfTextSource::new()
            .extract_pages(&tmp.path().join("absent.pdf"), None)
            .unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn test_garbage_is_pdf_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = PdfTextSource::new().extract_pages(&path, Some(30)).unwrap_err();
        assert!(matches!(err, SourceError::Pdf { .. }));
    }
}
