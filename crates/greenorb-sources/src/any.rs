//! Extension-based dispatch between document sources

use crate::error::SourceError;
use crate::pdf::PdfTextSource;
use crate::text::PlainTextSource;
use greenorb_domain::DocumentSource;
use std::path::Path;

/// Picks the PDF or plain-text extractor from the file extension
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyDocumentSource {
    pdf: PdfTextSource,
    text: PlainTextSource,
}

impl AnyDocumentSource {
    /// Create a dispatching source
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `path` has an extension this source can read
    pub fn supports(path: &Path) -> bool {
        Self::kind(path).is_some()
    }

    fn kind(path: &Path) -> Option<Kind> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Kind::Pdf),
            "txt" | "text" | "md" => Some(Kind::Text),
            _ => None,
        }
    }
}

enum Kind {
    Pdf,
    Text,
}

impl DocumentSource for AnyDocumentSource {
    type Error = SourceError;

    fn extract_pages(&self, path: &Path, max_pages: Option<usize>) -> Result<Vec<String>, SourceError> {
        match Self::kind(path) {
            Some(Kind::Pdf) => self.pdf.extract_pages(path, max_pages),
            Some(Kind::Text) => self.text.extract_pages(path, max_pages),
            None => Err(SourceError::Unsupported(path.to_path_buf())),
        }
    }
}
