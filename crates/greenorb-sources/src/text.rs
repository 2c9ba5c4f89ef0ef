//! Plain-text documents (saved web pages, transcripts)

use crate::error::SourceError;
use greenorb_domain::DocumentSource;
use std::path::Path;

/// Form feed, the conventional page separator in text dumps
const PAGE_BREAK: char = '\u{c}';

/// UTF-8 text files, split into pages on form feeds
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl PlainTextSource {
    /// Create a new text source
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSource for PlainTextSource {
    type Error = SourceError;

    fn extract_pages(&self, path: &Path, max_pages: Option<usize>) -> Result<Vec<String>, SourceError> {
        let text = std::fs::read_to_string(path)?;
        Ok(text
            .split(PAGE_BREAK)
            .take(max_pages.unwrap_or(usize::MAX))
            .map(str::to_string)
            .collect())
    }
}
