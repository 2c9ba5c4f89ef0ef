//! Source documents and the chunks cut from them

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Text extracted from one source (a file path or a URL)
///
/// Exists only for the duration of one pipeline run and is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    /// File path or URL the text came from
    pub id: String,

    /// Extracted text, possibly truncated to a character budget
    pub text: String,

    /// Unix timestamp (seconds) of the extraction
    pub extracted_at: u64,

    /// Whether `text` was cut short by the character budget
    pub truncated: bool,
}

impl SourceDocument {
    /// Create a document, truncating `text` to at most `max_chars` characters
    ///
    /// # Examples
    ///
    /// ```
    /// use greenorb_domain::SourceDocument;
    ///
    /// let doc = SourceDocument::new("report.pdf", "abcdef".to_string(), Some(4));
    /// assert_eq!(doc.text, "abcd");
    /// assert!(doc.truncated);
    /// ```
    pub fn new(id: impl Into<String>, text: String, max_chars: Option<usize>) -> Self {
        let (text, truncated) = match max_chars {
            Some(limit) => truncate_chars(text, limit),
            None => (text, false),
        };

        Self {
            id: id.into(),
            text,
            extracted_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            truncated,
        }
    }

    /// Number of characters in the (possibly truncated) text
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the document carries no extractable text
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Cut `text` down to `limit` characters, never splitting a UTF-8 sequence
fn truncate_chars(mut text: String, limit: usize) -> (String, bool) {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => {
            text.truncate(byte_idx);
            (text, true)
        }
        None => (text, false),
    }
}

/// A bounded, word-boundary-safe span of document text
///
/// Chunks are immutable once created. The parent reference is only used for
/// logging and progress reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Zero-based position within the parent document
    pub index: usize,

    /// Tokens of the span joined with single spaces
    pub text: String,

    /// Identifier of the parent document
    pub source_id: Arc<str>,
}

impl Chunk {
    /// Number of characters in the chunk
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
