//! Word-boundary text segmentation for bulk ingest

use greenorb_domain::Chunk;
use std::str::SplitWhitespace;
use std::sync::Arc;

/// Splits text into chunks of whitespace-delimited tokens
///
/// Tokens are accumulated greedily; a chunk is closed as soon as the next
/// token (plus one joining space) would push it past `max_chunk_chars`.
/// Only a single token longer than the limit can produce an oversized chunk.
#[derive(Debug, Clone, Copy)]
pub struct Segmenter {
    max_chunk_chars: usize,
}

impl Segmenter {
    /// Create a segmenter; a limit of zero is treated as one
    pub fn new(max_chunk_chars: usize) -> Self {
        Self {
            max_chunk_chars: max_chunk_chars.max(1),
        }
    }

    /// The chunk size limit in characters
    pub fn max_chunk_chars(&self) -> usize {
        self.max_chunk_chars
    }

    /// Lazily segment `text`
    ///
    /// The returned iterator can be cloned to restart or count.
    ///
    /// # Examples
    ///
    /// ```
    /// use greenorb_extractor::Segmenter;
    ///
    /// let chunks: Vec<_> = Segmenter::new(11)
    ///     .segment("alpha beta gamma delta", "doc")
    ///     .map(|c| c.text)
    ///     .collect();
    /// assert_eq!(chunks, vec!["alpha beta", "gamma delta"]);
    /// ```
    pub fn segment<'a>(&self, text: &'a str, source_id: impl Into<Arc<str>>) -> Chunks<'a> {
        Chunks {
            tokens: text.split_whitespace(),
            carry: None,
            max_chunk_chars: self.max_chunk_chars,
            next_index: 0,
            source_id: source_id.into(),
        }
    }
}

/// Iterator over the chunks of one text
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    tokens: SplitWhitespace<'a>,
    carry: Option<&'a str>,
    max_chunk_chars: usize,
    next_index: usize,
    source_id: Arc<str>,
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let first = match self.carry.take() {
            Some(token) => token,
            None => self.tokens.next()?,
        };

        let mut text = String::from(first);
        let mut len = first.chars().count();

        for token in self.tokens.by_ref() {
            let token_len = token.chars().count();
            if len + 1 + token_len > self.max_chunk_chars {
                self.carry = Some(token);
                break;
            }
            text.push(' ');
            text.push_str(token);
            len += 1 + token_len;
        }

        let chunk = Chunk {
            index: self.next_index,
            text,
            source_id: Arc::clone(&self.source_id),
        };
        self.next_index += 1;
        Some(chunk)
    }
}
