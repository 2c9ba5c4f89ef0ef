//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! infrastructure. Implementations live in other crates.

use crate::{NormalizedRecord, OracleOptions, RawOracleResponse};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// The local language-model service
///
/// Implemented by the infrastructure layer (greenorb-llm)
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send one prompt and return the raw text
    ///
    /// Never fails: transport errors, non-200 statuses and timeouts are all
    /// reported through [`RawOracleResponse::status`].
    async fn invoke(&self, prompt: &str, options: &OracleOptions) -> RawOracleResponse;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}

/// Outcome of persisting one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Accepted by the remote store
    Saved,
    /// An identical record was already confirmed saved during this run
    DuplicateSkipped,
    /// The remote store was unreachable or answered with a non-200 status
    RemoteError(String),
}

impl PersistOutcome {
    /// True when the record is known to be in the remote store
    pub fn is_confirmed(&self) -> bool {
        matches!(self, PersistOutcome::Saved | PersistOutcome::DuplicateSkipped)
    }
}

/// Durable result store plus the processed-files ledger
///
/// Implemented by the infrastructure layer (greenorb-store)
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Error type for archive operations
    type Error: std::fmt::Display + Send;

    /// Write the local audit copy and push the record to the remote store
    async fn persist(&self, record: &NormalizedRecord) -> PersistOutcome;

    /// Move a fully handled source file into the processed area
    ///
    /// Callers must only archive after a confirmed persist.
    fn archive(&self, source: &Path) -> Result<PathBuf, Self::Error>;
}

/// Linear text extraction from a document
///
/// Implemented by the infrastructure layer (greenorb-sources)
pub trait DocumentSource: Send + Sync {
    /// Error type for extraction
    type Error: std::fmt::Display + Send;

    /// Extract the text of each page, stopping after `max_pages` if given
    fn extract_pages(&self, path: &Path, max_pages: Option<usize>) -> Result<Vec<String>, Self::Error>;

    /// Extract text from the first `max_pages` pages, pages joined by newlines
    fn extract_text(&self, path: &Path, max_pages: Option<usize>) -> Result<String, Self::Error> {
        let pages = self.extract_pages(path, max_pages)?;
        let mut text = String::new();
        for page in pages {
            text.push_str(&page);
            text.push('\n');
        }
        Ok(text)
    }
}

/// Free-text background about a named entity
///
/// Implemented by the infrastructure layer (greenorb-sources)
#[async_trait]
pub trait ContextLookup: Send + Sync {
    /// Look up `entity`; `None` when nothing is available or the lookup failed
    async fn lookup(&self, entity: &str) -> Option<String>;
}
