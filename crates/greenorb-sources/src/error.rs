//! Error types for document and context sources

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a source
#[derive(Error, Debug)]
pub enum SourceError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF could not be parsed
    #[error("PDF extraction failed for {}: {message}", path.display())]
    Pdf {
        /// The file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// No extractor for this file type
    #[error("Unsupported document type: {}", .0.display())]
    Unsupported(PathBuf),

    /// The context lookup service failed
    #[error("Lookup failed: {0}")]
    Lookup(String),
}
