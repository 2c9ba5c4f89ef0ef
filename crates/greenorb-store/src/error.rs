//! Error types for the persistence layer

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting or archiving
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store API answered with something other than 200
    #[error("Store API returned HTTP {0}")]
    Status(u16),

    /// The store API could not be reached
    #[error("Store API unreachable: {0}")]
    Transport(String),

    /// The path does not name a file
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),
}
