//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Oracle client could not be set up
    #[error("Oracle error: {0}")]
    Llm(#[from] greenorb_llm::LlmError),

    /// Store client or processed area failed
    #[error("Store error: {0}")]
    Store(#[from] greenorb_store::StoreError),

    /// Document or lookup source failed
    #[error("Source error: {0}")]
    Source(#[from] greenorb_sources::SourceError),

    /// Pipeline could not be built
    #[error("Pipeline error: {0}")]
    Extractor(#[from] greenorb_extractor::ExtractorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Blocking task failed to complete
    #[error("Task error: {0}")]
    Task(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
