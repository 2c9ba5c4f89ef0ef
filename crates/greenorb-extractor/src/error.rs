//! Error types for the Extractor

use greenorb_domain::OracleStatus;
use thiserror::Error;

/// Errors that stop a pipeline from being built or a unit from starting
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The document text could not be extracted
    #[error("Source error: {0}")]
    Source(String),

    /// A blocking extraction task panicked or was cancelled
    #[error("Task failed: {0}")]
    Task(String),
}

/// Why an oracle response produced no candidate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseFailure {
    /// The oracle call itself failed
    #[error("oracle unavailable ({status})")]
    OracleUnavailable {
        /// Status reported by the oracle client
        status: OracleStatus,
    },

    /// No parse strategy produced JSON of the expected shape
    #[error("malformed output: {sample:?}")]
    MalformedOutput {
        /// At most the first 100 characters of the raw text
        sample: String,
    },
}

/// Why a candidate was rejected by the normalizer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// Name absent, a placeholder, or too short
    #[error("missing company name (found {found:?})")]
    MissingName {
        /// The rejected value, if the field was present
        found: Option<String>,
    },
}
