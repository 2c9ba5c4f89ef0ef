//! GreenOrb Extractor
//!
//! Turns unstructured sustainability documents into validated company
//! records using a local language-model oracle.
//!
//! # Architecture
//!
//! ```text
//! Document → Segmenter → PromptBuilder → Oracle → ResponseParser → Normalizer → Ledger
//! ```
//!
//! Entity enrichment replaces the segmenter with an external context lookup;
//! the rest of the chain is shared.
//!
//! # Pipelines
//!
//! - **Bulk ingest**: every company mentioned in each chunk of a document
//! - **Report analysis**: the publisher of a sustainability report
//! - **Entity enrichment**: background facts about ranked companies
//!
//! Failures never escape a unit. Each one becomes a [`UnitOutcome`] and is
//! counted in the run's [`BatchReport`].
//!
//! # Example Usage
//!
//! ```no_run
//! use greenorb_extractor::{ExtractorConfig, Pipeline};
//! # use greenorb_domain::{DocumentSource, Ledger, Oracle};
//! # use std::path::PathBuf;
//!
//! # async fn example<O: Oracle, L: Ledger, S: DocumentSource + 'static>(
//! #     oracle: O, ledger: L, source: S,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(oracle, ledger, source, ExtractorConfig::default())?;
//!
//! let report = pipeline
//!     .run_reports(vec![PathBuf::from("RawData/ESG_Reports/acme_2024.pdf")])
//!     .await;
//!
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod metrics;
mod normalizer;
mod parser;
mod pipeline;
mod prompt;
mod stage;
mod types;

#[cfg(test)]
mod tests;

pub use chunking::{Chunks, Segmenter};
pub use config::ExtractorConfig;
pub use error::{ExtractorError, ParseFailure, ValidationFailure};
pub use metrics::BatchReport;
pub use normalizer::{decimal_field, integer_field, normalize, text_field, MIN_NAME_CHARS};
pub use parser::{Expect, ParseStrategy, Parsed, ResponseParser, SAMPLE_CHARS};
pub use pipeline::Pipeline;
pub use prompt::{PromptBuilder, PromptPayload, TemplateKind};
pub use stage::{SequentialRunner, Stage};
pub use types::{CandidateRecord, ExtractionUnit, OutcomeKind, UnitOutcome, UnitReport};
