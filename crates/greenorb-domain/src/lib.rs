//! GreenOrb Domain Layer
//!
//! Core value types and trait seams for the GreenOrb extraction pipeline.
//! Apart from `async-trait` this crate has no external dependencies;
//! serialization and transport live in the infrastructure crates.
//!
//! ## Key Concepts
//!
//! - **SourceDocument**: raw text pulled from a PDF report or web page
//! - **Chunk**: a bounded slice of that text sized for the oracle
//! - **RawOracleResponse**: untrusted text returned by the local language model
//! - **FieldValue**: a tagged optional separating "stated", "explicitly unknown"
//!   and "absent"
//! - **NormalizedRecord**: the strictly typed company record that gets persisted
//! - **Provenance**: where a record came from; drives the methodology string
//!
//! ## Architecture
//!
//! ```text
//! document → chunks → prompt → oracle → candidate → NormalizedRecord → ledger
//! ```
//!
//! Infrastructure crates implement the traits in [`traits`]:
//! `greenorb-llm` provides the [`traits::Oracle`], `greenorb-store` the
//! [`traits::Ledger`], and `greenorb-sources` the document and context
//! collaborators.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod entity;
pub mod field;
pub mod oracle;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use document::{Chunk, SourceDocument};
pub use entity::RankedCompany;
pub use field::{FieldValue, UNKNOWN_SENTINEL};
pub use oracle::{OracleOptions, OracleStatus, RawOracleResponse};
pub use record::{NormalizedRecord, Provenance};
pub use traits::{ContextLookup, DocumentSource, Ledger, Oracle, PersistOutcome};
