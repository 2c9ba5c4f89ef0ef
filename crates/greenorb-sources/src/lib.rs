//! Document and context sources for GreenOrb
//!
//! - [`PdfTextSource`] and [`PlainTextSource`] turn files into page text,
//!   with [`AnyDocumentSource`] choosing between them by extension.
//! - [`parse_ranking`] reads a company ranking laid out one field per line.
//! - [`WikipediaLookup`] supplies encyclopedia summaries as enrichment context.

#![warn(missing_docs)]

mod any;
mod error;
mod pdf;
mod ranking;
mod text;
pub mod wikipedia;

pub use any::AnyDocumentSource;
pub use error::SourceError;
pub use pdf::PdfTextSource;
pub use ranking::{load_ranking, parse_ranking, parse_ranking_page, select_ranked};
pub use text::PlainTextSource;
pub use wikipedia::WikipediaLookup;
