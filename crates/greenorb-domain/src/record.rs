//! The persisted company record and its provenance

use crate::entity::RankedCompany;
use std::path::Path;

/// Where a record came from
///
/// Provenance is synthesized from the pipeline's own context and is never
/// taken from the oracle payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Provenance {
    /// A company mentioned anywhere in a bulk-ingested document
    BulkIngest {
        /// Identifier of the ingested document
        document: String,
    },
    /// The publisher of a sustainability report
    Report {
        /// File name of the report
        filename: String,
    },
    /// A company taken from a published ranking
    Ranking {
        /// The ranking row
        entity: RankedCompany,
    },
}

impl Provenance {
    /// Provenance for a report file, keyed by its file name
    pub fn report(path: &Path) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Provenance::Report { filename }
    }

    /// The methodology string persisted with the record
    ///
    /// # Examples
    ///
    /// ```
    /// use greenorb_domain::Provenance;
    ///
    /// let p = Provenance::Report { filename: "acme_2024.pdf".to_string() };
    /// assert_eq!(p.methodology(), "Extracted from ESG report acme_2024.pdf");
    /// ```
    pub fn methodology(&self) -> String {
        match self {
            Provenance::BulkIngest { document } => {
                format!("From bulk PDF ingest of {}", document)
            }
            Provenance::Report { filename } => {
                format!("Extracted from ESG report {}", filename)
            }
            Provenance::Ranking { entity } => format!(
                "Forbes 2000 Rank #{} | Market Cap: {}",
                entity.rank, entity.market_cap
            ),
        }
    }

    /// Source reference stored in the record's `url` column
    pub fn source_url(&self) -> String {
        match self {
            Provenance::Report { filename } => filename.clone(),
            Provenance::BulkIngest { .. } | Provenance::Ranking { .. } => NOT_AVAILABLE.to_string(),
        }
    }

    /// Default ESG grade when the oracle gives none
    ///
    /// Bulk ingest never asks for a grade, so it is reported as not applicable.
    pub fn default_grade(&self) -> &'static str {
        match self {
            Provenance::BulkIngest { .. } => NOT_AVAILABLE,
            Provenance::Report { .. } | Provenance::Ranking { .. } => crate::UNKNOWN_SENTINEL,
        }
    }
}

/// Placeholder for "not applicable"
pub const NOT_AVAILABLE: &str = "N/A";

/// A validated company record in the shape the remote store accepts
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Company name: trimmed, longer than two characters, never a placeholder
    pub name: String,

    /// Sector or industry
    pub sector: String,

    /// Country
    pub country: String,

    /// Summary of main products or services
    pub products: String,

    /// Reported annual CO2 emissions in metric tons; `None` unless explicitly stated
    pub co2: Option<f64>,

    /// Reported ESG grade, `"Unknown"` or `"N/A"`
    pub esg: String,

    /// Source reference (report file name or `"N/A"`)
    pub url: String,

    /// Provenance description
    pub methodology: String,

    /// Scope 1 emissions placeholder
    pub scope1: f64,

    /// Scope 2 emissions placeholder
    pub scope2: f64,

    /// Scope 3 emissions placeholder
    pub scope3: f64,

    /// Year the report covers
    pub report_year: Option<i32>,
}

impl NormalizedRecord {
    /// Key used for the local audit copy: normalized name plus year
    ///
    /// Whitespace and path-unsafe characters become underscores, and a missing
    /// year is spelled `Unknown`, so re-running with the same name/year pair
    /// lands on the same key.
    ///
    /// # Examples
    ///
    /// ```
    /// # use greenorb_domain::NormalizedRecord;
    /// let mut record = NormalizedRecord::placeholder("Acme Corp");
    /// assert_eq!(record.ledger_key(), "Acme_Corp_Unknown");
    /// record.report_year = Some(2024);
    /// assert_eq!(record.ledger_key(), "Acme_Corp_2024");
    /// ```
    pub fn ledger_key(&self) -> String {
        let name: String = self
            .name
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_whitespace() || c.is_control() => '_',
                c => c,
            })
            .collect();

        match self.report_year {
            Some(year) => format!("{}_{}", name, year),
            None => format!("{}_{}", name, crate::UNKNOWN_SENTINEL),
        }
    }

    /// A record with only a name and every other field at its default
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sector: crate::UNKNOWN_SENTINEL.to_string(),
            country: crate::UNKNOWN_SENTINEL.to_string(),
            products: crate::UNKNOWN_SENTINEL.to_string(),
            co2: None,
            esg: NOT_AVAILABLE.to_string(),
            url: NOT_AVAILABLE.to_string(),
            methodology: String::new(),
            scope1: 0.0,
            scope2: 0.0,
            scope3: 0.0,
            report_year: None,
        }
    }
}
