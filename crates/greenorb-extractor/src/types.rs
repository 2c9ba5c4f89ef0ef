//! Types flowing between pipeline stages

use crate::error::{ParseFailure, ValidationFailure};
use greenorb_domain::{OracleStatus, PersistOutcome, RankedCompany};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// An untyped JSON object returned by the oracle
///
/// Fields may be missing, wrongly typed, or carry the `"Unknown"` sentinel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandidateRecord(Map<String, Value>);

impl CandidateRecord {
    /// Wrap a JSON object map
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Convert a JSON value, `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Look up a raw field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the oracle returned `{}`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One unit of pipeline work
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionUnit {
    /// A document whose every company mention is extracted
    Bulk(PathBuf),
    /// A sustainability report describing its publisher
    Report(PathBuf),
    /// A ranked company to enrich
    Entity(RankedCompany),
}

impl ExtractionUnit {
    /// Identifier used in logs and reports
    pub fn id(&self) -> String {
        match self {
            ExtractionUnit::Bulk(path) | ExtractionUnit::Report(path) => {
                path.display().to_string()
            }
            ExtractionUnit::Entity(company) => format!("#{} {}", company.rank, company.name),
        }
    }
}

/// Classification of a unit outcome, used for batch counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeKind {
    /// Record accepted by the remote store
    Saved,
    /// Identical record already saved this run
    DuplicateSkipped,
    /// Oracle call failed
    OracleUnavailable,
    /// Oracle text was not usable JSON
    MalformedOutput,
    /// Candidate had no usable company name
    MissingName,
    /// Remote store rejected or could not be reached
    RemoteError,
    /// Document text could not be extracted
    SourceUnreadable,
    /// Document had no text
    EmptyDocument,
}

impl OutcomeKind {
    /// All kinds, in display order
    pub const ALL: [OutcomeKind; 8] = [
        OutcomeKind::Saved,
        OutcomeKind::DuplicateSkipped,
        OutcomeKind::OracleUnavailable,
        OutcomeKind::MalformedOutput,
        OutcomeKind::MissingName,
        OutcomeKind::RemoteError,
        OutcomeKind::SourceUnreadable,
        OutcomeKind::EmptyDocument,
    ];

    /// Stable kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Saved => "saved",
            OutcomeKind::DuplicateSkipped => "duplicate-skipped",
            OutcomeKind::OracleUnavailable => "oracle-unavailable",
            OutcomeKind::MalformedOutput => "malformed-output",
            OutcomeKind::MissingName => "missing-name",
            OutcomeKind::RemoteError => "remote-error",
            OutcomeKind::SourceUnreadable => "source-unreadable",
            OutcomeKind::EmptyDocument => "empty-document",
        }
    }

    /// True for outcomes that count as failures
    pub fn is_failure(&self) -> bool {
        !matches!(self, OutcomeKind::Saved | OutcomeKind::DuplicateSkipped)
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one record, chunk or document
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOutcome {
    /// Record persisted
    Saved {
        /// Company name
        name: String,
    },
    /// Record already persisted this run
    DuplicateSkipped {
        /// Company name
        name: String,
    },
    /// Oracle call failed
    OracleUnavailable {
        /// Failure status
        status: OracleStatus,
    },
    /// Oracle text was not usable
    MalformedOutput {
        /// Start of the raw text
        sample: String,
    },
    /// Candidate rejected for its name
    MissingName {
        /// The rejected value
        found: Option<String>,
    },
    /// Remote store failure
    RemoteError {
        /// Company name
        name: String,
        /// Failure description
        reason: String,
    },
    /// Extraction failed before the oracle was called
    SourceUnreadable {
        /// Failure description
        reason: String,
    },
    /// Document had no text
    EmptyDocument,
}

impl UnitOutcome {
    /// Build the outcome of a persist call
    pub fn persisted(name: &str, outcome: PersistOutcome) -> Self {
        let name = name.to_string();
        match outcome {
            PersistOutcome::Saved => UnitOutcome::Saved { name },
            PersistOutcome::DuplicateSkipped => UnitOutcome::DuplicateSkipped { name },
            PersistOutcome::RemoteError(reason) => UnitOutcome::RemoteError { name, reason },
        }
    }

    /// Counter kind
    pub fn kind(&self) -> OutcomeKind {
        match self {
            UnitOutcome::Saved { .. } => OutcomeKind::Saved,
            UnitOutcome::DuplicateSkipped { .. } => OutcomeKind::DuplicateSkipped,
            UnitOutcome::OracleUnavailable { .. } => OutcomeKind::OracleUnavailable,
            UnitOutcome::MalformedOutput { .. } => OutcomeKind::MalformedOutput,
            UnitOutcome::MissingName { .. } => OutcomeKind::MissingName,
            UnitOutcome::RemoteError { .. } => OutcomeKind::RemoteError,
            UnitOutcome::SourceUnreadable { .. } => OutcomeKind::SourceUnreadable,
            UnitOutcome::EmptyDocument => OutcomeKind::EmptyDocument,
        }
    }

    /// True when the record is known to be in the remote store
    pub fn is_confirmed(&self) -> bool {
        !self.kind().is_failure()
    }
}

impl From<ParseFailure> for UnitOutcome {
    fn from(failure: ParseFailure) -> Self {
        match failure {
            ParseFailure::OracleUnavailable { status } => UnitOutcome::OracleUnavailable { status },
            ParseFailure::MalformedOutput { sample } => UnitOutcome::MalformedOutput { sample },
        }
    }
}

impl From<ValidationFailure> for UnitOutcome {
    fn from(failure: ValidationFailure) -> Self {
        match failure {
            ValidationFailure::MissingName { found } => UnitOutcome::MissingName { found },
        }
    }
}

/// Everything that happened while processing one unit
#[derive(Debug, Clone, PartialEq)]
pub struct UnitReport {
    /// Unit identifier
    pub unit_id: String,

    /// Outcomes in the order they occurred
    pub outcomes: Vec<UnitOutcome>,

    /// True if the source file was moved to the processed area
    pub archived: bool,
}

impl UnitReport {
    /// Create an empty report
    pub fn new(unit_id: impl Into<String>) -> Self {
        Self {
            unit_id: unit_id.into(),
            outcomes: Vec::new(),
            archived: false,
        }
    }

    /// Append an outcome
    pub fn push(&mut self, outcome: impl Into<UnitOutcome>) {
        self.outcomes.push(outcome.into());
    }

    /// Number of outcomes of `kind`
    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes.iter().filter(|o| o.kind() == kind).count()
    }

    /// Number of records confirmed in the remote store
    pub fn confirmed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_confirmed()).count()
    }

    /// True if any record hit a remote store failure
    pub fn has_remote_error(&self) -> bool {
        self.count(OutcomeKind::RemoteError) > 0
    }
}
