//! Batch counters for pipeline runs

use crate::types::{OutcomeKind, UnitReport};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters collected over one pipeline run
///
/// Tracks outcomes by kind, units processed and archived, and runtime.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Pipeline name (`ingest`, `reports`, `enrich`)
    pub pipeline: String,

    /// Outcome counts by kind
    pub outcomes: BTreeMap<OutcomeKind, usize>,

    /// Units handled, whatever their outcome
    pub units_processed: usize,

    /// Source files moved to the processed area
    pub units_archived: usize,

    /// Total runtime in milliseconds
    pub runtime_ms: u64,
}

impl BatchReport {
    /// Create an empty report for `pipeline`
    pub fn new(pipeline: impl Into<String>) -> Self {
        Self {
            pipeline: pipeline.into(),
            ..Self::default()
        }
    }

    /// Fold one unit's outcomes into the counters
    pub fn record_unit(&mut self, unit: &UnitReport) {
        self.units_processed += 1;
        if unit.archived {
            self.units_archived += 1;
        }
        for outcome in &unit.outcomes {
            self.record(outcome.kind());
        }
    }

    /// Count a single outcome
    pub fn record(&mut self, kind: OutcomeKind) {
        *self.outcomes.entry(kind).or_insert(0) += 1;
    }

    /// Count of outcomes of `kind`
    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes.get(&kind).copied().unwrap_or(0)
    }

    /// Records saved or already present
    pub fn total_confirmed(&self) -> usize {
        self.count(OutcomeKind::Saved) + self.count(OutcomeKind::DuplicateSkipped)
    }

    /// Outcomes that were failures of any kind
    pub fn total_failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(kind, _)| kind.is_failure())
            .map(|(_, count)| count)
            .sum()
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Pipeline '{}' summary", self.pipeline),
            "=".repeat(self.pipeline.len() + 19),
            format!("Units processed: {}", self.units_processed),
            format!("Units archived: {}", self.units_archived),
            format!("Runtime: {}ms", self.runtime_ms),
        ];

        if !self.outcomes.is_empty() {
            lines.push(String::new());
            lines.push("Outcomes:".to_string());
            for (kind, count) in &self.outcomes {
                lines.push(format!("  {}: {}", kind, count));
            }
        }

        lines.join("\n")
    }
}
