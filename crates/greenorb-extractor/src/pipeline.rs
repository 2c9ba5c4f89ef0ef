//! The extraction pipeline driver

use crate::chunking::Segmenter;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::metrics::BatchReport;
use crate::normalizer::normalize;
use crate::parser::ResponseParser;
use crate::prompt::{PromptBuilder, PromptPayload};
use crate::stage::{SequentialRunner, Stage};
use crate::types::{CandidateRecord, ExtractionUnit, UnitOutcome, UnitReport};
use async_trait::async_trait;
use greenorb_domain::{
    ContextLookup, DocumentSource, Ledger, Oracle, OracleOptions, OracleStatus, PersistOutcome,
    Provenance, RankedCompany, RawOracleResponse, SourceDocument,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Drives units through prompt, oracle, parser, normalizer and ledger
///
/// Generic over the oracle `O`, the ledger `L` and the document source `S`.
/// Every failure is contained within the unit that caused it.
pub struct Pipeline<O, L, S>
where
    O: Oracle,
    L: Ledger,
    S: DocumentSource,
{
    oracle: Arc<O>,
    ledger: Arc<L>,
    source: Arc<S>,
    lookup: Option<Arc<dyn ContextLookup>>,
    parser: ResponseParser,
    segmenter: Segmenter,
    prompts: PromptBuilder,
    config: ExtractorConfig,
}

impl<O, L, S> Pipeline<O, L, S>
where
    O: Oracle,
    L: Ledger,
    S: DocumentSource + 'static,
{
    /// Create a new pipeline
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if the configuration is invalid.
    pub fn new(oracle: O, ledger: L, source: S, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        Ok(Self {
            oracle: Arc::new(oracle),
            ledger: Arc::new(ledger),
            source: Arc::new(source),
            lookup: None,
            parser: ResponseParser::default(),
            segmenter: Segmenter::new(config.max_chunk_chars),
            prompts: PromptBuilder::new(config.context_max_chars),
            config,
        })
    }

    /// Use an external context lookup for entity enrichment
    pub fn with_lookup(mut self, lookup: Arc<dyn ContextLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Replace the response parser
    pub fn with_parser(mut self, parser: ResponseParser) -> Self {
        self.parser = parser;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The ledger records are persisted through
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Extract every company mentioned in one document
    ///
    /// The document is archived when at least one record was confirmed, no
    /// record hit a remote error, and `archive_ingested` is set.
    pub async fn ingest_document(&self, path: &Path) -> UnitReport {
        let mut report = UnitReport::new(path.display().to_string());

        let document = match self.load_document(path, None, None).await {
            Ok(document) => document,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                report.push(UnitOutcome::SourceUnreadable { reason: e.to_string() });
                return report;
            }
        };

        if document.is_blank() {
            warn!("No text extracted from {}", path.display());
            report.push(UnitOutcome::EmptyDocument);
            return report;
        }

        let provenance = Provenance::BulkIngest {
            document: file_name(path),
        };
        let chunks = self.segmenter.segment(&document.text, document.id.as_str());
        let total = chunks.clone().count();
        let options = self.config.oracle_options(self.config.bulk_temperature);

        info!(
            "Ingesting {} ({} chars, {} chunk(s))",
            document.id,
            document.char_len(),
            total
        );

        for chunk in chunks {
            if chunk.index > 0 && !self.config.chunk_pause().is_zero() {
                tokio::time::sleep(self.config.chunk_pause()).await;
            }

            info!("Processing chunk {}/{} of {}", chunk.index + 1, total, chunk.source_id);
            let prompt = self.prompts.build(&PromptPayload::Chunk(&chunk.text));
            let raw = self.call_oracle(&prompt, &options).await;

            match self.parser.parse_array(&raw) {
                Ok(candidates) => {
                    debug!("Chunk {} yielded {} candidate(s)", chunk.index + 1, candidates.len());
                    for candidate in &candidates {
                        let outcome = self.persist_candidate(candidate, &provenance).await;
                        report.push(outcome);
                    }
                }
                Err(failure) => {
                    warn!("Chunk {}/{} of {}: {}", chunk.index + 1, total, chunk.source_id, failure);
                    report.push(failure);
                }
            }
        }

        if self.config.archive_ingested && report.confirmed_count() > 0 && !report.has_remote_error() {
            self.archive(path, &mut report);
        }

        report
    }

    /// Extract the publisher's record from one sustainability report
    ///
    /// The report is archived only after its record was confirmed.
    pub async fn process_report(&self, path: &Path) -> UnitReport {
        let mut report = UnitReport::new(path.display().to_string());

        let document = match self
            .load_document(
                path,
                Some(self.config.report_max_pages),
                Some(self.config.max_document_chars),
            )
            .await
        {
            Ok(document) => document,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                report.push(UnitOutcome::SourceUnreadable { reason: e.to_string() });
                return report;
            }
        };

        if document.is_blank() {
            warn!("No text extracted from {}", path.display());
            report.push(UnitOutcome::EmptyDocument);
            return report;
        }

        info!(
            "Analyzing report {} ({} chars{})",
            document.id,
            document.char_len(),
            if document.truncated { ", truncated" } else { "" }
        );

        let prompt = self.prompts.build(&PromptPayload::Report(&document.text));
        let options = self.config.oracle_options(self.config.report_temperature);
        let raw = self.call_oracle(&prompt, &options).await;

        let outcome = match self.parser.parse_object(&raw) {
            Ok(candidate) => {
                self.persist_candidate(&candidate, &Provenance::report(path))
                    .await
            }
            Err(failure) => {
                warn!("Report {}: {}", document.id, failure);
                failure.into()
            }
        };

        let confirmed = outcome.is_confirmed();
        report.push(outcome);
        if confirmed {
            self.archive(path, &mut report);
        }

        report
    }

    /// Enrich one ranked company
    pub async fn enrich_entity(&self, company: &RankedCompany) -> UnitReport {
        let mut report = UnitReport::new(format!("#{} {}", company.rank, company.name));

        let context = match &self.lookup {
            Some(lookup) => {
                let context = lookup.lookup(&company.name).await;
                if context.is_none() {
                    debug!("No external context for {}", company.name);
                }
                context
            }
            None => None,
        };

        let prompt = self.prompts.build(&PromptPayload::Entity {
            company,
            context: context.as_deref(),
        });
        let options = self.config.oracle_options(self.config.enrich_temperature);
        let raw = self.call_oracle(&prompt, &options).await;

        let outcome = match self.parser.parse_object(&raw) {
            Ok(candidate) => {
                let provenance = Provenance::Ranking {
                    entity: company.clone(),
                };
                self.persist_candidate(&candidate, &provenance).await
            }
            Err(failure) => {
                warn!("Entity #{} {}: {}", company.rank, company.name, failure);
                failure.into()
            }
        };

        report.push(outcome);
        report
    }

    /// Ingest every document in order
    pub async fn run_ingest(&self, paths: Vec<PathBuf>) -> BatchReport {
        let units = paths.into_iter().map(ExtractionUnit::Bulk).collect();
        SequentialRunner::new(self.config.document_pause())
            .run("ingest", self, units)
            .await
    }

    /// Process every report in order
    pub async fn run_reports(&self, paths: Vec<PathBuf>) -> BatchReport {
        let units = paths.into_iter().map(ExtractionUnit::Report).collect();
        SequentialRunner::new(self.config.document_pause())
            .run("reports", self, units)
            .await
    }

    /// Enrich every company in order
    pub async fn run_enrich(&self, companies: Vec<RankedCompany>) -> BatchReport {
        let units = companies.into_iter().map(ExtractionUnit::Entity).collect();
        SequentialRunner::new(self.config.entity_pause())
            .run("enrich", self, units)
            .await
    }

    async fn load_document(
        &self,
        path: &Path,
        max_pages: Option<usize>,
        max_chars: Option<usize>,
    ) -> Result<SourceDocument, ExtractorError> {
        let source = Arc::clone(&self.source);
        let owned = path.to_path_buf();

        let text = tokio::task::spawn_blocking(move || {
            source
                .extract_text(&owned, max_pages)
                .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ExtractorError::Task(e.to_string()))?
        .map_err(ExtractorError::Source)?;

        Ok(SourceDocument::new(path.display().to_string(), text, max_chars))
    }

    async fn call_oracle(&self, prompt: &str, options: &OracleOptions) -> RawOracleResponse {
        debug!("Prompt length: {} chars", prompt.len());

        match timeout(options.timeout, self.oracle.invoke(prompt, options)).await {
            Ok(raw) => {
                debug!("Oracle {} answered: {}", self.oracle.model_name(), raw.status);
                raw
            }
            Err(_) => {
                warn!("Oracle {} timed out after {:?}", self.oracle.model_name(), options.timeout);
                RawOracleResponse::failed(OracleStatus::Timeout)
            }
        }
    }

    async fn persist_candidate(&self, candidate: &CandidateRecord, provenance: &Provenance) -> UnitOutcome {
        let record = match normalize(candidate, provenance) {
            Ok(record) => record,
            Err(failure) => {
                warn!("Skipping candidate: {}", failure);
                return failure.into();
            }
        };

        let outcome = self.ledger.persist(&record).await;
        match &outcome {
            PersistOutcome::Saved => info!("Saved {}", record.name),
            PersistOutcome::DuplicateSkipped => {
                debug!("{} already saved this run", record.name)
            }
            PersistOutcome::RemoteError(reason) => {
                warn!("Store rejected {}: {}", record.name, reason)
            }
        }
        UnitOutcome::persisted(&record.name, outcome)
    }

    fn archive(&self, path: &Path, report: &mut UnitReport) {
        match self.ledger.archive(path) {
            Ok(destination) => {
                info!("Archived {} to {}", path.display(), destination.display());
                report.archived = true;
            }
            Err(e) => warn!("Could not archive {}: {}", path.display(), e),
        }
    }
}

#[async_trait]
impl<O, L, S> Stage<ExtractionUnit, UnitReport> for Pipeline<O, L, S>
where
    O: Oracle,
    L: Ledger,
    S: DocumentSource + 'static,
{
    async fn process(&self, unit: ExtractionUnit) -> UnitReport {
        match unit {
            ExtractionUnit::Bulk(path) => self.ingest_document(&path).await,
            ExtractionUnit::Report(path) => self.process_report(&path).await,
            ExtractionUnit::Entity(company) => self.enrich_entity(&company).await,
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
