//! Command implementations.

pub mod config;
pub mod enrich;
pub mod ingest;
pub mod reports;

pub use self::config::execute_config;
pub use self::enrich::execute_enrich;
pub use self::ingest::execute_ingest;
pub use self::reports::execute_reports;

use crate::config::Config;
use crate::error::Result;
use greenorb_extractor::Pipeline;
use greenorb_llm::OllamaProvider;
use greenorb_sources::AnyDocumentSource;
use greenorb_store::{AuditLog, ProcessedArchive, RemoteStore, StoreLedger};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The pipeline as wired by the CLI.
pub type CliPipeline = Pipeline<OllamaProvider, StoreLedger, AnyDocumentSource>;

/// Build a pipeline whose processed area lives under `source_dir`.
pub(crate) fn build_pipeline(config: &Config, source_dir: &Path) -> Result<CliPipeline> {
    let oracle = OllamaProvider::new(&config.oracle.endpoint, &config.oracle.model)?;
    let remote = RemoteStore::new(&config.store.endpoint, config.store.timeout())?;
    let ledger = StoreLedger::new(
        AuditLog::new(&config.paths.results_dir),
        remote,
        ProcessedArchive::new(config.paths.processed_dir(source_dir)),
    );

    info!(
        "Using model {} at {}, store at {}",
        config.oracle.model, config.oracle.endpoint, config.store.endpoint
    );
    Ok(Pipeline::new(oracle, ledger, AnyDocumentSource::new(), config.pipeline.clone())?)
}

/// Documents in `source_dir` not yet in its processed area.
///
/// Creates `source_dir` when missing and skips files no source can read.
pub(crate) fn pending_documents(config: &Config, source_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(source_dir)?;
    let archive = ProcessedArchive::new(config.paths.processed_dir(source_dir));
    let backlog = archive.backlog(source_dir, &config.paths.extensions)?;

    Ok(backlog
        .into_iter()
        .filter(|path| {
            let supported = AnyDocumentSource::supports(path);
            if !supported {
                warn!("Skipping {}: unsupported document type", path.display());
            }
            supported
        })
        .collect())
}
