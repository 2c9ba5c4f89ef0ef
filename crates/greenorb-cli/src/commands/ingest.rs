//! Ingest command implementation.

use super::{build_pipeline, pending_documents};
use crate::cli::IngestArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use greenorb_extractor::BatchReport;

/// Execute the ingest command.
pub async fn execute_ingest(args: IngestArgs, config: &Config, formatter: &Formatter) -> Result<BatchReport> {
    let dir = args.dir.unwrap_or_else(|| config.paths.raw_data_dir.clone());
    let ranking = config.paths.ranking_document.file_name();

    // The ranking document sits next to the raw documents but is not one
    let documents: Vec<_> = pending_documents(config, &dir)?
        .into_iter()
        .filter(|path| path.file_name() != ranking)
        .collect();

    if documents.is_empty() {
        println!("{}", formatter.warning(&format!("No documents to ingest in {}", dir.display())));
        return Ok(BatchReport::new("ingest"));
    }

    println!(
        "{}",
        formatter.info(&format!("Ingesting {} document(s) from {}", documents.len(), dir.display()))
    );
    let pipeline = build_pipeline(config, &dir)?;
    let report = pipeline.run_ingest(documents).await;

    println!("{}", formatter.format_report(&report)?);
    Ok(report)
}
