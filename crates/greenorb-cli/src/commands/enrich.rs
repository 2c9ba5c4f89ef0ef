//! Enrich command implementation.

use super::build_pipeline;
use crate::cli::EnrichArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use greenorb_extractor::BatchReport;
use greenorb_sources::{load_ranking, select_ranked, AnyDocumentSource, WikipediaLookup};
use std::sync::Arc;

/// Execute the enrich command.
pub async fn execute_enrich(args: EnrichArgs, config: &Config, formatter: &Formatter) -> Result<BatchReport> {
    let ranking = args
        .ranking
        .unwrap_or_else(|| config.paths.ranking_document.clone());
    if !ranking.is_file() {
        return Err(CliError::InvalidInput(format!(
            "Ranking document not found: {}",
            ranking.display()
        )));
    }

    let companies = tokio::task::spawn_blocking(move || load_ranking(&AnyDocumentSource::new(), &ranking))
        .await
        .map_err(|e| CliError::Task(e.to_string()))??;
    let selected = select_ranked(companies, args.start, args.limit);
    if selected.is_empty() {
        println!(
            "{}",
            formatter.warning(&format!("No companies ranked {} or lower", args.start))
        );
        return Ok(BatchReport::new("enrich"));
    }

    println!(
        "{}",
        formatter.info(&format!("Enriching {} company(ies) from rank {}", selected.len(), args.start))
    );

    let mut pipeline = build_pipeline(config, &config.paths.raw_data_dir)?;
    if !args.skip_lookup {
        let lookup = WikipediaLookup::new(
            config.lookup.endpoint.clone(),
            &config.lookup.user_agent,
            config.lookup.timeout(),
            config.pipeline.context_max_chars,
        )?;
        pipeline = pipeline.with_lookup(Arc::new(lookup));
    }

    let report = pipeline.run_enrich(selected).await;

    println!("{}", formatter.format_report(&report)?);
    Ok(report)
}
