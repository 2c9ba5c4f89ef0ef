//! Reports command implementation.

use super::{build_pipeline, pending_documents};
use crate::cli::ReportsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use greenorb_extractor::BatchReport;

/// Execute the reports command.
pub async fn execute_reports(args: ReportsArgs, config: &Config, formatter: &Formatter) -> Result<BatchReport> {
    let dir = args.dir.unwrap_or_else(|| config.paths.reports_dir.clone());
    let reports = pending_documents(config, &dir)?;

    if reports.is_empty() {
        println!("{}", formatter.warning(&format!("No new reports in {}", dir.display())));
        return Ok(BatchReport::new("reports"));
    }

    println!(
        "{}",
        formatter.info(&format!("Analyzing {} report(s) from {}", reports.len(), dir.display()))
    );
    let pipeline = build_pipeline(config, &dir)?;
    let report = pipeline.run_reports(reports).await;

    println!("{}", formatter.format_report(&report)?);
    Ok(report)
}
