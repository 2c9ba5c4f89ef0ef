//! Output formatting for the CLI.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use colored::*;
use greenorb_extractor::{BatchReport, OutcomeKind};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a batch report.
    pub fn format_report(&self, report: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_report_table(report)),
        }
    }

    fn format_report_table(&self, report: &BatchReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Outcome", "Count"]);
        for kind in OutcomeKind::ALL {
            let count = report.count(kind);
            if count > 0 {
                builder.push_record([kind.as_str().to_string(), count.to_string()]);
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let headline = format!(
            "{}: {} unit(s) in {}ms, {} archived",
            report.pipeline, report.units_processed, report.runtime_ms, report.units_archived
        );
        let totals = format!(
            "{} record(s) confirmed, {} failure(s)",
            report.total_confirmed(),
            report.total_failures()
        );
        let totals = if report.total_failures() > 0 {
            self.warning(&totals)
        } else {
            self.success(&totals)
        };

        format!("{}\n{}\n{}", self.info(&headline), table, totals)
    }

    /// Format the configuration.
    pub fn format_config(&self, config: &Config) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
            OutputFormat::Table => config.to_toml(),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
