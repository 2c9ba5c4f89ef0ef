//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GreenOrb - Extract company sustainability records from documents.
#[derive(Debug, Parser)]
#[command(name = "greenorb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GREENORB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract every company mentioned in the raw documents
    Ingest(IngestArgs),

    /// Extract the publisher's record from each sustainability report
    Reports(ReportsArgs),

    /// Enrich companies from a ranking document
    Enrich(EnrichArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Directory to scan instead of `paths.raw_data_dir`
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Arguments for the reports command.
#[derive(Debug, Parser)]
pub struct ReportsArgs {
    /// Directory to scan instead of `paths.reports_dir`
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Arguments for the enrich command.
#[derive(Debug, Parser)]
pub struct EnrichArgs {
    /// Ranking document instead of `paths.ranking_document`
    #[arg(short, long)]
    pub ranking: Option<PathBuf>,

    /// First rank to process
    #[arg(short, long, default_value = "1")]
    pub start: u32,

    /// Maximum number of companies (0 for all)
    #[arg(short, long, default_value = "0")]
    pub limit: usize,

    /// Do not fetch external context
    #[arg(long)]
    pub skip_lookup: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_command() {
        let cli = Cli::parse_from(["greenorb", "ingest", "--dir", "/tmp/docs"]);
        match cli.command {
            Command::Ingest(args) => assert_eq!(args.dir, Some(PathBuf::from("/tmp/docs"))),
            _ => panic!("Expected Ingest command"),
        }
    }

    #[test]
    fn test_enrich_defaults() {
        let cli = Cli::parse_from(["greenorb", "enrich"]);
        match cli.command {
            Command::Enrich(args) => {
                assert_eq!(args.start, 1);
                assert_eq!(args.limit, 0);
                assert!(!args.skip_lookup);
                assert!(args.ranking.is_none());
            }
            _ => panic!("Expected Enrich command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "greenorb",
            "enrich",
            "--start",
            "25",
            "--limit",
            "10",
            "--skip-lookup",
            "--format",
            "json",
            "--no-color",
        ]);
        assert!(cli.no_color);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Enrich(args) => {
                assert_eq!(args.start, 25);
                assert_eq!(args.limit, 10);
                assert!(args.skip_lookup);
            }
            _ => panic!("Expected Enrich command"),
        }
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["greenorb", "--config", "/tmp/g.toml", "config", "init", "--force"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/g.toml")));
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force: true }
            })
        ));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["greenorb"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Json.into();
        assert_eq!(format, crate::config::OutputFormat::Json);
    }
}
