//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use greenorb_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Local LLM service
    #[serde(default)]
    pub oracle: OracleSettings,

    /// Remote store API
    #[serde(default)]
    pub store: StoreSettings,

    /// External context lookup
    #[serde(default)]
    pub lookup: LookupSettings,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathSettings,

    /// Pipeline tuning
    #[serde(default)]
    pub pipeline: ExtractorConfig,

    /// Output settings
    #[serde(default)]
    pub settings: Settings,
}

/// Oracle service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleSettings {
    /// Base URL of the Ollama service
    #[serde(default = "default_oracle_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
}

/// Remote store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Full URL records are POSTed to
    #[serde(default = "default_store_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

/// Context lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupSettings {
    /// MediaWiki API endpoint
    #[serde(default = "default_lookup_endpoint")]
    pub endpoint: String,

    /// User-Agent sent with every lookup
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_lookup_timeout")]
    pub timeout_secs: u64,
}

/// Filesystem layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Documents for bulk ingest
    #[serde(default = "default_raw_data_dir")]
    pub raw_data_dir: PathBuf,

    /// Sustainability reports
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Audit copies of every persisted record
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Name of the processed area inside each source directory
    #[serde(default = "default_processed_subdir")]
    pub processed_subdir: String,

    /// Company ranking used for enrichment
    #[serde(default = "default_ranking_document")]
    pub ranking_document: PathBuf,

    /// File extensions picked up from source directories
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".greenorb").join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate().map_err(CliError::Config)?;

        for (name, value) in [
            ("oracle.endpoint", &self.oracle.endpoint),
            ("oracle.model", &self.oracle.model),
            ("store.endpoint", &self.store.endpoint),
            ("lookup.endpoint", &self.lookup.endpoint),
        ] {
            if value.trim().is_empty() {
                return Err(CliError::Config(format!("{} must not be empty", name)));
            }
        }
        if self.store.timeout_secs == 0 || self.lookup.timeout_secs == 0 {
            return Err(CliError::Config("timeouts must be greater than 0".into()));
        }
        self.paths.validate()
    }
}

impl StoreSettings {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl LookupSettings {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PathSettings {
    /// Validate the layout.
    ///
    /// `processed_subdir` must be a single plain directory name.
    pub fn validate(&self) -> Result<()> {
        let subdir = self.processed_subdir.trim();
        if subdir.is_empty()
            || subdir == "."
            || subdir == ".."
            || subdir.contains(['/', '\\'])
        {
            return Err(CliError::Config(format!(
                "paths.processed_subdir must be a plain directory name, got '{}'",
                self.processed_subdir
            )));
        }
        if self.extensions.is_empty() {
            return Err(CliError::Config("paths.extensions must not be empty".into()));
        }
        Ok(())
    }

    /// Processed area for documents read from `source_dir`
    pub fn processed_dir(&self, source_dir: &Path) -> PathBuf {
        source_dir.join(&self.processed_subdir)
    }
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            endpoint: default_oracle_endpoint(),
            model: default_model(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            endpoint: default_store_endpoint(),
            timeout_secs: default_store_timeout(),
        }
    }
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            endpoint: default_lookup_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_lookup_timeout(),
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            raw_data_dir: default_raw_data_dir(),
            reports_dir: default_reports_dir(),
            results_dir: default_results_dir(),
            processed_subdir: default_processed_subdir(),
            ranking_document: default_ranking_document(),
            extensions: default_extensions(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_oracle_endpoint() -> String {
    greenorb_llm::ollama::DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    greenorb_llm::ollama::DEFAULT_MODEL.to_string()
}

fn default_store_endpoint() -> String {
    greenorb_store::DEFAULT_ENDPOINT.to_string()
}

fn default_store_timeout() -> u64 {
    greenorb_store::DEFAULT_TIMEOUT_SECS
}

fn default_lookup_endpoint() -> String {
    greenorb_sources::wikipedia::DEFAULT_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    greenorb_sources::wikipedia::DEFAULT_USER_AGENT.to_string()
}

fn default_lookup_timeout() -> u64 {
    10
}

fn default_raw_data_dir() -> PathBuf {
    PathBuf::from("RawData")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("RawData").join("ESG_Reports")
}

fn default_results_dir() -> PathBuf {
    default_reports_dir().join("JSON_Results")
}

fn default_processed_subdir() -> String {
    "Processed".to_string()
}

fn default_ranking_document() -> PathBuf {
    PathBuf::from("RawData").join("Forbes Top 2000 - 2025.pdf")
}

fn default_extensions() -> Vec<String> {
    vec!["pdf".to_string(), "txt".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
