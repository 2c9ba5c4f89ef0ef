//! Configuration for the extraction pipelines

use greenorb_domain::OracleOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the extraction pipelines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Character budget for a whole report document
    pub max_document_chars: usize,

    /// Pages read from the start of each report
    pub report_max_pages: usize,

    /// Maximum chunk size for bulk ingest (characters)
    pub max_chunk_chars: usize,

    /// Maximum external context included in an enrichment prompt (characters)
    pub context_max_chars: usize,

    /// Upper bound on a single oracle call (seconds)
    pub oracle_timeout_secs: u64,

    /// Context window requested from the oracle (`num_ctx`)
    pub context_window: u32,

    /// Sampling temperature for bulk ingest
    pub bulk_temperature: f32,

    /// Sampling temperature for report analysis
    pub report_temperature: f32,

    /// Sampling temperature for entity enrichment
    pub enrich_temperature: f32,

    /// Pause between chunks of one document (milliseconds)
    pub chunk_pause_ms: u64,

    /// Pause between documents (milliseconds)
    pub document_pause_ms: u64,

    /// Pause between enriched entities (milliseconds)
    pub entity_pause_ms: u64,

    /// Move bulk-ingested documents to the processed area once handled
    pub archive_ingested: bool,
}

impl ExtractorConfig {
    /// Get the oracle timeout as a Duration
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Pause between chunks as a Duration
    pub fn chunk_pause(&self) -> Duration {
        Duration::from_millis(self.chunk_pause_ms)
    }

    /// Pause between documents as a Duration
    pub fn document_pause(&self) -> Duration {
        Duration::from_millis(self.document_pause_ms)
    }

    /// Pause between entities as a Duration
    pub fn entity_pause(&self) -> Duration {
        Duration::from_millis(self.entity_pause_ms)
    }

    /// Oracle options for a call made at `temperature`
    pub fn oracle_options(&self, temperature: f32) -> OracleOptions {
        OracleOptions {
            temperature,
            context_window: self.context_window,
            timeout: self.oracle_timeout(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_document_chars == 0 {
            return Err("max_document_chars must be greater than 0".to_string());
        }
        if self.report_max_pages == 0 {
            return Err("report_max_pages must be greater than 0".to_string());
        }
        if self.max_chunk_chars == 0 {
            return Err("max_chunk_chars must be greater than 0".to_string());
        }
        if self.context_max_chars == 0 {
            return Err("context_max_chars must be greater than 0".to_string());
        }
        if self.oracle_timeout_secs == 0 {
            return Err("oracle_timeout_secs must be greater than 0".to_string());
        }
        if self.context_window == 0 {
            return Err("context_window must be greater than 0".to_string());
        }
        for (name, t) in [
            ("bulk_temperature", self.bulk_temperature),
            ("report_temperature", self.report_temperature),
            ("enrich_temperature", self.enrich_temperature),
        ] {
            if !(0.0..=2.0).contains(&t) {
                return Err(format!("{} must be between 0.0 and 2.0", name));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_document_chars: 20_000,
            report_max_pages: 30,
            max_chunk_chars: 3_000,
            context_max_chars: 4_000,
            oracle_timeout_secs: 120,
            context_window: 8192,
            bulk_temperature: 0.1,
            report_temperature: 0.0,
            enrich_temperature: 0.1,
            chunk_pause_ms: 1_000,
            document_pause_ms: 1_000,
            entity_pause_ms: 500,
            archive_ingested: true,
        }
    }
}

impl ExtractorConfig {
    /// No pauses between calls, for tests and fast local oracles
    pub fn unthrottled() -> Self {
        Self {
            chunk_pause_ms: 0,
            document_pause_ms: 0,
            entity_pause_ms: 0,
            ..Self::default()
        }
    }
}
