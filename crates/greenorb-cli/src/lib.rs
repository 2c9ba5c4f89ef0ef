//! GreenOrb CLI library.
//!
//! Wires the extraction pipelines to the Ollama oracle, the remote store
//! and the document sources, and provides configuration management and
//! output formatting for the `greenorb` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
