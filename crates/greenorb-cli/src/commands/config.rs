//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", formatter.info(&format!("Configuration: {}", path.display())));
            println!("{}", formatter.format_config(config)?);
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                println!(
                    "{}",
                    formatter.warning(&format!("{} already exists (use --force to overwrite)", path.display()))
                );
                return Ok(());
            }
            Config::default().save(path)?;
            println!("{}", formatter.success(&format!("Wrote {}", path.display())));
        }
    }
    Ok(())
}
