//! Configuration command implementations

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::Path;

use crate::cli::{Output, OutputFormat};
use crate::config::{ConfigOverrides, StripConfig};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration after all layers are merged
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Execute config commands
pub fn execute(args: ConfigArgs, config_path: Option<&Path>, output: &Output) -> Result<()> {
    match args.command {
        ConfigCommand::Show { format } => show(format, config_path, output),
    }
}

fn show(format: OutputFormat, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let config = StripConfig::load(config_path, Path::new("."), &ConfigOverrides::default())?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Text => {
            output.header("Effective configuration");
            output.key_value("marker", &config.marker, true);
            output.key_value("ignore_file", &config.ignore_file, false);
            output.key_value("use_ignore_file", &config.use_ignore_file.to_string(), false);
            output.key_value("vcs_dirs", &list(&config.vcs_dirs), false);
            output.key_value("exclude", &list(&config.exclude), false);
            output.key_value("atomic_writes", &config.atomic_writes.to_string(), false);
        }
    }

    Ok(())
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}
