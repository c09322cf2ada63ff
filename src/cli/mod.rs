//! Command-line interface for darkstrip
//!
//! Running `darkstrip` without a subcommand strips the directory given with
//! `--dir`. `darkstrip config show` prints the effective configuration.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

pub mod commands;
mod output;

pub use output::Output;

/// Strip `dark:` utility classes from every text file in a directory tree
#[derive(Parser, Debug)]
#[command(
    name = "darkstrip",
    version,
    about = "Remove dark: utility classes from a source tree",
    long_about = "Walks a directory, honouring its .gitignore, and deletes every dark:-prefixed \
                  utility class from the files it finds. Use --dry-run to preview the changes."
)]
pub struct Cli {
    #[command(flatten)]
    pub strip: commands::strip::StripArgs,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configuration management
    Config(commands::config::ConfigArgs),
}

/// Output format shared by commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Some(Commands::Config(args)) => {
                commands::config::execute(args, self.config.as_deref(), &output)
            }
            None => commands::strip::execute(self.strip, self.config.as_deref(), &output),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG wins; otherwise map -v counts, keeping the ignore/globset crates quiet
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // try_init: a subscriber may already be installed when running in-process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
