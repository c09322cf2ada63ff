//! Configuration management for darkstrip
//!
//! Settings are layered with figment: embedded defaults, an optional project
//! config file, `DARKSTRIP_*` environment variables and finally CLI flags.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::strip::{FileProcessor, TokenScanner};

pub mod core;
pub mod overrides;
pub mod smart_load;

pub use overrides::ConfigOverrides;

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Prefix that marks a utility class for removal
    pub marker: String,

    /// Gitignore-style file name, resolved against the processed directory
    pub ignore_file: String,

    /// Whether to read `ignore_file` at all
    pub use_ignore_file: bool,

    /// Directory names that are never descended into
    pub vcs_dirs: Vec<String>,

    /// Additional glob patterns to exclude, relative to the processed directory
    pub exclude: Vec<String>,

    /// Replace files through a temp file + rename
    pub atomic_writes: bool,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            marker: crate::strip::DEFAULT_MARKER.to_string(),
            ignore_file: ".gitignore".to_string(),
            use_ignore_file: true,
            vcs_dirs: crate::strip::DEFAULT_VCS_DIRS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            exclude: Vec::new(),
            atomic_writes: true,
        }
    }
}

impl StripConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            anyhow::bail!("marker cannot be empty");
        }
        if self.marker.chars().any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '`')) {
            anyhow::bail!(
                "marker {:?} cannot contain whitespace or quote characters",
                self.marker
            );
        }
        if self.use_ignore_file && self.ignore_file.trim().is_empty() {
            anyhow::bail!("ignore_file cannot be empty while use_ignore_file is enabled");
        }
        Ok(())
    }

    /// Ignore file name, or `None` when ignore files are disabled
    pub fn ignore_file_name(&self) -> Option<&str> {
        self.use_ignore_file.then_some(self.ignore_file.as_str())
    }

    pub fn scanner(&self) -> TokenScanner {
        TokenScanner::new(self.marker.clone())
    }

    pub fn processor(&self, dry_run: bool) -> FileProcessor {
        FileProcessor::new(self.scanner())
            .dry_run(dry_run)
            .atomic_writes(self.atomic_writes)
    }
}
