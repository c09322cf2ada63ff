use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

use super::{ConfigOverrides, StripConfig, smart_load};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Prefix for environment variable overrides, e.g. `DARKSTRIP_MARKER`
pub const ENV_PREFIX: &str = "DARKSTRIP_";

/// Project config files picked up from the working directory, lowest priority first
pub const PROJECT_CONFIG_FILES: &[&str] = &[
    "darkstrip.toml",
    "darkstrip.json",
    "darkstrip.yaml",
    "darkstrip.yml",
];

impl StripConfig {
    /// Load and validate the effective configuration
    ///
    /// With `custom_config` only that file is read (and it must exist); otherwise any
    /// project config files in `search_dir` are merged.
    pub fn load(
        custom_config: Option<&Path>,
        search_dir: &Path,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let config: StripConfig = Self::figment(custom_config, search_dir, overrides)?
            .extract()
            .context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Build the layered figment without extracting it
    pub fn figment(
        custom_config: Option<&Path>,
        search_dir: &Path,
        overrides: &ConfigOverrides,
    ) -> Result<Figment> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            if !custom_path.is_file() {
                anyhow::bail!("Config file not found: {}", custom_path.display());
            }
            tracing::debug!("Using config file {}", custom_path.display());
            figment = figment.merge(smart_load::auto(custom_path));
        } else {
            for path in Self::project_config_files(search_dir) {
                tracing::debug!("Merging config file {}", path.display());
                figment = figment.merge(smart_load::auto(path));
            }
        }

        // Environment variables beat files, CLI flags beat everything
        figment = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .admerge(Serialized::defaults(overrides));

        Ok(figment)
    }

    fn project_config_files(search_dir: &Path) -> Vec<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(|name| search_dir.join(name))
            .filter(|path| path.is_file())
            .collect()
    }
}
