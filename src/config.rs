//! User configuration for the `merkle` CLI
//!
//! Stored as JSON in `<config_dir>/merkle_primer/config.json` unless
//! `MERKLE_PRIMER_CONFIG` points elsewhere. A missing file means defaults.

use crate::hasher::HasherKind;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "MERKLE_PRIMER_CONFIG";

/// How CLI results are printed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One compact JSON object per invocation
    #[default]
    Json,
    /// Human-readable output
    Text,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digest function used when `--hasher` is not given
    pub hasher: HasherKind,
    /// Output format used when `--format` is not given
    pub format: OutputFormat,
}

impl Config {
    /// Default config path (`$MERKLE_PRIMER_CONFIG`, else the platform config dir)
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not find config directory".into()))?;
        Ok(dir.join("merkle_primer").join("config.json"))
    }

    /// Load from `path`, falling back to defaults if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
        let config = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from the default path
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path()?)
    }

    /// Write to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;
        Ok(())
    }
}
