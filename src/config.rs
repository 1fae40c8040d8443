use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub markdown: MarkdownConfig,
    pub limits: LimitsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Dashes per column in a table separator row.
    pub table_separator_width: usize,
    pub clamp_heading_levels: bool,
    pub escape_table_pipes: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            table_separator_width: 12,
            clamp_heading_levels: false,
            escape_table_pipes: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_depth: usize,
    /// Largest unclamped heading level; anything above is an error.
    pub max_heading_level: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_heading_level: 256,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub trailing_newline: bool,
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn compiled_default() -> Self {
        // build.rs rejects a malformed default_config.toml
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    ///
    /// A file that exists but fails to parse is logged and ignored.
    pub fn load(path: &Path) -> Self {
        match Self::load_strict(path) {
            Ok(config) => config,
            Err(Error::ConfigRead { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Self::compiled_default()
            }
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::compiled_default()
            }
        }
    }

    /// Load config from a TOML file, failing if it is missing or invalid.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
