//! Relink configuration loader describing which files of the site tree are processed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::selection::TargetSelection;

/// Configuration file looked up in the site root when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "relink.config.json";

/// Discoverable configuration for a relink run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RelinkConfig {
    /// Mapping file, relative to the site root, used when no explicit path is supplied.
    pub mapping_file: String,
    /// File extensions (without the leading dot) whose documents are rewritten.
    pub extensions: Vec<String>,
    /// Root-relative directories to restrict processing to. Empty means the whole tree.
    pub include: Vec<String>,
    /// Root-relative directories or files that are never rewritten.
    pub exclude: Vec<String>,
}

impl Default for RelinkConfig {
    fn default() -> Self {
        Self {
            mapping_file: ".fingerprint_map.txt".into(),
            extensions: vec!["html".into(), "css".into(), "js".into(), "map".into()],
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl RelinkConfig {
    /// Attempt to load configuration from the site root.
    ///
    /// When the configuration file does not exist or fails to parse we fall back to default
    /// values so a bare `--dist`/`--mapping` invocation keeps working.
    pub fn discover(site_root: &Path) -> Self {
        let candidate = site_root.join(DEFAULT_CONFIG_FILE);
        match Self::load(&candidate) {
            Ok(config) => config,
            Err(ConfigError::Io { .. }) => Self::default(),
            Err(err) => {
                tracing::warn!("{err}; using default configuration");
                Self::default()
            }
        }
    }

    /// Read configuration from a specific JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Mapping file path resolved against the site root.
    pub fn mapping_path(&self, site_root: &Path) -> PathBuf {
        site_root.join(&self.mapping_file)
    }

    /// Target selection described by this configuration.
    pub fn selection(&self) -> TargetSelection {
        TargetSelection::new(
            self.extensions.iter().cloned(),
            self.include.iter().cloned(),
            self.exclude.iter().cloned(),
        )
    }
}
