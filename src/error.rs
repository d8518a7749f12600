//! Error types surfaced by the relink pass.

use std::path::PathBuf;

/// Fatal conditions that abort a relink run before any document is touched.
#[derive(Debug, thiserror::Error)]
pub enum RelinkError {
    /// The site root handed to the run does not exist.
    #[error("site root not found: {}", path.display())]
    RootNotFound {
        /// Path that was expected to be a directory.
        path: PathBuf,
    },
    /// The fingerprint mapping file does not exist.
    #[error("mapping file not found: {}", path.display())]
    MappingNotFound {
        /// Path that was expected to hold the mapping.
        path: PathBuf,
    },
    /// The fingerprint mapping file exists but could not be read.
    #[error("failed to read mapping file {}: {source}", path.display())]
    MappingRead {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },
}

/// Errors that can occur while loading an explicit configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },
    /// Failed to parse the JSON configuration file.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Path that caused the error.
        path: PathBuf,
        /// Source parse error.
        source: serde_json::Error,
    },
}
