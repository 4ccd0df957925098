//! Error types for the notification receiver service.

use std::path::PathBuf;

/// Errors raised while loading the service configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or lacks a required field.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The notification path cannot be routed.
    #[error("notify path must start with '/', got {0:?}")]
    InvalidPath(String),
}
