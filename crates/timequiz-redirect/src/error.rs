//! Path map error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a [`PathMap`](crate::PathMap).
#[derive(Debug, Error)]
pub enum RedirectError {
    /// The path map file could not be read.
    #[error("failed to read path map {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML path map: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON path map: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML path map: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension is not one of `yaml`, `yml`, `json` or `toml`.
    #[error("unsupported path map format: {} (expected .yaml, .yml, .json or .toml)", path.display())]
    UnsupportedFormat { path: PathBuf },
}
