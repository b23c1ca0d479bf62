use std::path::PathBuf;

use thiserror::Error;

/// Failures at the edges of the growth model.
///
/// Geometry and growth operations are total; only file access and
/// parsing of persisted records or configuration can fail.
#[derive(Debug, Error)]
pub enum GrowError {
    #[error("I/O error for file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse plant record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML from '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid growth configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GrowError>;
