//! Infrastructure error types

use std::io;
use std::path::PathBuf;

/// Error type for loading engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension does not name a known format.
    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for infrastructure operations.
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
