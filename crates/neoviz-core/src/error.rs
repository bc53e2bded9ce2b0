//! Centralized error types for neoviz.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for export operations.
#[derive(Error, Debug)]
pub enum NeovizError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid output path: {0}")]
    Path(String),
}

/// Result type for export operations.
pub type NeovizResult<T> = Result<T, NeovizError>;

impl NeovizError {
    /// Create a write error for the given path.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
