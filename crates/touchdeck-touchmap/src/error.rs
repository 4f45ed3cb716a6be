//! Touchmap loading errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TouchmapError {
    #[error("failed to read touchmap {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed touchmap: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("touchmap has no \"mappings\" section")]
    MissingMappings,
}
