//! Output error types.

use std::path::PathBuf;

/// Errors that can occur when writing route documents.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The output directory could not be created
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be serialized
    #[error("failed to serialize route document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The document could not be written or moved into place
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
