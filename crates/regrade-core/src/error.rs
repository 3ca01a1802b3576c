//! Document-loading error types.
//!
//! The evaluation and reconciliation functions themselves are total and
//! never fail; errors only arise at the boundary where attempt and
//! question documents are read from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading stored quiz documents.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or does not match the document shape.
    #[error("malformed document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A directory was expected.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A question bank must be a map of id to question or an array of
    /// questions.
    #[error("question bank {0} is neither a map nor an array of questions")]
    UnexpectedShape(PathBuf),
}

impl StoreError {
    /// Returns `true` when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
