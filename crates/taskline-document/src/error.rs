//! Error types for document loading
//!
//! Missing inputs and malformed headers are not errors; only I/O failures
//! surface here.

use std::path::PathBuf;

/// Errors while reading task documents from disk
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// IO error while listing the source directory
    #[error("io error listing {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error while reading a document or its metadata
    #[error("io error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create directory listing error for path
    pub fn list_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ListDir {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;
