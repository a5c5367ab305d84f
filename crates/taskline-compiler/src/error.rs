//! Error types for the compiler
//!
//! Provides error handling for:
//! - Configuration loading
//! - Compilation runs (document loading, template/timeline reads, output write)
//! - File watching

use std::path::PathBuf;
use taskline_document::DocumentError;

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is present but unusable
    #[error("invalid config value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    /// Create invalid value error
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Errors during a compilation run
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Source documents could not be loaded
    #[error("document loading failed: {0}")]
    Documents(#[from] DocumentError),

    /// IO error reading an input file
    #[error("io error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error writing the output
    #[error("io error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    /// Create read error for path
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create write error for path
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Errors while setting up file watching
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The platform watcher could not be created
    #[error("failed to create file watcher: {0}")]
    Create(#[source] notify::Error),

    /// A path could not be subscribed
    #[error("failed to watch {}: {source}", path.display())]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// Watch targets could not be resolved
    #[error("failed to resolve watch path {}: {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for compilation
pub type CompileResult<T> = Result<T, CompileError>;
