//! Error types for header normalization and closure resolution.
//!
//! Two tiers exist. Setup failures (missing manifest, bad config file,
//! uncreatable output root) surface as `Err(HeaderError)` and end the run.
//! Failures while processing a single header are wrapped in a
//! [`HeaderFailure`] and recorded by the traversal engine instead of being
//! propagated, so sibling headers keep processing.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hdrclosure operations
#[derive(Debug, Error)]
pub enum HeaderError {
    /// File system related errors
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header content that is not valid UTF-8
    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },

    /// Header names must stay inside the source and output trees
    #[error("invalid header name '{name}': must be a relative path without '..'")]
    InvalidName { name: String },

    /// The entry manifest could not be found
    #[error("manifest header not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },
}

impl HeaderError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path,
        }
    }

    /// Short category name used in reports.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io { .. } => "I/O",
            Self::Decode { .. } => "Decode",
            Self::InvalidName { .. } => "Name",
            Self::ManifestNotFound { .. } => "Manifest",
            Self::Config { .. } => "Config",
        }
    }

    /// Whether this error means the requested header simply does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::ManifestNotFound { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, HeaderError>;

/// A per-header failure isolated at the node boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderFailure {
    /// Header name that failed.
    pub name: String,
    /// Error category (see [`HeaderError::category`]).
    pub category: &'static str,
    /// Rendered error detail.
    pub detail: String,
}

impl HeaderFailure {
    pub fn new(name: impl Into<String>, error: &HeaderError) -> Self {
        Self {
            name: name.into(),
            category: error.category(),
            detail: error.to_string(),
        }
    }
}
