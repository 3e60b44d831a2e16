//! Error types for the parser.
//!
//! The only failure the parser propagates is the inability to obtain the
//! source text; malformed content degrades to continuation text and never
//! produces an error.

use thiserror::Error;

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Invalid edition version format.
    #[error("Invalid version format: '{0}'. Expected dotted digits (e.g., 2.1)")]
    InvalidVersion(String),

    /// Failed to read a rulebook source file.
    #[error("Failed to read rulebook source {path}: {source}")]
    SourceRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;
