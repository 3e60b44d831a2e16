//! Error types for the rulebook engine

use thiserror::Error;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to load a rulebook document
    #[error("Failed to load document: {0}")]
    LoadError(String),

    /// Parse error from the underlying document format
    #[error("Parse error: {0}")]
    Parser(#[from] rulebook_parser::ParserError),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No document loaded for the requested edition
    #[error("Unknown rulebook edition: {0}")]
    UnknownVersion(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
