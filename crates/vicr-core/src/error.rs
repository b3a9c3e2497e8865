//! Error types for the vicr-core library.
//!
//! Field extraction itself never fails; these errors cover everything around
//! it: reading source text, loading configuration.

use thiserror::Error;

/// Main error type for the vicr library.
#[derive(Error, Debug)]
pub enum VicrError {
    /// Source document could not be turned into text.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to a single source document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The file extension is not an accepted OCR text format.
    #[error("Invalid file type: {0}")]
    UnsupportedFormat(String),

    /// The OCR text is empty or whitespace only.
    #[error("no text extracted from document")]
    EmptyText,

    /// The document could not be read.
    #[error("failed to read document: {0}")]
    Read(String),
}

/// Result type for the vicr library.
pub type Result<T> = std::result::Result<T, VicrError>;
