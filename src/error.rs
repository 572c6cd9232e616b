//! Error types for the paper-rag pipeline

use thiserror::Error;

/// Crate-wide error type with one variant per pipeline concern
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (missing API key, bad value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Paper search or download failure
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Document parsing failure (PDF extraction, XML)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Embedding service failure
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector index failure
    #[error("Vector store error: {0}")]
    VectorDb(String),

    /// LLM completion failure
    #[error("LLM error: {0}")]
    Llm(String),

    /// The named vector index does not exist; it must be created before use
    #[error("Index '{0}' does not exist. Please create it first.")]
    IndexNotFound(String),

    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
