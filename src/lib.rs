//! paper-rag: retrieval-augmented search over downloaded research papers
//!
//! The pipeline has three stages, each exposed as a script-style binary:
//! fetching papers from arXiv into a local directory, chunking and indexing
//! their text into a Pinecone index via OpenAI embeddings, and answering
//! questions from the indexed chunks with an OpenAI chat completion.

pub mod config;
pub mod error;
pub mod fetch;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{Chunk, ChunkMetadata, QueryResponse, SourceDocument};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default embedding model name
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Default embedding dimension for text-embedding-ada-002
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;

/// Default chat model for answer generation
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Default Pinecone index name
pub const DEFAULT_INDEX_NAME: &str = "research-papers-index";
