//! Configuration for the paper-rag pipeline
//!
//! One `RagConfig` is built at process start and handed to each component, so
//! tests can wire components with their own values instead of touching process
//! globals.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Paper fetch configuration
    pub fetch: FetchConfig,
    /// Text chunking configuration
    pub chunking: ChunkingConfig,
    /// OpenAI configuration (embeddings + chat)
    pub openai: OpenAiConfig,
    /// Pinecone configuration
    pub pinecone: PineconeConfig,
    /// Indexing configuration
    pub indexing: IndexingConfig,
    /// Query configuration
    pub query: QueryConfig,
    /// Directory holding downloaded PDFs
    pub papers_dir: PathBuf,
}

impl RagConfig {
    /// Build a configuration from the process environment.
    ///
    /// Loads `.env` first, then requires `OPENAI_API_KEY` and
    /// `PINECONE_API_KEY`. `PINECONE_INDEX_NAME` overrides the default index
    /// name when set.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let openai_key = require_env("OPENAI_API_KEY")?;
        let pinecone_key = require_env("PINECONE_API_KEY")?;

        let mut config = Self::default();
        config.openai.api_key = openai_key;
        config.pinecone.api_key = pinecone_key;
        if let Ok(name) = std::env::var("PINECONE_INDEX_NAME") {
            if !name.trim().is_empty() {
                config.pinecone.index_name = name;
            }
        }

        Ok(config)
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!(
            "environment variable {} is not set",
            name
        ))),
    }
}

/// arXiv fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Search API endpoint
    pub search_url: String,
    /// Base URL for per-paper PDF downloads
    pub pdf_base_url: String,
    /// Maximum number of search results to request
    pub max_results: usize,
    /// Fixed pause between PDF downloads
    pub download_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            search_url: "http://export.arxiv.org/api/query".to_string(),
            pdf_base_url: "https://arxiv.org/pdf".to_string(),
            max_results: 5,
            download_delay: Duration::from_secs(3),
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// OpenAI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Embedding dimensions (1536 for text-embedding-ada-002)
    pub dimensions: usize,
    /// Chat model for answer generation
    pub chat_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens in the generated answer
    pub max_tokens: u32,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            embed_model: crate::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: crate::DEFAULT_EMBEDDING_DIMENSION,
            chat_model: crate::DEFAULT_CHAT_MODEL.to_string(),
            temperature: 0.3,
            max_tokens: 800,
            max_retries: 2,
        }
    }
}

/// Pinecone configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PineconeConfig {
    /// API key
    pub api_key: String,
    /// Control plane base URL (index lookup)
    pub control_url: String,
    /// Name of the index holding the paper chunks
    pub index_name: String,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            control_url: "https://api.pinecone.io".to_string(),
            index_name: crate::DEFAULT_INDEX_NAME.to_string(),
            max_retries: 2,
        }
    }
}

/// Indexing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Number of chunks embedded and upserted per batch
    pub batch_size: usize,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

/// Query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Number of chunks to retrieve per question
    pub top_k: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            chunking: ChunkingConfig::default(),
            openai: OpenAiConfig::default(),
            pinecone: PineconeConfig::default(),
            indexing: IndexingConfig::default(),
            query: QueryConfig::default(),
            papers_dir: PathBuf::from("papers"),
        }
    }
}
