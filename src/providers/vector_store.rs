//! Vector store provider trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::ChunkMetadata;

/// A record to upsert into the vector index
#[derive(Debug, Clone, Serialize)]
pub struct VectorRecord {
    /// Record id, stable across runs
    pub id: String,
    /// Embedding vector
    pub values: Vec<f32>,
    /// Chunk text and source filename
    pub metadata: ChunkMetadata,
}

/// A ranked match returned by a similarity query
#[derive(Debug, Clone, Deserialize)]
pub struct VectorMatch {
    /// Record id
    pub id: String,
    /// Similarity score, higher is more similar
    pub score: f32,
    /// Chunk text and source filename
    pub metadata: ChunkMetadata,
}

/// Trait for vector storage and similarity search
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Upsert a batch of records
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()>;

    /// Query for the `top_k` nearest records, metadata included.
    ///
    /// Returns at most `top_k` matches; a smaller index returns fewer.
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<VectorMatch>>;

    /// Check that the store is reachable and the index exists
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
