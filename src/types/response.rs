//! Response types for queries

use serde::{Deserialize, Serialize};

/// A source paper that contributed context to an answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceDocument {
    /// Filename of the PDF the matched chunk came from
    pub filename: String,
    /// Similarity score reported by the vector index
    pub score: f32,
}

/// Response from a RAG query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated answer
    pub answer: String,
    /// Source documents in the index's relevance order
    pub sources: Vec<SourceDocument>,
}
