//! Chunk types with source tracking

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A chunk of text extracted from one paper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content
    pub content: String,
    /// Filename of the originating PDF
    pub filename: String,
    /// Position of this chunk within its document
    pub chunk_index: u32,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(content: String, filename: String, chunk_index: u32) -> Self {
        Self {
            content,
            filename,
            chunk_index,
        }
    }

    /// Stable vector id derived from the chunk's content and position.
    ///
    /// Re-indexing the same corpus produces the same ids, so repeated runs
    /// overwrite records instead of accumulating near-duplicates under
    /// counter-based ids.
    pub fn vector_id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.filename.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.chunk_index.to_be_bytes());
        hasher.update([0u8]);
        hasher.update(self.content.as_bytes());
        let digest = hex::encode(hasher.finalize());
        format!("chunk-{}", &digest[..32])
    }

    /// Metadata stored alongside the vector
    pub fn metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            text: self.content.clone(),
            filename: self.filename.clone(),
        }
    }
}

/// Metadata persisted with each vector in the index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkMetadata {
    /// Chunk text, stored verbatim
    pub text: String,
    /// Originating PDF filename
    pub filename: String,
}
