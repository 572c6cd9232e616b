//! Core types for the paper-rag pipeline

pub mod document;
pub mod response;

pub use document::{Chunk, ChunkMetadata};
pub use response::{QueryResponse, SourceDocument};
