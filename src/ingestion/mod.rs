//! Document ingestion pipeline: extract, chunk, embed, upsert

mod chunker;
mod parser;

pub use chunker::TextChunker;
pub use parser::extract_text;

use std::path::Path;
use std::sync::Arc;

use walkdir::WalkDir;

use crate::config::{ChunkingConfig, IndexingConfig};
use crate::error::Result;
use crate::providers::{EmbeddingProvider, VectorRecord, VectorStoreProvider};
use crate::types::Chunk;

/// Summary of one indexing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSummary {
    /// PDFs whose chunks were indexed
    pub files_indexed: usize,
    /// PDFs skipped because no text could be extracted
    pub files_skipped: usize,
    /// Total chunks upserted
    pub chunks_indexed: usize,
    /// Upsert batches submitted
    pub batches: usize,
}

/// Pipeline that turns a directory of PDFs into vector index records
pub struct IngestPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    chunker: TextChunker,
    batch_size: usize,
}

impl IngestPipeline {
    /// Create a pipeline over the given providers
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        chunking: &ChunkingConfig,
        indexing: &IndexingConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            chunker: TextChunker::new(chunking.chunk_size, chunking.chunk_overlap),
            batch_size: indexing.batch_size.max(1),
        }
    }

    /// Index every `.pdf` file in `papers_dir`.
    ///
    /// A missing directory means there is nothing to process. Files whose
    /// text cannot be extracted are skipped with a log message; embedding or
    /// upsert failures abort the run.
    pub async fn run(&self, papers_dir: &Path) -> Result<IndexSummary> {
        if !papers_dir.exists() {
            tracing::info!(
                "Directory '{}' does not exist, nothing to index",
                papers_dir.display()
            );
            return Ok(IndexSummary::default());
        }

        let mut all_chunks = Vec::new();
        let mut files_indexed = 0;
        let mut files_skipped = 0;

        for entry in WalkDir::new(papers_dir)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !has_pdf_extension(path) {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().to_string();
            tracing::info!("Processing: {}", filename);

            let text = match extract_text(path) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Skipping {}, no text extracted: {}", filename, e);
                    files_skipped += 1;
                    continue;
                }
            };

            let chunks = self.chunker.split(&text);
            if chunks.is_empty() {
                tracing::warn!("Skipping {}, no text extracted", filename);
                files_skipped += 1;
                continue;
            }

            tracing::info!("Extracted {} chunks from {}", chunks.len(), filename);
            for chunk in chunks.iter().take(3) {
                tracing::debug!("Sample chunk from {}: {:.80}", filename, chunk);
            }
            all_chunks.extend(
                chunks
                    .into_iter()
                    .enumerate()
                    .map(|(i, content)| Chunk::new(content, filename.clone(), i as u32)),
            );
            files_indexed += 1;
        }

        let mut summary = self.index_chunks(all_chunks).await?;
        summary.files_indexed = files_indexed;
        summary.files_skipped = files_skipped;
        Ok(summary)
    }

    /// Embed and upsert chunks in fixed-size batches.
    pub async fn index_chunks(&self, chunks: Vec<Chunk>) -> Result<IndexSummary> {
        let mut summary = IndexSummary::default();

        for batch in chunks.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
            let embeddings = self.embedder.embed_batch(&texts).await?;

            let records: Vec<VectorRecord> = batch
                .iter()
                .zip(embeddings)
                .map(|(chunk, values)| VectorRecord {
                    id: chunk.vector_id(),
                    values,
                    metadata: chunk.metadata(),
                })
                .collect();

            self.store.upsert(&records).await?;

            summary.chunks_indexed += records.len();
            summary.batches += 1;
            tracing::info!("Stored {} chunks in vector index", records.len());
        }

        Ok(summary)
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase() == "pdf")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::error::Error;
    use crate::providers::VectorMatch;

    struct StubEmbedder;

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.1, 0.2, 0.3])
        }

        fn dimensions(&self) -> usize {
            3
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        batches: Mutex<Vec<Vec<VectorRecord>>>,
    }

    #[async_trait]
    impl VectorStoreProvider for RecordingStore {
        async fn upsert(&self, records: &[VectorRecord]) -> Result<()> {
            self.batches.lock().unwrap().push(records.to_vec());
            Ok(())
        }

        async fn query(&self, _embedding: &[f32], _top_k: usize) -> Result<Vec<VectorMatch>> {
            Ok(Vec::new())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn pipeline(store: Arc<RecordingStore>, batch_size: usize) -> IngestPipeline {
        IngestPipeline::new(
            Arc::new(StubEmbedder),
            store,
            &ChunkingConfig::default(),
            &IndexingConfig { batch_size },
        )
    }

    #[tokio::test]
    async fn test_missing_directory_is_not_an_error() {
        let store = Arc::new(RecordingStore::default());
        let summary = pipeline(store.clone(), 100)
            .run(Path::new("no-such-directory"))
            .await
            .unwrap();

        assert_eq!(summary, IndexSummary::default());
        assert!(store.batches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_directory_without_pdfs_produces_no_upserts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a pdf").unwrap();

        let store = Arc::new(RecordingStore::default());
        let summary = pipeline(store.clone(), 100).run(dir.path()).await.unwrap();

        assert_eq!(summary, IndexSummary::default());
        assert!(store.batches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("paper_1.pdf"), "garbage bytes").unwrap();

        let store = Arc::new(RecordingStore::default());
        let summary = pipeline(store.clone(), 100).run(dir.path()).await.unwrap();

        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.chunks_indexed, 0);
        assert!(store.batches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chunks_are_upserted_in_fixed_size_batches() {
        let chunks: Vec<Chunk> = (0..250)
            .map(|i| Chunk::new(format!("chunk {}", i), "paper_1.pdf".to_string(), i))
            .collect();

        let store = Arc::new(RecordingStore::default());
        let summary = pipeline(store.clone(), 100)
            .index_chunks(chunks)
            .await
            .unwrap();

        assert_eq!(summary.chunks_indexed, 250);
        assert_eq!(summary.batches, 3);

        let batches = store.batches.lock().unwrap();
        let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);

        // Records carry the chunk text verbatim and content-derived ids.
        assert_eq!(batches[0][0].metadata.text, "chunk 0");
        assert_eq!(batches[0][0].metadata.filename, "paper_1.pdf");
        assert!(batches[0][0].id.starts_with("chunk-"));
    }

    #[tokio::test]
    async fn test_embedding_failure_aborts_the_run() {
        struct FailingEmbedder;

        #[async_trait]
        impl EmbeddingProvider for FailingEmbedder {
            async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
                Err(Error::Embedding("service unavailable".to_string()))
            }

            fn dimensions(&self) -> usize {
                3
            }

            fn name(&self) -> &str {
                "failing"
            }
        }

        let store = Arc::new(RecordingStore::default());
        let pipeline = IngestPipeline::new(
            Arc::new(FailingEmbedder),
            store.clone(),
            &ChunkingConfig::default(),
            &IndexingConfig { batch_size: 100 },
        );

        let chunks = vec![Chunk::new("text".to_string(), "paper_1.pdf".to_string(), 0)];
        let result = pipeline.index_chunks(chunks).await;

        assert!(matches!(result, Err(Error::Embedding(_))));
        assert!(store.batches.lock().unwrap().is_empty());
    }
}
