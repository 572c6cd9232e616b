//! Query answering over the vector index

use std::sync::Arc;

use crate::config::QueryConfig;
use crate::error::Result;
use crate::generation::{PromptBuilder, SYSTEM_PROMPT};
use crate::providers::{EmbeddingProvider, LlmProvider, VectorStoreProvider};
use crate::types::{QueryResponse, SourceDocument};

/// Answers natural-language questions from the indexed paper chunks
pub struct QueryEngine {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    llm: Arc<dyn LlmProvider>,
    top_k: usize,
}

impl QueryEngine {
    /// Create a query engine over the given providers
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        llm: Arc<dyn LlmProvider>,
        config: &QueryConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            llm,
            top_k: config.top_k,
        }
    }

    /// Embed the question, retrieve the nearest chunks, and generate an
    /// answer grounded in them.
    ///
    /// Sources come back in the index's relevance order, one per match, even
    /// when fewer than `top_k` chunks exist.
    pub async fn answer(&self, question: &str) -> Result<QueryResponse> {
        let query_embedding = self.embedder.embed(question).await?;

        let matches = self.store.query(&query_embedding, self.top_k).await?;
        tracing::info!("Retrieved {} chunks for the question", matches.len());

        let sources = matches
            .iter()
            .map(|m| SourceDocument {
                filename: m.metadata.filename.clone(),
                score: m.score,
            })
            .collect();

        let context = PromptBuilder::build_context(&matches);
        let prompt = PromptBuilder::build_prompt(&context, question);
        let answer = self.llm.complete(SYSTEM_PROMPT, &prompt).await?;

        Ok(QueryResponse { answer, sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::providers::{VectorMatch, VectorRecord};
    use crate::types::ChunkMetadata;

    struct StubEmbedder;

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.5; 4])
        }

        fn dimensions(&self) -> usize {
            4
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    struct FixedStore {
        matches: Vec<VectorMatch>,
    }

    #[async_trait]
    impl VectorStoreProvider for FixedStore {
        async fn upsert(&self, _records: &[VectorRecord]) -> Result<()> {
            Ok(())
        }

        async fn query(&self, _embedding: &[f32], top_k: usize) -> Result<Vec<VectorMatch>> {
            Ok(self.matches.iter().take(top_k).cloned().collect())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[derive(Default)]
    struct RecordingLlm {
        prompt: Mutex<Option<String>>,
    }

    #[async_trait]
    impl LlmProvider for RecordingLlm {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String> {
            *self.prompt.lock().unwrap() = Some(prompt.to_string());
            Ok("According to this research paper, cannabis reduced depression scores."
                .to_string())
        }

        fn model(&self) -> &str {
            "stub-model"
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn make_match(filename: &str, score: f32, text: &str) -> VectorMatch {
        VectorMatch {
            id: format!("chunk-{}", filename),
            score,
            metadata: ChunkMetadata {
                text: text.to_string(),
                filename: filename.to_string(),
            },
        }
    }

    fn engine(matches: Vec<VectorMatch>, llm: Arc<RecordingLlm>) -> QueryEngine {
        QueryEngine::new(
            Arc::new(StubEmbedder),
            Arc::new(FixedStore { matches }),
            llm,
            &QueryConfig { top_k: 5 },
        )
    }

    #[tokio::test]
    async fn test_sources_follow_index_order() {
        let llm = Arc::new(RecordingLlm::default());
        let engine = engine(
            vec![
                make_match(
                    "paper_3.pdf",
                    0.92,
                    "Cannabis reduced depression scores in 60% of participants.",
                ),
                make_match("paper_1.pdf", 0.81, "A second study found mixed results."),
            ],
            llm.clone(),
        );

        let response = engine.answer("Can cannabis help with depression?").await.unwrap();

        assert_eq!(
            response.sources,
            vec![
                SourceDocument {
                    filename: "paper_3.pdf".to_string(),
                    score: 0.92,
                },
                SourceDocument {
                    filename: "paper_1.pdf".to_string(),
                    score: 0.81,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_prompt_carries_the_retrieved_context() {
        let llm = Arc::new(RecordingLlm::default());
        let engine = engine(
            vec![
                make_match("paper_3.pdf", 0.92, "First chunk text."),
                make_match("paper_1.pdf", 0.81, "Second chunk text."),
            ],
            llm.clone(),
        );

        engine.answer("What did the studies find?").await.unwrap();

        let prompt = llm.prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("First chunk text.\n\nSecond chunk text."));
        assert!(prompt.contains("What did the studies find?"));
        assert!(prompt.contains("Do NOT mention document filenames"));
    }

    #[tokio::test]
    async fn test_fewer_matches_than_top_k_is_fine() {
        let llm = Arc::new(RecordingLlm::default());
        let engine = engine(
            vec![make_match("paper_2.pdf", 0.7, "Only one stored chunk.")],
            llm,
        );

        let response = engine.answer("Anything?").await.unwrap();
        assert_eq!(response.sources.len(), 1);
        assert!(!response.answer.is_empty());
    }

    #[tokio::test]
    async fn test_empty_index_yields_no_sources() {
        let llm = Arc::new(RecordingLlm::default());
        let engine = engine(Vec::new(), llm.clone());

        let response = engine.answer("Anything?").await.unwrap();
        assert!(response.sources.is_empty());

        // The template is still filled, with an empty context block.
        let prompt = llm.prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Answer the question based only on the following context:"));
    }
}
