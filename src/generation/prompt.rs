//! Prompt templates for RAG answer generation

use crate::providers::vector_store::VectorMatch;

/// System role sent with every completion request
pub const SYSTEM_PROMPT: &str = "You are a research assistant that provides detailed, \
accurate summaries of scientific papers. You answer questions based only on the provided \
context, without adding external information or opinions.";

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join matched chunk texts into one context block, in relevance order
    pub fn build_context(matches: &[VectorMatch]) -> String {
        matches
            .iter()
            .map(|m| m.metadata.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Fill the instructional template with the retrieved context and query
    pub fn build_prompt(context: &str, query: &str) -> String {
        format!(
            r#"Answer the question based only on the following context:
{context}
---
Answer the question based solely on the above context: {query}

IMPORTANT INSTRUCTIONS:

1. Provide a detailed and thorough answer based only on the information in the context.
2. Start your answer with "According to this research paper," or "According to these research papers," as appropriate.
3. Do NOT mention document filenames like "paper_1.pdf" or any local file identifiers.
4. Summarize the key findings, methodologies, and conclusions from the research in detail.
5. If the context contains multiple studies with different conclusions, explain the different perspectives.
6. If the context is insufficient to answer the question fully, ignore the information which is not related to the query.
7. If there is a direct answer to it, quote the text from the research paper.
"#,
            context = context,
            query = query
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkMetadata;

    fn match_with_text(text: &str, filename: &str, score: f32) -> VectorMatch {
        VectorMatch {
            id: "chunk-test".to_string(),
            score,
            metadata: ChunkMetadata {
                text: text.to_string(),
                filename: filename.to_string(),
            },
        }
    }

    #[test]
    fn test_context_joins_chunks_with_blank_lines() {
        let matches = vec![
            match_with_text("First finding.", "paper_1.pdf", 0.9),
            match_with_text("Second finding.", "paper_2.pdf", 0.8),
        ];

        assert_eq!(
            PromptBuilder::build_context(&matches),
            "First finding.\n\nSecond finding."
        );
    }

    #[test]
    fn test_empty_matches_yield_empty_context() {
        assert_eq!(PromptBuilder::build_context(&[]), "");
    }

    #[test]
    fn test_prompt_substitutes_context_and_query() {
        let prompt = PromptBuilder::build_prompt("the context block", "the question?");

        assert!(prompt.contains("the context block"));
        assert!(prompt.contains("above context: the question?"));
    }

    #[test]
    fn test_prompt_forbids_filenames_in_the_answer() {
        let prompt = PromptBuilder::build_prompt("ctx", "q");
        assert!(prompt.contains("Do NOT mention document filenames"));
        assert!(prompt.contains("According to this research paper,"));
    }
}
