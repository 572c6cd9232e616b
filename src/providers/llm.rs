//! LLM provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for chat-completion-based answer generation
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for the given system role and user prompt
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;

    /// The model being used
    fn model(&self) -> &str;

    /// Provider name for logging
    fn name(&self) -> &str;
}
