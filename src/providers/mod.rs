//! Provider abstractions for embeddings, completions, and vector storage
//!
//! Trait-based seams so the pipeline and its tests can swap the hosted
//! services for doubles.

pub mod embedding;
pub mod llm;
pub mod openai;
pub mod pinecone;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use openai::OpenAiClient;
pub use pinecone::PineconeIndex;
pub use vector_store::{VectorMatch, VectorRecord, VectorStoreProvider};

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::Result;

/// Run a remote call with bounded retries, exponential backoff, and jitter.
///
/// `max_retries` counts additional attempts after the first; the final error
/// propagates once they are exhausted.
pub(crate) async fn with_backoff<T, F, Fut>(max_retries: u32, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_retries => {
                attempt += 1;
                let base = Duration::from_millis(500u64 << (attempt - 1));
                let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..250));
                tracing::warn!(
                    "request failed (attempt {}/{}): {}, retrying in {:?}",
                    attempt,
                    max_retries,
                    e,
                    base + jitter
                );
                tokio::time::sleep(base + jitter).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_with_backoff_returns_first_success() {
        let calls = AtomicU32::new(0);
        let result = with_backoff(2, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, Error>(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_backoff_retries_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result = with_backoff(2, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(Error::Embedding("transient".to_string()))
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_with_backoff_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_backoff(1, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(Error::Llm("down".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
