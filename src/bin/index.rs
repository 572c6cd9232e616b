//! Indexing binary
//!
//! Extracts text from every PDF in the papers directory, chunks it, embeds
//! each chunk, and upserts the records into the Pinecone index. The index
//! must already exist; a missing index fails here, before any work is done.
//!
//! Run with: cargo run --bin paper-rag-index

use std::sync::Arc;

use paper_rag::config::RagConfig;
use paper_rag::ingestion::IngestPipeline;
use paper_rag::providers::{OpenAiClient, PineconeIndex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paper_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RagConfig::from_env()?;

    let embedder = Arc::new(OpenAiClient::new(config.openai.clone()));
    let store = Arc::new(PineconeIndex::connect(config.pinecone.clone()).await?);

    let pipeline = IngestPipeline::new(embedder, store, &config.chunking, &config.indexing);

    println!("Processing PDFs and storing chunks in vector database...");
    let summary = pipeline.run(&config.papers_dir).await?;

    println!(
        "Indexed {} chunks from {} files in {} batches ({} files skipped).",
        summary.chunks_indexed, summary.files_indexed, summary.batches, summary.files_skipped
    );
    println!("All chunks have been stored in the vector database.");

    Ok(())
}
