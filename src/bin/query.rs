//! Query binary
//!
//! Answers a fixed example question from the indexed paper chunks and prints
//! the generated answer together with its sources.
//!
//! Run with: cargo run --bin paper-rag-query

use std::sync::Arc;

use paper_rag::config::RagConfig;
use paper_rag::providers::{OpenAiClient, PineconeIndex};
use paper_rag::retrieval::QueryEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXAMPLE_QUESTION: &str = "Can cannabis help with depression?";

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

    let openai = Arc::new(OpenAiClient::new(config.openai.clone()));
    let store = Arc::new(PineconeIndex::connect(config.pinecone.clone()).await?);

    let engine = QueryEngine::new(openai.clone(), store, openai, &config.query);

    let response = engine.answer(EXAMPLE_QUESTION).await?;

    println!("Query: {}\n", EXAMPLE_QUESTION);
    println!("Response:");
    println!("{}", response.answer);

    println!("\nSources:");
    for source in &response.sources {
        println!("  {} (score {:.4})", source.filename, source.score);
    }

    Ok(())
}
