//! Paper fetch binary
//!
//! Searches arXiv with a fixed example query and downloads the matching PDFs
//! into the papers directory.
//!
//! Run with: cargo run --bin paper-rag-fetch

use paper_rag::config::RagConfig;
use paper_rag::fetch::ArxivClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SEARCH_QUERY: &str = "all:Do Cell Phones Cause Cancer";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paper_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RagConfig::default();
    let client = ArxivClient::new(config.fetch.clone());

    tracing::info!("Searching arXiv for '{}'", SEARCH_QUERY);
    let ids = client.search(SEARCH_QUERY).await?;

    println!("Found arXiv ids:");
    for (i, id) in ids.iter().enumerate() {
        println!("{}. {}", i + 1, id);
    }

    println!("\nStarting downloads...");
    let downloaded = client.download(&ids, &config.papers_dir).await?;

    println!(
        "\nDownloaded {} of {} papers into {}",
        downloaded,
        ids.len(),
        config.papers_dir.display()
    );

    Ok(())
}
