//! Pinecone vector index provider
//!
//! Talks to the control plane once at startup to resolve the index host, then
//! uses the index's data plane for upserts and queries. The index must already
//! exist; this crate never creates it.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::PineconeConfig;
use crate::error::{Error, Result};
use crate::types::ChunkMetadata;

use super::vector_store::{VectorMatch, VectorRecord, VectorStoreProvider};
use super::with_backoff;

/// Client for one Pinecone index
pub struct PineconeIndex {
    client: reqwest::Client,
    config: PineconeConfig,
    /// Data plane base URL resolved from the control plane
    host: String,
}

impl PineconeIndex {
    /// Connect to the configured index.
    ///
    /// Resolves the index host via the control plane and fails with
    /// `Error::IndexNotFound` when the index does not exist, so a missing
    /// index is caught at startup rather than on the first upsert.
    pub async fn connect(config: PineconeConfig) -> Result<Self> {
        let client = reqwest::Client::new();
        let description = describe_index(&client, &config).await?;

        Ok(Self {
            client,
            config,
            host: format!("https://{}", description.host),
        })
    }

    fn upsert_url(&self) -> String {
        format!("{}/vectors/upsert", self.host)
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.host)
    }

    /// One upsert request; retried by the caller.
    async fn request_upsert(&self, request: &UpsertRequest) -> Result<()> {
        let response = self
            .client
            .post(self.upsert_url())
            .header("Api-Key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::VectorDb(format!("Pinecone upsert request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::VectorDb(format!(
                "Pinecone upsert failed ({}): {}",
                status, body
            )));
        }

        Ok(())
    }

    /// One query request; retried by the caller.
    async fn request_query(&self, request: &QueryRequest) -> Result<Vec<VectorMatch>> {
        let response = self
            .client
            .post(self.query_url())
            .header("Api-Key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::VectorDb(format!("Pinecone query request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::VectorDb(format!(
                "Pinecone query failed ({}): {}",
                status, body
            )));
        }

        let query_response: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::VectorDb(format!("Failed to parse Pinecone response: {}", e)))?;

        let matches = query_response
            .matches
            .into_iter()
            .filter_map(|m| match m.metadata {
                Some(metadata) => Some(VectorMatch {
                    id: m.id,
                    score: m.score,
                    metadata,
                }),
                None => {
                    tracing::warn!("match {} has no metadata, dropping", m.id);
                    None
                }
            })
            .collect();

        Ok(matches)
    }
}

/// Describe the index on the control plane, mapping 404 to `IndexNotFound`.
async fn describe_index(
    client: &reqwest::Client,
    config: &PineconeConfig,
) -> Result<IndexDescription> {
    let url = format!("{}/indexes/{}", config.control_url, config.index_name);

    let response = client
        .get(&url)
        .header("Api-Key", &config.api_key)
        .send()
        .await
        .map_err(|e| Error::VectorDb(format!("Pinecone control plane request failed: {}", e)))?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(Error::IndexNotFound(config.index_name.clone()));
    }

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::VectorDb(format!(
            "Pinecone describe index failed ({}): {}",
            status, body
        )));
    }

    response
        .json()
        .await
        .map_err(|e| Error::VectorDb(format!("Failed to parse index description: {}", e)))
}

#[derive(serde::Deserialize)]
struct IndexDescription {
    host: String,
}

#[derive(serde::Serialize, Clone)]
struct UpsertRequest {
    vectors: Vec<VectorRecord>,
}

#[derive(serde::Serialize, Clone)]
struct QueryRequest {
    vector: Vec<f32>,
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

#[derive(serde::Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<MatchItem>,
}

#[derive(serde::Deserialize)]
struct MatchItem {
    id: String,
    score: f32,
    metadata: Option<ChunkMetadata>,
}

#[async_trait]
impl VectorStoreProvider for PineconeIndex {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let request = UpsertRequest {
            vectors: records.to_vec(),
        };

        with_backoff(self.config.max_retries, || self.request_upsert(&request)).await
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<VectorMatch>> {
        let request = QueryRequest {
            vector: embedding.to_vec(),
            top_k,
            include_metadata: true,
        };

        with_backoff(self.config.max_retries, || self.request_query(&request)).await
    }

    async fn health_check(&self) -> Result<bool> {
        describe_index(&self.client, &self.config).await.map(|_| true)
    }

    fn name(&self) -> &str {
        "pinecone"
    }
}
