//! arXiv search and PDF download client

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

use crate::config::FetchConfig;
use crate::error::{Error, Result};

/// Client for the arXiv search API and PDF endpoint
pub struct ArxivClient {
    client: reqwest::Client,
    config: FetchConfig,
}

impl ArxivClient {
    /// Create a new client from configuration
    pub fn new(config: FetchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Search arXiv and return the paper identifiers of the result entries,
    /// in feed order, with version suffixes stripped.
    pub async fn search(&self, query: &str) -> Result<Vec<String>> {
        let max_results = self.config.max_results.to_string();

        let response = self
            .client
            .get(&self.config.search_url)
            .query(&[
                ("search_query", query),
                ("start", "0"),
                ("max_results", &max_results),
            ])
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("arXiv search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!(
                "arXiv search failed with status {}",
                response.status()
            )));
        }

        let xml = response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("Failed to read arXiv response: {}", e)))?;

        extract_entry_ids(&xml)
    }

    /// Download the PDF for each identifier into `papers_dir`, writing
    /// sequentially numbered `paper_<n>.pdf` files. A failed download is
    /// logged and skipped; the loop pauses between requests to stay polite
    /// to the arXiv servers. Returns the number of files written.
    pub async fn download(&self, ids: &[String], papers_dir: &Path) -> Result<usize> {
        tokio::fs::create_dir_all(papers_dir).await?;

        let mut downloaded = 0;
        for (i, paper_id) in ids.iter().enumerate() {
            let number = i + 1;
            let path = papers_dir.join(format!("paper_{}.pdf", number));

            tracing::info!("Downloading paper {} (id {})", number, paper_id);
            match self.download_one(paper_id, &path).await {
                Ok(size) => {
                    tracing::info!("Saved {} ({} bytes)", path.display(), size);
                    downloaded += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to download paper {}: {}", paper_id, e);
                }
            }

            tokio::time::sleep(self.config.download_delay).await;
        }

        Ok(downloaded)
    }

    async fn download_one(&self, paper_id: &str, path: &Path) -> Result<usize> {
        let url = format!("{}/{}", self.config.pdf_base_url, paper_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!("status {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(format!("failed to read body: {}", e)))?;

        tokio::fs::write(path, &bytes).await?;
        Ok(bytes.len())
    }
}

/// Extract arXiv identifiers from an Atom feed.
///
/// Each `<entry>` carries an `<id>` element holding the paper's canonical
/// `/abs/<id>` URL; the bare identifier is pulled out of that URL with any
/// trailing `v<N>` version suffix stripped. The feed-level `<id>` is ignored,
/// as are entries whose id does not look like an abs URL.
pub fn extract_entry_ids(xml: &str) -> Result<Vec<String>> {
    let id_pattern = Regex::new(r"/abs/(.+?)(?:v\d+)?$").expect("Invalid regex");

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut ids = Vec::new();
    let mut in_entry = false;
    let mut in_id = false;
    let mut current_id = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"entry" => in_entry = true,
                b"id" if in_entry => {
                    in_id = true;
                    current_id.clear();
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_id {
                    if let Ok(text) = e.unescape() {
                        current_id.push_str(&text);
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"entry" => in_entry = false,
                b"id" if in_id => {
                    if let Some(cap) = id_pattern.captures(current_id.trim()) {
                        ids.push(cap[1].to_string());
                    }
                    in_id = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Parse(format!("malformed Atom feed: {}", e)));
            }
            _ => {}
        }
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(entries: &[&str]) -> String {
        let entries: String = entries
            .iter()
            .map(|id| format!("<entry><id>{}</id><title>A paper</title></entry>", id))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>http://arxiv.org/api/cHxbiOdZaP56ODnBPIenZhzg5f8</id>
  <title>ArXiv Query Results</title>
  {}
</feed>"#,
            entries
        )
    }

    #[test]
    fn test_extracts_ids_in_feed_order() {
        let xml = feed(&[
            "http://arxiv.org/abs/2301.12345v2",
            "http://arxiv.org/abs/2302.00001",
            "http://arxiv.org/abs/1904.09999v11",
        ]);

        let ids = extract_entry_ids(&xml).unwrap();
        assert_eq!(ids, vec!["2301.12345", "2302.00001", "1904.09999"]);
    }

    #[test]
    fn test_strips_version_suffix_only() {
        let xml = feed(&["http://arxiv.org/abs/cond-mat/9901001v3"]);
        let ids = extract_entry_ids(&xml).unwrap();
        assert_eq!(ids, vec!["cond-mat/9901001"]);
    }

    #[test]
    fn test_ignores_feed_level_id_and_bad_entries() {
        let xml = feed(&["http://arxiv.org/unexpected/2301.12345"]);
        let ids = extract_entry_ids(&xml).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_empty_feed_yields_no_ids() {
        let ids = extract_entry_ids(&feed(&[])).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_mismatched_tags_are_a_parse_error() {
        let result = extract_entry_ids("<feed><entry></id></feed>");
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
