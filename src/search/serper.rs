//! Serper Client
//!
//! Thin client for the Serper web search API. One request per user query,
//! fixed page size, no retries. Provider payloads are parsed through typed
//! structs with per-field defaults so missing titles, links, or snippets
//! degrade to empty strings instead of failing the whole search.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::SearchConfig;
use crate::models::SearchResult;

const SERPER_API_BASE: &str = "https://google.serper.dev";

/// Results requested per search.
const PAGE_SIZE: usize = 10;

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Serper API key not configured")]
    NoApiKey,

    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Serper API error: {0}")]
    Upstream(reqwest::StatusCode),

    #[error("Failed to parse search results: {0}")]
    ParseError(String),
}

#[derive(Serialize)]
struct SerperQuery<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperOrganicResult>,
}

#[derive(Deserialize)]
struct SerperOrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    date: Option<String>,
}

pub struct SerperClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SerperClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: SERPER_API_BASE.to_string(),
        }
    }

    /// Configure client from config; fails when no key is present.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        if config.serper_api_key.is_empty() {
            return Err(SearchError::NoApiKey);
        }
        Ok(Self::new(config.serper_api_key.clone()))
    }

    /// Point the client at a different endpoint (local mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Run a web search and map the organic results into 1-based positions.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        info!(query = %query, "Searching the web via Serper");

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&SerperQuery { q: query, num: PAGE_SIZE })
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Upstream(status));
        }

        let payload: SerperResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        let results: Vec<SearchResult> = payload
            .organic
            .into_iter()
            .enumerate()
            .map(|(idx, result)| SearchResult {
                title: result.title,
                link: result.link,
                snippet: result.snippet,
                position: idx as i64 + 1,
                date: result.date,
            })
            .collect();

        info!(count = results.len(), "Serper search completed");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> SerperClient {
        SerperClient::new("test-key").with_base_url(server.url())
    }

    #[tokio::test]
    async fn assigns_contiguous_positions_by_result_order() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "organic": [
                { "title": "A", "link": "https://a.example", "snippet": "first" },
                { "title": "B", "link": "https://b.example", "snippet": "second", "date": "Jan 1, 2024" },
                { "title": "C", "link": "https://c.example", "snippet": "third" }
            ]
        });
        let mock = server
            .mock("POST", "/search")
            .match_header("x-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let results = client_for(&server).search("rust").await.unwrap();
        mock.assert_async().await;

        assert_eq!(results.len(), 3);
        let positions: Vec<i64> = results.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(results[1].date.as_deref(), Some("Jan 1, 2024"));
    }

    #[tokio::test]
    async fn missing_fields_default_to_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"organic": [{"link": "https://only-link.example"}]}"#)
            .create_async()
            .await;

        let results = client_for(&server).search("rust").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "");
        assert_eq!(results[0].snippet, "");
        assert_eq!(results[0].link, "https://only-link.example");
        assert_eq!(results[0].date, None);
    }

    #[tokio::test]
    async fn payload_without_organic_results_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let results = client_for(&server).search("rust").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(500)
            .create_async()
            .await;

        let err = client_for(&server).search("rust").await.unwrap_err();
        match err {
            SearchError::Upstream(status) => assert_eq!(status.as_u16(), 500),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn empty_key_is_rejected_before_any_request() {
        let config = SearchConfig { serper_api_key: String::new() };
        assert!(matches!(SerperClient::from_config(&config), Err(SearchError::NoApiKey)));
    }
}
