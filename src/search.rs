//! Custom Search API client.
//!
//! A thin, uncached wrapper over the paginated Google Custom Search JSON
//! API. One call fetches one page of at most ten results; the orchestrator
//! owns pagination and pacing. Failures are surfaced as
//! [`SearchApiError`] and handled at the query level; there is no retry
//! here.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::SearchApiError;
use crate::models::SearchResult;
use crate::utils::truncate_for_log;

/// Production endpoint of the Custom Search JSON API.
pub const CUSTOM_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Response envelope; the API omits `items` entirely for an empty page.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

/// Client for the Custom Search JSON API.
///
/// Holds the API credentials and a pooled HTTP client; create once and
/// reuse across the run.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    cse_id: String,
}

impl SearchClient {
    /// Create a client for the production endpoint.
    ///
    /// `timeout` bounds each request end to end.
    pub fn new(
        api_key: impl Into<String>,
        cse_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: CUSTOM_SEARCH_ENDPOINT.to_string(),
            api_key: api_key.into(),
            cse_id: cse_id.into(),
        })
    }

    /// Point the client at a different endpoint (mock servers in tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Fetch one page of results for `query`.
    ///
    /// `start_index` is 1-based; the API caps `num` at 10, so callers must
    /// request in chunks no larger than that. An empty page is a normal
    /// result, not an error.
    ///
    /// # Errors
    ///
    /// [`SearchApiError::Api`] when the API reports authentication failure,
    /// quota exhaustion, or a malformed query; [`SearchApiError::Http`] on
    /// transport failure.
    #[instrument(level = "info", skip_all, fields(query = %query, start_index, num))]
    pub async fn search(
        &self,
        query: &str,
        start_index: u32,
        num: u8,
    ) -> Result<Vec<SearchResult>, SearchApiError> {
        let start = start_index.to_string();
        let num_s = num.to_string();
        let params = [
            ("key", self.api_key.as_str()),
            ("cx", self.cse_id.as_str()),
            ("q", query),
            ("start", start.as_str()),
            ("num", num_s.as_str()),
        ];

        let response = self.client.get(&self.endpoint).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = truncate_for_log(&body, 300);
            warn!(%status, %message, "Search API rejected the request");
            return Err(SearchApiError::Api { status, message });
        }

        let body: SearchResponse = response.json().await?;
        debug!(count = body.items.len(), "Search page fetched");
        Ok(body.items)
    }
}
