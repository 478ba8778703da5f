//! Concrete search backend speaking the index's HTTP search API.
//!
//! Two endpoints are used: `{index}/_search` for pages and
//! `{index}/_count` for cardinalities. A 400-class response is a request
//! the index rejected as malformed and surfaces as a query error with the
//! index's own root-cause text when the error payload carries one; every
//! other failure is transport-class.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::backend::{SearchBackend, SearchPage};

const USER_AGENT: &str = concat!("citegraph/", env!("CARGO_PKG_VERSION"));

/// HTTP backend for the refs index.
pub struct EsBackend {
    client: Client,
    base_url: String,
}

impl EsBackend {
    /// `base_url` is the root of the search service, eg
    /// `https://search.example.org`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Transport {
                message: format!("building search client: {}", e),
            })?;

        Ok(EsBackend {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post(&self, url: &str, body: &Value) -> Result<String> {
        debug!(url, "refs index request");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| Error::Transport {
            message: e.to_string(),
        })?;

        if status == StatusCode::BAD_REQUEST {
            warn!(%status, "refs index rejected request");
            return Err(Error::Query {
                message: root_cause_reason(&text).unwrap_or(text),
            });
        }
        if !status.is_success() {
            warn!(%status, "refs index non-2xx");
            return Err(Error::Transport {
                message: format!("index returned status {}: {}", status, text),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl SearchBackend for EsBackend {
    async fn search(&self, index: &str, body: &Value) -> Result<SearchPage> {
        let url = format!("{}/{}/_search", self.base_url, index);
        let text = self.post(&url, body).await?;
        let response: EsSearchResponse =
            serde_json::from_str(&text).map_err(|e| Error::Parse {
                message: format!("search response: {}", e),
            })?;

        Ok(SearchPage {
            took_ms: response.took,
            total: response.hits.total.value,
            hits: response.hits.hits.into_iter().map(|hit| hit.source).collect(),
        })
    }

    async fn count(&self, index: &str, body: &Value) -> Result<u64> {
        let url = format!("{}/{}/_count", self.base_url, index);
        let text = self.post(&url, body).await?;
        let response: EsCountResponse =
            serde_json::from_str(&text).map_err(|e| Error::Parse {
                message: format!("count response: {}", e),
            })?;
        Ok(response.count)
    }
}

#[derive(Debug, Deserialize)]
struct EsSearchResponse {
    took: u64,
    hits: EsHits,
}

#[derive(Debug, Deserialize)]
struct EsHits {
    total: EsTotal,
    hits: Vec<EsHit>,
}

#[derive(Debug, Deserialize)]
struct EsTotal {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct EsHit {
    #[serde(rename = "_source")]
    source: Value,
}

#[derive(Debug, Deserialize)]
struct EsCountResponse {
    count: u64,
}

/// Pull the first root-cause reason out of an index error payload, falling
/// back to the top-level reason.
fn root_cause_reason(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<ErrorDetail>,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        root_cause: Option<Vec<RootCause>>,
        reason: Option<String>,
    }

    #[derive(Deserialize)]
    struct RootCause {
        reason: Option<String>,
    }

    let detail = serde_json::from_str::<ErrorBody>(body).ok()?.error?;
    detail
        .root_cause
        .and_then(|causes| causes.into_iter().next())
        .and_then(|cause| cause.reason)
        .or(detail.reason)
}
