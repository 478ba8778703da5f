//! HTTP client for the catalog's release lookup endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::domain::Release;
use crate::error::{Error, Result};

use super::CatalogClient;

const USER_AGENT: &str = concat!("citegraph/", env!("CARGO_PKG_VERSION"));

/// Catalog client speaking `GET {base}/release/{ident}`.
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// `base_url` is the catalog API root, eg
    /// `https://api.example.org/v0`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Transport {
                message: format!("building catalog client: {}", e),
            })?;

        Ok(HttpCatalogClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn get_release(&self, ident: &str, hide: &str, expand: &str) -> Result<Release> {
        let url = Url::parse_with_params(
            &format!("{}/release/{}", self.base_url, ident),
            &[("hide", hide), ("expand", expand)],
        )
        .map_err(|e| Error::Transport {
            message: format!("catalog url: {}", e),
        })?;

        debug!(%url, "catalog release lookup");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                ident: ident.to_string(),
            });
        }
        if !status.is_success() {
            warn!(%status, ident, "catalog non-2xx");
            return Err(Error::Transport {
                message: format!("catalog returned status {}", status),
            });
        }

        let text = response.text().await.map_err(|e| Error::Transport {
            message: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| Error::Parse {
            message: format!("release record: {}", e),
        })
    }
}
