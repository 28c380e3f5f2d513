//! PokeAPI adapter.
//!
//! Talks to `https://pokeapi.co/api/v2` (or any compatible base URL) over
//! plain HTTPS GETs. Response bodies go through [`crate::domain::schema`]
//! before anything else sees them.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{CatalogSource, UpstreamError};
use crate::config::UpstreamSettings;
use crate::domain::schema;
use crate::domain::{CatalogEntry, CatalogRef};

/// PokeAPI client
pub struct PokeApiClient {
    /// API root, without trailing slash
    base_url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl PokeApiClient {
    /// Create a new client with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let base_url: String = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| UpstreamError::Http {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Create from config
    pub fn from_settings(settings: &UpstreamSettings) -> Result<Self, UpstreamError> {
        Self::new(
            settings.base_url.clone(),
            Duration::from_secs(settings.timeout_seconds),
        )
    }

    /// Build the list endpoint URL
    fn list_url(&self, limit: u32, offset: u32) -> String {
        format!("{}/pokemon?limit={}&offset={}", self.base_url, limit, offset)
    }

    /// GET a URL and return its body, failing on transport errors and non-2xx
    async fn get_text(&self, url: &str) -> Result<String, UpstreamError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| UpstreamError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| UpstreamError::Http {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    fn name(&self) -> &str {
        "pokeapi"
    }

    async fn list_page(&self, limit: u32, offset: u32) -> Result<Vec<CatalogRef>, UpstreamError> {
        let url = self.list_url(limit, offset);
        let body = self.get_text(&url).await?;
        schema::parse_list(&body).map_err(|source| UpstreamError::Schema { url, source })
    }

    async fn fetch_detail(&self, url: &str) -> Result<CatalogEntry, UpstreamError> {
        let body = self.get_text(url).await?;
        schema::parse_detail(&body).map_err(|source| UpstreamError::Schema {
            url: url.to_string(),
            source,
        })
    }
}
