//! Adapter interfaces for the upstream catalog.
//!
//! [`CatalogSource`] is the seam between request handling and whatever
//! serves creature data. The production implementation is [`PokeApiClient`];
//! tests plug in an in-memory source.

pub mod pokeapi;

use async_trait::async_trait;
use futures::future::try_join_all;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{CatalogEntry, CatalogRef, SchemaError};

pub use pokeapi::PokeApiClient;

/// Errors talking to the upstream catalog
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Upstream returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Unexpected response from {url}: {source}")]
    Schema {
        url: String,
        #[source]
        source: SchemaError,
    },
}

/// Trait for upstream catalog sources
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Fetch one page of references
    async fn list_page(&self, limit: u32, offset: u32) -> Result<Vec<CatalogRef>, UpstreamError>;

    /// Fetch the full detail behind a reference URL
    async fn fetch_detail(&self, url: &str) -> Result<CatalogEntry, UpstreamError>;
}

/// Fetch a page and the detail of every entry on it.
///
/// Detail requests are all issued at once and joined. The first failure fails
/// the whole call and drops the sibling requests still in flight; there are
/// no partial results. Output order follows the list page.
pub async fn fetch_catalog(
    source: &dyn CatalogSource,
    limit: u32,
    offset: u32,
) -> Result<Vec<CatalogEntry>, UpstreamError> {
    let refs = source.list_page(limit, offset).await?;
    debug!(source = source.name(), count = refs.len(), "Fetched catalog page");

    let entries = try_join_all(refs.iter().map(|r| source.fetch_detail(&r.detail_url))).await?;

    info!(
        source = source.name(),
        limit, offset,
        entries = entries.len(),
        "Fetched catalog"
    );
    Ok(entries)
}
