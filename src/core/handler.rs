//! Request handling for the catalog page.
//!
//! Two entry points:
//! - [`load_page`]: the read path, URL state in, [`PageView`] out
//! - [`apply_mutation`]: the write path, form fields in, redirect target out
//!
//! Neither keeps state between calls; the query string is the whole session.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::filter::{apply_filters, available_types};
use crate::adapters::{fetch_catalog, CatalogSource, UpstreamError};
use crate::config::UpstreamSettings;
use crate::domain::{CatalogEntry, DecodeError, Intent, PageState};

/// Errors that abort a request
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Everything the view needs to render one page
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    /// The full fetched page, in upstream order
    pub all: Vec<CatalogEntry>,

    /// `all` after the active filters
    pub displayed: Vec<CatalogEntry>,

    /// Entries of `all` whose id is captured, regardless of filters
    pub captured: Vec<CatalogEntry>,

    /// Distinct type names in `all`, for the type selector
    pub types: Vec<String>,

    /// The state this view was built from
    pub state: PageState,
}

/// Build a view from an already fetched catalog
pub fn build_view(all: Vec<CatalogEntry>, state: PageState) -> PageView {
    let displayed = if state.filter.is_empty() {
        all.clone()
    } else {
        apply_filters(&all, &state.filter)
    };
    let captured = all
        .iter()
        .filter(|entry| state.captured.contains(entry.id))
        .cloned()
        .collect();
    let types = available_types(&all);

    PageView {
        all,
        displayed,
        captured,
        types,
        state,
    }
}

/// Read path: decode URL state, fetch the catalog and partition it.
///
/// State is decoded before anything is fetched, so a malformed `captured`
/// parameter never reaches upstream.
pub async fn load_page(
    source: &dyn CatalogSource,
    upstream: &UpstreamSettings,
    query: Option<&str>,
) -> Result<PageView, HandlerError> {
    let state = PageState::from_query(query)?;
    debug!(?state, "Decoded page state");

    let all = fetch_catalog(source, upstream.page_limit, upstream.page_offset).await?;
    let view = build_view(all, state);

    info!(
        displayed = view.displayed.len(),
        captured = view.captured.len(),
        "Loaded page"
    );
    Ok(view)
}

/// Result of a mutation: where to send the browser next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub intent: Intent,
    pub location: String,
}

/// Write path: apply one form-submitted intent to the current URL state.
///
/// `path` is the request path the redirect points back at and `query` the
/// current (raw) query string. Query parameters that are not page state are
/// carried into the redirect unchanged.
pub fn apply_mutation(
    path: &str,
    query: Option<&str>,
    form: &[(String, String)],
) -> Result<Mutation, HandlerError> {
    let intent = Intent::from_form(form)?;
    let state = PageState::from_query(query)?.apply(&intent);
    let location = format!("{}?{}", path, state.to_query());

    info!(intent = intent.as_str(), %location, "Applied mutation");
    Ok(Mutation { intent, location })
}
