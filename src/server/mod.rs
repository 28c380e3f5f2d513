//! HTTP entry points.
//!
//! - `GET /`: render the page for the state in the query string
//! - `POST /`: apply a form-encoded intent and redirect (303) to the new URL
//! - `GET /api/page`: the same page data as JSON
//! - `GET /health`: liveness probe

pub mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{OriginalUri, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::adapters::CatalogSource;
use crate::config::UpstreamSettings;
use crate::core::{apply_mutation, load_page, HandlerError, PageView};

/// Shared, read-only state for all requests
pub struct AppState {
    pub source: Arc<dyn CatalogSource>,
    pub upstream: UpstreamSettings,
}

impl AppState {
    pub fn new(source: Arc<dyn CatalogSource>, upstream: UpstreamSettings) -> Self {
        Self { source, upstream }
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(render_page).post(mutate))
        .route("/api/page", get(page_json))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(address: &str, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Pokedex listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("HTTP server failed")
}

/// Request failure mapped onto an HTTP status
pub struct ServerError(HandlerError);

impl From<HandlerError> for ServerError {
    fn from(err: HandlerError) -> Self {
        Self(err)
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            HandlerError::Decode(_) => StatusCode::BAD_REQUEST,
            HandlerError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self.0, "Request failed");
        (status, self.0.to_string()).into_response()
    }
}

async fn load(state: &AppState, query: Option<&str>) -> Result<PageView, ServerError> {
    Ok(load_page(state.source.as_ref(), &state.upstream, query).await?)
}

async fn render_page(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, ServerError> {
    let view = load(&state, query.as_deref()).await?;
    Ok(Html(view::render(&view)))
}

async fn page_json(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<PageView>, ServerError> {
    Ok(Json(load(&state, query.as_deref()).await?))
}

async fn mutate(
    OriginalUri(uri): OriginalUri,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Redirect, ServerError> {
    let mutation = apply_mutation(uri.path(), uri.query(), &form)?;
    Ok(Redirect::to(&mutation.location))
}
