//! HTTP API handlers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::registry::{Registry, LEGACY_PAGE_ID, LRC_PAGE_ID, LRC_RIVER_KEY};
use crate::upstream::{PageResults, RiverClient, RiverResult};
use crate::web::Templates;

/// Application state shared with handlers. Everything in it is read-only.
#[derive(Clone)]
pub struct AppState {
    /// Page/river registry.
    pub registry: Arc<Registry>,
    /// Upstream API client.
    pub client: RiverClient,
    /// Page templates.
    pub templates: Arc<Templates>,
    /// Prometheus handle, if metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(registry: Registry, client: RiverClient, templates: Templates) -> Self {
        Self {
            registry: Arc::new(registry),
            client,
            templates: Arc::new(templates),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so `/metrics` is served.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Fetch every river configured for `page_id`.
    pub async fn rivers_for_page(&self, page_id: &str) -> Result<PageResults> {
        let page = self.registry.page(page_id)?;
        Ok(self.client.rivers_for_page(page).await)
    }

    /// Fetch one configured river.
    pub async fn single_river(&self, page_id: &str, river_key: &str) -> Result<RiverResult> {
        let river = self.registry.river(page_id, river_key)?;
        Ok(self.client.fetch_river(river).await)
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
    /// Application name.
    pub app: &'static str,
}

/// Landing page listing every dashboard.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    Ok(Html(state.templates.render_index(&state.registry)?))
}

/// Dashboard page for one slug.
pub async fn dashboard(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> Result<Html<String>> {
    let page = state.registry.page(&page_id)?;
    Ok(Html(state.templates.render_page(page)?))
}

/// River data for one page.
pub async fn rivers_for_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> Result<Json<PageResults>> {
    Ok(Json(state.rivers_for_page(&page_id).await?))
}

/// Legacy alias for the South Sauty & Short Creek page.
pub async fn legacy_rivers(State(state): State<AppState>) -> Result<Json<PageResults>> {
    Ok(Json(state.rivers_for_page(LEGACY_PAGE_ID).await?))
}

/// Little River Canyon, unwrapped.
pub async fn lrc_river(State(state): State<AppState>) -> Result<Json<RiverResult>> {
    Ok(Json(state.single_river(LRC_PAGE_ID, LRC_RIVER_KEY).await?))
}

/// Health check handler - always returns 200, no upstream I/O.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        app: "paddle-watch",
    })
}

/// Prometheus exposition, 404 when metrics are disabled.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
