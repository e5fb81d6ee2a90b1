//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    dashboard, health, index, legacy_rivers, lrc_river, metrics, rivers_for_page, AppState,
};

/// Create the application router.
///
/// Every route allows any origin, since the JSON API is consumed by
/// front-ends hosted elsewhere.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(index))
        .route("/:page_id", get(dashboard))
        // River data
        .route("/api/rivers", get(legacy_rivers))
        .route("/api/rivers/:page_id", get(rivers_for_page))
        .route("/api/river/lrc", get(lrc_river))
        // Health and metrics
        .route("/api/health", get(health))
        .route("/metrics", get(metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
