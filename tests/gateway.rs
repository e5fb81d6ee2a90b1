//! End-to-end tests for the river API against a local fake upstream.
//!
//! The fake upstream is a throwaway axum server on an ephemeral port with
//! one route per behavior under test.

use std::time::{Duration, Instant};

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use paddle_watch::api::{create_router, AppState};
use paddle_watch::registry::{Page, Registry, River, LEGACY_PAGE_ID, LRC_PAGE_ID, LRC_RIVER_KEY};
use paddle_watch::upstream::RiverClient;
use paddle_watch::web::Templates;

/// Timeout used for every test client.
const TIMEOUT: Duration = Duration::from_millis(300);

/// Start the fake upstream and return its base URL.
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/levels/ok", get(|| async { Json(json!({ "level": 3.2 })) }))
        .route(
            "/levels/other",
            get(|| async { Json(json!({ "level": 1.5, "unit": "ft" })) }),
        )
        .route(
            "/levels/unavailable",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .route(
            "/levels/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "level": 0.0 }))
            }),
        )
        .route("/levels/html", get(|| async { "<html>maintenance</html>" }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn river(key: &str, path: &str) -> River {
    River::new(key, format!("River {key}"), path, "#22c55e")
}

fn router(base: &str, pages: Vec<Page>) -> Router {
    let state = AppState::new(
        Registry::new(pages).unwrap(),
        RiverClient::with_base(base, TIMEOUT).unwrap(),
        Templates::new().unwrap(),
    );
    create_router(state)
}

async fn send_get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Bytes {
    to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn page_returns_every_river_with_isolated_errors() {
    let base = spawn_upstream().await;
    let app = router(
        &base,
        vec![Page::new("mixed", "Mixed", "dashboard.html")
            .river(river("good", "/levels/ok"))
            .river(river("down", "/levels/unavailable"))
            .river(river("slow", "/levels/slow"))
            .river(river("html", "/levels/html"))],
    );

    let started = Instant::now();
    let response = send_get(&app, "/api/rivers/mixed").await;
    let elapsed = started.elapsed();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rivers = body.as_object().unwrap();

    let mut keys: Vec<_> = rivers.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["down", "good", "html", "slow"]);

    assert_eq!(
        rivers["good"],
        json!({ "name": "River good", "color": "#22c55e", "data": { "level": 3.2 } })
    );

    assert_eq!(
        rivers["down"],
        json!({ "name": "River down", "color": "#22c55e", "error": "API returned 503" })
    );

    for key in ["slow", "html"] {
        let entry = rivers[key].as_object().unwrap();
        assert!(entry.get("data").is_none(), "{key} should have no data");
        let error = entry["error"].as_str().unwrap();
        assert!(!error.is_empty(), "{key} should carry an error message");
    }

    // Fetches run concurrently, so the slow river bounds the whole request.
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
}

#[tokio::test]
async fn unknown_page_has_not_found_shape() {
    let base = spawn_upstream().await;
    let app = router(
        &base,
        vec![Page::new("only", "Only", "dashboard.html").river(river("good", "/levels/ok"))],
    );

    let response = send_get(&app, "/api/rivers/missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Page not found" }));
}

#[tokio::test]
async fn legacy_alias_matches_page_route_byte_for_byte() {
    let base = spawn_upstream().await;
    let app = router(
        &base,
        vec![Page::new(LEGACY_PAGE_ID, "Legacy", "south-sauty-short-creek.html")
            .river(river("short", "/levels/ok"))
            .river(river("sauty", "/levels/other"))],
    );

    let legacy = body_bytes(send_get(&app, "/api/rivers").await).await;
    let direct = body_bytes(send_get(&app, &format!("/api/rivers/{LEGACY_PAGE_ID}")).await).await;

    assert_eq!(legacy, direct);
}

#[tokio::test]
async fn lrc_endpoint_returns_unwrapped_result() {
    let base = spawn_upstream().await;
    let app = router(
        &base,
        vec![Page::new(LRC_PAGE_ID, "Little River Canyon", "little-river-canyon.html")
            .river(River::new(LRC_RIVER_KEY, "Little River Canyon", "/levels/ok", "#f59e0b"))],
    );

    let response = send_get(&app, "/api/river/lrc").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "name": "Little River Canyon", "color": "#f59e0b", "data": { "level": 3.2 } })
    );
}

#[tokio::test]
async fn lrc_endpoint_folds_upstream_failure() {
    let base = spawn_upstream().await;
    let app = router(
        &base,
        vec![Page::new(LRC_PAGE_ID, "Little River Canyon", "little-river-canyon.html")
            .river(River::new(LRC_RIVER_KEY, "Little River Canyon", "/levels/unavailable", "#f59e0b"))],
    );

    let response = send_get(&app, "/api/river/lrc").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "name": "Little River Canyon", "color": "#f59e0b", "error": "API returned 503" })
    );
}

#[tokio::test]
async fn health_ignores_unreachable_upstream() {
    let app = router(
        "http://127.0.0.1:9",
        vec![Page::new("only", "Only", "dashboard.html").river(river("good", "/levels/ok"))],
    );

    let response = send_get(&app, "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok", "app": "paddle-watch" }));
}

#[tokio::test]
async fn timed_out_river_returns_within_bound() {
    let base = spawn_upstream().await;
    let client = RiverClient::with_base(&base, TIMEOUT).unwrap();

    let started = Instant::now();
    let result = client.fetch_river(&river("slow", "/levels/slow")).await;

    assert!(!result.is_ok());
    assert!(!result.error_message().unwrap().is_empty());
    assert!(started.elapsed() < TIMEOUT + Duration::from_secs(1));
}
