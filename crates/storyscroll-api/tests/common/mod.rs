//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use storyscroll_content::domain::episode::Episode;
use storyscroll_core::clock::MonotonicClock;
use storyscroll_reader::domain::config::ReaderConfig;
use tower::ServiceExt;

use storyscroll_api::build_router;
use storyscroll_api::state::AppState;

/// State for `episode` with default timing and a clock that follows the
/// tokio timer, so paused-time tests control transitions.
pub fn test_state(episode: Episode) -> AppState {
    AppState::new(
        Arc::new(episode),
        ReaderConfig::default(),
        Arc::new(MonotonicClock::new()),
    )
}

/// Build the full app router. Uses the same route structure as `main.rs`.
pub fn build_test_app(state: AppState) -> Router {
    build_router(state)
}

/// Layout body for the two-page fixture: sections at 0, 800 and 1600 with a
/// 600px viewport.
pub fn two_page_layout_json() -> serde_json::Value {
    serde_json::json!({
        "container_top": 0.0,
        "sections": [
            { "id": 0, "top": 0.0 },
            { "id": 1, "top": 800.0 },
            { "id": 2, "top": 1600.0 }
        ],
        "viewport_height": 600.0
    })
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

/// Send a DELETE request and return the response.
pub async fn delete(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", uri, None).await
}

/// Create a session mounted on the two-page layout and return its id.
pub async fn create_session(app: &Router) -> String {
    let (status, json) = post_json(
        app.clone(),
        "/api/v1/sessions",
        &serde_json::json!({ "layout": two_page_layout_json() }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["session_id"].as_str().unwrap().to_owned()
}
