//! Routes for the loaded episode.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use storyscroll_content::application::query_handlers::{EpisodeSummary, summarize};
use tracing::instrument;

use crate::state::AppState;

/// GET /
#[instrument(skip(state))]
async fn get_episode(State(state): State<AppState>) -> Json<EpisodeSummary> {
    Json(summarize(&state.episode))
}

/// Returns the router for the episode summary.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_episode))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use storyscroll_reader::domain::config::ReaderConfig;
    use storyscroll_test_support::{ManualClock, two_page_episode};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_get_episode_returns_summary() {
        // Arrange
        let state = AppState::new(
            Arc::new(two_page_episode()),
            ReaderConfig::default(),
            Arc::new(ManualClock::fixed()),
        );
        let app = router().with_state(state);
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(json["episode_title"], "Low Tide");
        assert_eq!(json["page_count"], 2);
        assert_eq!(json["section_count"], 3);
        assert_eq!(json["fingerprint"].as_str().unwrap().len(), 64);
    }
}
