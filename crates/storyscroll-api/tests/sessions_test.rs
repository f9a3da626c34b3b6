//! Integration tests for reading sessions.
//!
//! Timer-driven behavior runs on a paused tokio clock; sleeping in the test
//! lets the session's own deadlines fire first.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use storyscroll_test_support::{cued_episode, two_page_episode};

#[tokio::test(start_paused = true)]
async fn test_scroll_across_page_boundary_hides_then_reveals() {
    // Arrange
    let app = common::build_test_app(common::test_state(two_page_episode()));
    let session_id = common::create_session(&app).await;
    let base = format!("/api/v1/sessions/{session_id}");

    // Act
    let (scroll_status, _) = common::post_json(
        app.clone(),
        &format!("{base}/scroll"),
        &serde_json::json!({ "scroll_top": 1350.0 }),
    )
    .await;
    let (_, hiding) = common::get_json(app.clone(), &base).await;
    tokio::time::sleep(Duration::from_millis(450)).await;
    let (_, shown) = common::get_json(app, &base).await;

    // Assert
    assert_eq!(scroll_status, StatusCode::ACCEPTED);
    assert_eq!(hiding["state"]["current_section"], 2);
    assert_eq!(hiding["state"]["current_page"], 0);
    assert_eq!(hiding["state"]["page_visible"], false);
    assert_eq!(hiding["state"]["phase"], "hiding");
    assert_eq!(shown["state"]["current_page"], 1);
    assert_eq!(shown["state"]["page_visible"], true);
    assert_eq!(shown["state"]["phase"], "idle");
    assert!(shown["state"]["next_deadline"].is_null());
}

#[tokio::test(start_paused = true)]
async fn test_scroll_within_page_never_hides() {
    // Arrange
    let app = common::build_test_app(common::test_state(two_page_episode()));
    let session_id = common::create_session(&app).await;
    let base = format!("/api/v1/sessions/{session_id}");

    // Act
    common::post_json(
        app.clone(),
        &format!("{base}/scroll"),
        &serde_json::json!({ "scroll_top": 600.0 }),
    )
    .await;
    let (_, json) = common::get_json(app, &base).await;

    // Assert
    assert_eq!(json["state"]["current_section"], 1);
    assert_eq!(json["state"]["current_page"], 0);
    assert_eq!(json["state"]["page_visible"], true);
}

#[tokio::test(start_paused = true)]
async fn test_background_round_trip_settles_on_latest() {
    // Arrange
    let app = common::build_test_app(common::test_state(two_page_episode()));
    let session_id = common::create_session(&app).await;
    let base = format!("/api/v1/sessions/{session_id}");

    // Act
    common::post_json(
        app.clone(),
        &format!("{base}/background"),
        &serde_json::json!({ "name": "pink" }),
    )
    .await;
    tokio::time::sleep(Duration::from_millis(500)).await;
    let (status, fading) = common::post_json(
        app.clone(),
        &format!("{base}/background"),
        &serde_json::json!({ "name": "blue" }),
    )
    .await;
    tokio::time::sleep(Duration::from_millis(2100)).await;
    let (_, settled) = common::get_json(app, &base).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fading["state"]["upper_entering"], true);
    assert_eq!(fading["state"]["lower_background"]["value"], "#ffffff");
    assert_eq!(settled["state"]["upper_entering"], false);
    assert_eq!(settled["state"]["lower_background"]["value"], "#4a6cff");
}

#[tokio::test(start_paused = true)]
async fn test_unresolved_background_returns_422_and_ends_session() {
    // Arrange
    let app = common::build_test_app(common::test_state(two_page_episode()));
    let session_id = common::create_session(&app).await;
    let base = format!("/api/v1/sessions/{session_id}");

    // Act
    let (status, json) = common::post_json(
        app.clone(),
        &format!("{base}/background"),
        &serde_json::json!({ "name": "teal" }),
    )
    .await;
    tokio::task::yield_now().await;
    let (after_status, after_json) = common::get_json(app, &base).await;

    // Assert
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "unresolved_name");
    assert_eq!(
        json["message"],
        "teal not found in colorMapping nor imageMapping"
    );
    assert_eq!(after_status, StatusCode::NOT_FOUND);
    assert_eq!(after_json["error"], "session_not_found");
}

#[tokio::test(start_paused = true)]
async fn test_section_cues_and_audio_play() {
    // Arrange
    let app = common::build_test_app(common::test_state(cued_episode()));
    let session_id = common::create_session(&app).await;
    let base = format!("/api/v1/sessions/{session_id}");

    // Act
    let (play_status, played) =
        common::post_json(app.clone(), &format!("{base}/audio/play"), &serde_json::json!({}))
            .await;
    common::post_json(
        app.clone(),
        &format!("{base}/scroll"),
        &serde_json::json!({ "scroll_top": 1350.0 }),
    )
    .await;
    let (_, cued) = common::get_json(app, &base).await;

    // Assert
    assert_eq!(play_status, StatusCode::OK);
    assert_eq!(
        played["state"]["current_track"],
        "https://example.com/lets_dance.mp3"
    );
    assert_eq!(cued["state"]["text_color"], "#ffffff");
    assert_eq!(cued["state"]["filter"]["value"], "#4a6cff");
    assert_eq!(cued["state"]["upper_background"]["value"], "harbor.jpg");
}

#[tokio::test(start_paused = true)]
async fn test_resize_remeasures_geometry() {
    // Arrange
    let app = common::build_test_app(common::test_state(two_page_episode()));
    let session_id = common::create_session(&app).await;
    let base = format!("/api/v1/sessions/{session_id}");

    // Act: a taller viewport moves the threshold to 700.
    let (status, _) = common::post_json(
        app.clone(),
        &format!("{base}/resize"),
        &serde_json::json!({
            "container_top": 0.0,
            "sections": [
                { "id": 0, "top": 0.0 },
                { "id": 1, "top": 800.0 },
                { "id": 2, "top": 1600.0 }
            ],
            "scroll_top": 150.0,
            "viewport_height": 1400.0
        }),
    )
    .await;
    let (_, json) = common::get_json(app, &base).await;

    // Assert
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["state"]["current_section"], 1);
}

#[tokio::test]
async fn test_create_session_rejects_unrendered_section() {
    let app = common::build_test_app(common::test_state(two_page_episode()));

    let (status, json) = common::post_json(
        app,
        "/api/v1/sessions",
        &serde_json::json!({
            "layout": {
                "container_top": 0.0,
                "sections": [{ "id": 0, "top": 0.0 }, { "id": 2, "top": 1600.0 }],
                "viewport_height": 600.0
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "section_not_rendered");
    assert_eq!(json["message"], "section not rendered: section1");
}

#[tokio::test]
async fn test_delete_ends_session() {
    // Arrange
    let app = common::build_test_app(common::test_state(two_page_episode()));
    let session_id = common::create_session(&app).await;
    let base = format!("/api/v1/sessions/{session_id}");

    // Act
    let (status, _) = common::delete(app.clone(), &base).await;
    let (after_status, _) = common::get_json(app.clone(), &base).await;
    let (second_delete, _) = common::delete(app, &base).await;

    // Assert
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(after_status, StatusCode::NOT_FOUND);
    assert_eq!(second_delete, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_sessions_expire_after_idle_timeout() {
    // Arrange
    let state = common::test_state(two_page_episode());
    let hub = Arc::clone(&state.hub);
    let app = common::build_test_app(state);
    let kept = common::create_session(&app).await;
    for _ in 0..4 {
        common::create_session(&app).await;
    }
    assert_eq!(hub.len(), 5);

    // Act: only one client keeps scrolling past the 30 minute default.
    for _ in 0..4 {
        tokio::time::sleep(Duration::from_secs(10 * 60)).await;
        common::post_json(
            app.clone(),
            &format!("/api/v1/sessions/{kept}/scroll"),
            &serde_json::json!({ "scroll_top": 100.0 }),
        )
        .await;
    }
    let expired = hub.len();
    tokio::time::sleep(Duration::from_secs(31 * 60)).await;

    // Assert
    assert_eq!(expired, 1);
    assert!(hub.is_empty());
    let (status, json) = common::get_json(app, &format!("/api/v1/sessions/{kept}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "session_not_found");
}
