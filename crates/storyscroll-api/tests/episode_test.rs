//! Integration tests for the episode summary.

mod common;

use axum::http::StatusCode;
use storyscroll_content::application::query_handlers::fingerprint;
use storyscroll_test_support::{cued_episode, two_page_episode};

#[tokio::test]
async fn test_episode_summary_matches_loaded_episode() {
    let episode = two_page_episode();
    let expected = fingerprint(&episode);
    let app = common::build_test_app(common::test_state(episode));

    let (status, json) = common::get_json(app, "/api/v1/episode").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["series_title"], "Harbor Lights");
    assert_eq!(json["creator"], "M. Ito");
    assert_eq!(json["fingerprint"], expected);
}

#[tokio::test]
async fn test_fingerprint_changes_with_content() {
    let plain = common::build_test_app(common::test_state(two_page_episode()));
    let cued = common::build_test_app(common::test_state(cued_episode()));

    let (_, plain_json) = common::get_json(plain, "/api/v1/episode").await;
    let (_, cued_json) = common::get_json(cued, "/api/v1/episode").await;

    assert_ne!(plain_json["fingerprint"], cued_json["fingerprint"]);
}
