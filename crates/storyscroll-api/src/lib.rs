//! Storyscroll: HTTP service library.
//!
//! Exposes the router and state so integration tests can drive the same
//! application the binary serves.

use axum::Router;

pub mod audio;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

/// Builds the full application router. Middleware layers are added by the
/// binary.
pub fn build_router(app_state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/episode", routes::episode::router())
        .nest("/api/v1/sessions", routes::sessions::router())
        .with_state(app_state)
}
