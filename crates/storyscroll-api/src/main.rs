//! Storyscroll reader service entry point.

use std::error::Error;
use std::sync::Arc;

use storyscroll_api::build_router;
use storyscroll_api::config::ServerConfig;
use storyscroll_api::error::AppError;
use storyscroll_api::state::AppState;
use storyscroll_content::application::loader::load_episode;
use storyscroll_core::clock::MonotonicClock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Storyscroll reader service");

    // Read configuration from environment.
    let config = ServerConfig::from_env()?;
    let episode = load_episode(&config.episode_path).map_err(AppError::from)?;

    let app_state = AppState::new(
        Arc::new(episode),
        config.reader,
        Arc::new(MonotonicClock::new()),
    );

    let app = build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::from)?;

    axum::serve(listener, app).await.map_err(AppError::from)?;

    Ok(())
}
