//! Routes for reading sessions.
//!
//! A session is started and mounted by `POST /`, then driven by scroll,
//! resize and trigger requests. Scroll and resize are fire-and-forget; the
//! session processes inputs in arrival order, so a later read observes them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use storyscroll_core::layout::LayoutSnapshot;
use storyscroll_reader::application::driver::spawn_session;
use storyscroll_reader::application::presenter::TracingPresenter;
use storyscroll_reader::application::query_handlers::SessionView;
use storyscroll_reader::application::subscription::ReaderInput;
use storyscroll_reader::domain::commands::{ChangeBackground, PlayCurrentTrack};
use storyscroll_reader::domain::session::ReaderSession;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::audio::LoggingAudioPlayer;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Initial layout measurements.
    pub layout: LayoutSnapshot,
}

/// Request body for POST /{id}/scroll.
#[derive(Debug, Deserialize)]
pub struct ScrollRequest {
    /// New scroll offset.
    pub scroll_top: f64,
}

/// Request body for POST /{id}/background.
#[derive(Debug, Deserialize)]
pub struct BackgroundRequest {
    /// Symbolic background name.
    pub name: String,
}

/// Response body for accepted fire-and-forget inputs.
#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    /// Correlation id recorded on the resulting events.
    pub correlation_id: Uuid,
}

/// POST /
#[instrument(skip(state, request))]
async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let session_id = Uuid::new_v4();
    let session = ReaderSession::start(
        session_id,
        state.episode.clone(),
        state.reader_config,
        state.clock.clone(),
        Box::new(LoggingAudioPlayer::new(session_id)),
    )?;
    let spawned = spawn_session(
        session,
        request.layout,
        &state.hub,
        Box::new(TracingPresenter),
    )?;

    info!(%session_id, "session created");

    Ok((StatusCode::CREATED, Json(spawned.view)))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let view = state
        .hub
        .request(session_id, |reply| ReaderInput::Query { reply })
        .await?;
    Ok(Json(view))
}

/// POST /{id}/scroll
#[instrument(skip(state, request), fields(scroll_top = request.scroll_top))]
async fn scroll(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ScrollRequest>,
) -> Result<(StatusCode, Json<AcceptedResponse>), ApiError> {
    let correlation_id = Uuid::new_v4();
    state.hub.dispatch(
        session_id,
        ReaderInput::Scroll {
            scroll_top: request.scroll_top,
            correlation_id,
        },
    )?;
    Ok((StatusCode::ACCEPTED, Json(AcceptedResponse { correlation_id })))
}

/// POST /{id}/resize
#[instrument(skip(state, layout))]
async fn resize(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(layout): Json<LayoutSnapshot>,
) -> Result<(StatusCode, Json<AcceptedResponse>), ApiError> {
    let correlation_id = Uuid::new_v4();
    state.hub.dispatch(
        session_id,
        ReaderInput::Resize {
            layout,
            correlation_id,
        },
    )?;
    Ok((StatusCode::ACCEPTED, Json(AcceptedResponse { correlation_id })))
}

/// POST /{id}/background
#[instrument(skip(state, request), fields(name = %request.name))]
async fn change_background(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<BackgroundRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let command = ChangeBackground {
        correlation_id: Uuid::new_v4(),
        name: request.name,
    };

    info!(correlation_id = %command.correlation_id, "handling change_background command");

    let view = state
        .hub
        .request(session_id, |reply| ReaderInput::ChangeBackground { command, reply })
        .await?;
    Ok(Json(view))
}

/// POST /{id}/audio/play
#[instrument(skip(state))]
async fn play_current_track(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let command = PlayCurrentTrack {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling play_current_track command");

    let view = state
        .hub
        .request(session_id, |reply| ReaderInput::PlayCurrentTrack { command, reply })
        .await?;
    Ok(Json(view))
}

/// DELETE /{id}
#[instrument(skip(state))]
async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .hub
        .request(session_id, |reply| ReaderInput::Shutdown { reply })
        .await?;
    info!(%session_id, "session ended");
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for reading sessions.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/{id}", get(get_session).delete(end_session))
        .route("/{id}/scroll", post(scroll))
        .route("/{id}/resize", post(resize))
        .route("/{id}/background", post(change_background))
        .route("/{id}/audio/play", post(play_current_track))
}
