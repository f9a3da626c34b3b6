//! Query handlers for the Reader context.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::session::ReaderSession;
use crate::domain::state::ReaderState;

/// Read-only view of a reading session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Episode title, for display.
    pub episode_title: String,
    /// Presentation state at the time of the query.
    pub state: ReaderState,
}

/// Builds the view of a running session.
#[must_use]
pub fn view(session: &ReaderSession) -> SessionView {
    SessionView {
        session_id: session.id,
        episode_title: session.episode().episode_title.clone(),
        state: session.state(),
    }
}
