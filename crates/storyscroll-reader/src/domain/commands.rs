//! Commands for the Reader context.

use uuid::Uuid;

/// Command to crossfade to a named background.
#[derive(Debug, Clone)]
pub struct ChangeBackground {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Symbolic background name (color or image).
    pub name: String,
}

/// Command to (re)start the currently cued track.
#[derive(Debug, Clone)]
pub struct PlayCurrentTrack {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}
