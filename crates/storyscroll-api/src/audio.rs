//! Audio collaborator for the headless service.
//!
//! The service has no speakers; playback requests are recorded in the log so
//! a front end (or an operator) can follow what would be playing.

use storyscroll_core::audio::{AudioPlayer, PlaybackId};
use tracing::info;
use uuid::Uuid;

/// Audio player that logs play/stop requests and hands out sequential ids.
#[derive(Debug)]
pub struct LoggingAudioPlayer {
    session_id: Uuid,
    next: u64,
}

impl LoggingAudioPlayer {
    /// Creates a player for one session.
    #[must_use]
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            next: 1,
        }
    }
}

impl AudioPlayer for LoggingAudioPlayer {
    fn play(&mut self, track: &str) -> PlaybackId {
        let playback = PlaybackId(self.next);
        self.next += 1;
        info!(session_id = %self.session_id, track, playback = playback.0, "audio play");
        playback
    }

    fn stop(&mut self, playback: PlaybackId) {
        info!(session_id = %self.session_id, playback = playback.0, "audio stop");
    }
}
