//! Audio collaborator abstraction.

use serde::{Deserialize, Serialize};

/// Opaque handle for one started playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaybackId(pub u64);

/// Playback backend. The reader never manages position or volume; it only
/// starts a resolved track and stops a previous handle.
pub trait AudioPlayer: Send {
    /// Starts playing `track` (a resolved audio token) and returns its handle.
    fn play(&mut self, track: &str) -> PlaybackId;

    /// Stops a playback previously returned by [`AudioPlayer::play`].
    fn stop(&mut self, playback: PlaybackId);
}
