//! Test audio: an `AudioPlayer` that records every call.

use std::sync::{Arc, Mutex};

use storyscroll_core::audio::{AudioPlayer, PlaybackId};

/// One recorded call against the audio collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCall {
    /// `play(track)` returned this handle.
    Play(String, PlaybackId),
    /// `stop(handle)`.
    Stop(PlaybackId),
}

/// An audio player that hands out sequential handles and records calls.
/// Clones share the same log, so a test can keep one after moving the other
/// into a session.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudioPlayer {
    calls: Arc<Mutex<Vec<AudioCall>>>,
}

impl RecordingAudioPlayer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<AudioCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl AudioPlayer for RecordingAudioPlayer {
    fn play(&mut self, track: &str) -> PlaybackId {
        let mut calls = self.calls.lock().unwrap();
        let id = PlaybackId(calls.len() as u64 + 1);
        calls.push(AudioCall::Play(track.to_owned(), id));
        id
    }

    fn stop(&mut self, playback: PlaybackId) {
        self.calls.lock().unwrap().push(AudioCall::Stop(playback));
    }
}
