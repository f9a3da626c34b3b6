//! Shared test fakes and fixtures for the Storyscroll reader engine.

mod audio;
mod clock;
mod fixtures;

pub use audio::{AudioCall, RecordingAudioPlayer};
pub use clock::ManualClock;
pub use fixtures::{cued_episode, empty_episode, stacked_layout, two_page_episode, two_page_layout};
