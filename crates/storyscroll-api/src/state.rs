//! Shared application state.

use std::sync::Arc;

use storyscroll_content::domain::episode::Episode;
use storyscroll_core::clock::Clock;
use storyscroll_reader::application::subscription::EventHub;
use storyscroll_reader::domain::config::ReaderConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The episode every session reads.
    pub episode: Arc<Episode>,
    /// Transition timing for new sessions.
    pub reader_config: ReaderConfig,
    /// Clock handed to each session.
    pub clock: Arc<dyn Clock>,
    /// Input routing for running sessions.
    pub hub: Arc<EventHub>,
}

impl AppState {
    /// Create new application state with an empty session hub.
    #[must_use]
    pub fn new(episode: Arc<Episode>, reader_config: ReaderConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            episode,
            reader_config,
            clock,
            hub: EventHub::new(),
        }
    }
}
