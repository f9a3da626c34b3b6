//! The presentation collaborator.
//!
//! A presenter receives the full reader state plus the events that produced
//! it after every processed input. It reads state and never writes back.

use storyscroll_core::event::DomainEvent;
use tracing::{debug, info};

use crate::domain::events::ReaderEvent;
use crate::domain::state::ReaderState;

/// Receives state after every change.
pub trait Presenter: Send {
    /// Renders `state`. `events` are the changes since the last call.
    fn present(&mut self, state: &ReaderState, events: &[ReaderEvent]);
}

/// Presenter that writes each event and the resulting state to the tracing
/// pipeline.
#[derive(Debug, Default)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn present(&mut self, state: &ReaderState, events: &[ReaderEvent]) {
        for event in events {
            let meta = event.metadata();
            info!(
                session_id = %meta.session_id,
                event_type = event.event_type(),
                sequence = meta.sequence_number,
                payload = %event.to_payload(),
                "reader event"
            );
        }
        debug!(
            page = ?state.current_page,
            visible = state.page_visible,
            section = ?state.current_section,
            "reader state presented"
        );
    }
}
