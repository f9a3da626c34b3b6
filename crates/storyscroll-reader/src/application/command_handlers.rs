//! Command handlers for the Reader context.
//!
//! Each handler first fires any transition whose deadline has already
//! passed, so inputs are always evaluated against settled state, then
//! applies the input and drains the resulting events.

use storyscroll_core::error::ReaderError;
use storyscroll_core::layout::LayoutSnapshot;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::commands::{ChangeBackground, PlayCurrentTrack};
use crate::domain::events::ReaderEvent;
use crate::domain::session::ReaderSession;

/// Handles a scroll event against the last measured layout.
///
/// # Errors
///
/// Returns `ReaderError::UnresolvedName` if a section cue fails to resolve.
#[instrument(skip(session, layout), fields(session_id = %session.id, scroll_top = layout.scroll_top))]
pub fn handle_scroll(
    session: &mut ReaderSession,
    layout: &LayoutSnapshot,
    correlation_id: Uuid,
) -> Result<Vec<ReaderEvent>, ReaderError> {
    session.tick(correlation_id);
    session.on_scroll(layout, correlation_id)?;
    Ok(session.take_events())
}

/// Handles a resize (or the initial mount): rebuilds geometry, then
/// re-evaluates the current section.
///
/// # Errors
///
/// Returns `ReaderError::SectionNotRendered` if a section is missing from the
/// layout, or `ReaderError::UnresolvedName` if a section cue fails to resolve.
#[instrument(skip(session, layout), fields(session_id = %session.id))]
pub fn handle_resize(
    session: &mut ReaderSession,
    layout: &LayoutSnapshot,
    correlation_id: Uuid,
) -> Result<Vec<ReaderEvent>, ReaderError> {
    session.tick(correlation_id);
    session.rebuild_geometry(layout, correlation_id)?;
    Ok(session.take_events())
}

/// Fires due transitions.
#[instrument(level = "trace", skip(session), fields(session_id = %session.id))]
pub fn handle_tick(session: &mut ReaderSession, correlation_id: Uuid) -> Vec<ReaderEvent> {
    session.tick(correlation_id);
    session.take_events()
}

/// Handles the `ChangeBackground` command.
///
/// # Errors
///
/// Returns `ReaderError::UnresolvedName` if the name is in neither the color
/// nor the image table.
#[instrument(skip(session), fields(session_id = %session.id))]
pub fn handle_change_background(
    command: &ChangeBackground,
    session: &mut ReaderSession,
) -> Result<Vec<ReaderEvent>, ReaderError> {
    session.tick(command.correlation_id);
    session.change_background(&command.name, command.correlation_id)?;
    Ok(session.take_events())
}

/// Handles the `PlayCurrentTrack` command.
#[instrument(skip(session), fields(session_id = %session.id))]
pub fn handle_play_current_track(
    command: &PlayCurrentTrack,
    session: &mut ReaderSession,
) -> Vec<ReaderEvent> {
    session.tick(command.correlation_id);
    session.play_current_track(command.correlation_id);
    session.take_events()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storyscroll_core::event::DomainEvent;
    use storyscroll_test_support::{
        ManualClock, RecordingAudioPlayer, cued_episode, two_page_episode, two_page_layout,
    };
    use uuid::Uuid;

    use super::*;
    use crate::domain::config::ReaderConfig;

    fn session_with(episode: storyscroll_content::domain::episode::Episode) -> (ReaderSession, ManualClock) {
        let clock = ManualClock::fixed();
        let session = ReaderSession::start(
            Uuid::new_v4(),
            Arc::new(episode),
            ReaderConfig::default(),
            Arc::new(clock.clone()),
            Box::new(RecordingAudioPlayer::new()),
        )
        .unwrap();
        (session, clock)
    }

    #[test]
    fn test_handle_resize_returns_geometry_and_section_events() {
        // Arrange
        let (mut session, _clock) = session_with(two_page_episode());
        let correlation_id = Uuid::new_v4();

        // Act
        let events = handle_resize(&mut session, &two_page_layout(), correlation_id).unwrap();

        // Assert
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "reader.geometry_rebuilt");
        assert_eq!(events[1].event_type(), "reader.section_changed");
        assert!(session.uncommitted_events().is_empty());
    }

    #[test]
    fn test_handle_scroll_fires_due_reveal_before_evaluating() {
        // Arrange
        let (mut session, clock) = session_with(two_page_episode());
        let layout = two_page_layout();
        handle_resize(&mut session, &layout, Uuid::new_v4()).unwrap();
        handle_scroll(&mut session, &layout.scrolled_to(1350.0), Uuid::new_v4()).unwrap();
        clock.advance_ms(500);

        // Act
        let events =
            handle_scroll(&mut session, &layout.scrolled_to(1360.0), Uuid::new_v4()).unwrap();

        // Assert
        let types: Vec<&str> = events.iter().map(DomainEvent::event_type).collect();
        assert_eq!(types, vec!["reader.page_shown"]);
    }

    #[test]
    fn test_handle_tick_is_empty_without_deadlines() {
        let (mut session, _clock) = session_with(two_page_episode());

        let events = handle_tick(&mut session, Uuid::new_v4());

        assert!(events.is_empty());
    }

    #[test]
    fn test_handle_change_background_returns_fade_started() {
        // Arrange
        let (mut session, _clock) = session_with(two_page_episode());
        let command = ChangeBackground {
            correlation_id: Uuid::new_v4(),
            name: "harbor".to_owned(),
        };

        // Act
        let events = handle_change_background(&command, &mut session).unwrap();

        // Assert
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "reader.background_fade_started");
        assert_eq!(events[0].metadata().correlation_id, command.correlation_id);
    }

    #[test]
    fn test_handle_change_background_propagates_unresolved_name() {
        let (mut session, _clock) = session_with(two_page_episode());
        let command = ChangeBackground {
            correlation_id: Uuid::new_v4(),
            name: "nowhere".to_owned(),
        };

        let result = handle_change_background(&command, &mut session);

        assert!(matches!(result, Err(ReaderError::UnresolvedName { .. })));
    }

    #[test]
    fn test_handle_play_current_track_returns_track_started() {
        // Arrange
        let (mut session, _clock) = session_with(cued_episode());
        handle_resize(&mut session, &two_page_layout(), Uuid::new_v4()).unwrap();
        let command = PlayCurrentTrack {
            correlation_id: Uuid::new_v4(),
        };

        // Act
        let events = handle_play_current_track(&command, &mut session);

        // Assert
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "reader.track_started");
    }
}
