//! The reading session aggregate.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use storyscroll_content::application::query_handlers::fingerprint;
use storyscroll_content::domain::episode::Episode;
use storyscroll_content::domain::visuals::Visual;
use storyscroll_core::audio::{AudioPlayer, PlaybackId};
use storyscroll_core::clock::Clock;
use storyscroll_core::error::ReaderError;
use storyscroll_core::event::EventMetadata;
use storyscroll_core::ids::SectionId;
use storyscroll_core::layout::LayoutSource;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::config::ReaderConfig;
use super::crossfade::{BackgroundCrossfade, CrossfadeOutcome};
use super::events::{
    BackgroundCommitted, BackgroundFadeStarted, FilterChanged, GeometryRebuilt, PageHidden,
    PageRetargeted, PageSettled, PageShown, ReaderEvent, ReaderEventKind, SectionChanged,
    SoundCued, TextColorChanged, TrackCued, TrackStarted,
};
use super::geometry::PositionMapper;
use super::page_transition::{PageRequestOutcome, PageTick, PageTransition};
use super::state::ReaderState;

/// The aggregate root for one reading session.
///
/// Owns the geometry cache and all presentation state exclusively; nothing
/// is shared between sessions.
pub struct ReaderSession {
    /// Session identifier.
    pub id: Uuid,
    episode: Arc<Episode>,
    config: ReaderConfig,
    clock: Arc<dyn Clock>,
    audio: Box<dyn AudioPlayer>,
    mapper: PositionMapper,
    pages: PageTransition,
    background: BackgroundCrossfade,
    /// Name of the most recently requested background.
    background_name: String,
    text_color: String,
    filter: Option<Visual>,
    current_section: Option<SectionId>,
    current_track: Option<String>,
    playback: Option<PlaybackId>,
    sequence: i64,
    /// Uncommitted events pending presentation.
    uncommitted_events: Vec<ReaderEvent>,
}

impl fmt::Debug for ReaderSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderSession")
            .field("id", &self.id)
            .field("mapper", &self.mapper)
            .field("pages", &self.pages)
            .field("background", &self.background)
            .field("current_section", &self.current_section)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

impl ReaderSession {
    /// Starts a session on page one with the episode's defaults.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::UnresolvedName` if the default background,
    /// filter or text color does not resolve.
    pub fn start(
        id: Uuid,
        episode: Arc<Episode>,
        config: ReaderConfig,
        clock: Arc<dyn Clock>,
        audio: Box<dyn AudioPlayer>,
    ) -> Result<Self, ReaderError> {
        let default_bg = episode.resolve_visual(&episode.default_bg)?;
        let text_color = episode.resolve_color(&episode.default_text_color)?;
        let filter = episode
            .default_filter
            .as_deref()
            .map(|name| episode.resolve_visual(name))
            .transpose()?;

        info!(
            session_id = %id,
            episode = %episode.episode_title,
            fingerprint = %fingerprint(&episode),
            "reader session started"
        );

        Ok(Self {
            id,
            mapper: PositionMapper::new(&episode),
            pages: PageTransition::new(episode.first_page_id(), config.page_settle),
            background: BackgroundCrossfade::new(default_bg, config.background_fade),
            background_name: episode.default_bg.clone(),
            text_color,
            filter,
            current_section: None,
            current_track: None,
            playback: None,
            sequence: 0,
            uncommitted_events: Vec::new(),
            episode,
            config,
            clock,
            audio,
        })
    }

    /// The episode being read.
    #[must_use]
    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    /// Timing configuration this session was started with.
    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Current time according to the session clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Read-only access to the position mapper.
    #[must_use]
    pub fn mapper(&self) -> &PositionMapper {
        &self.mapper
    }

    fn record(&mut self, correlation_id: Uuid, kind: ReaderEventKind) {
        self.sequence += 1;
        let event = ReaderEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id: self.id,
                sequence_number: self.sequence,
                correlation_id,
                occurred_at: self.clock.now(),
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    /// Re-measures the layout (mount or resize), then re-evaluates the
    /// current section at the layout's scroll offset.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::SectionNotRendered` if a section is missing from
    /// the layout.
    pub fn rebuild_geometry(
        &mut self,
        layout: &dyn LayoutSource,
        correlation_id: Uuid,
    ) -> Result<(), ReaderError> {
        self.mapper.rebuild_geometry(layout)?;
        self.record(
            correlation_id,
            ReaderEventKind::GeometryRebuilt(GeometryRebuilt {
                section_count: self.mapper.len(),
                threshold: self.mapper.threshold(),
            }),
        );
        self.evaluate(layout.scroll_top(), correlation_id)
    }

    /// Handles a scroll event.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::UnresolvedName` if a section cue fails to
    /// resolve.
    pub fn on_scroll(
        &mut self,
        layout: &dyn LayoutSource,
        correlation_id: Uuid,
    ) -> Result<(), ReaderError> {
        self.evaluate(layout.scroll_top(), correlation_id)
    }

    fn evaluate(&mut self, scroll_top: f64, correlation_id: Uuid) -> Result<(), ReaderError> {
        let Some(current) = self.mapper.current_section(scroll_top).copied() else {
            return Ok(());
        };

        if self.current_section != Some(current.section_id) {
            self.current_section = Some(current.section_id);
            debug!(section_id = %current.section_id, scroll_top, "current section changed");
            self.record(
                correlation_id,
                ReaderEventKind::SectionChanged(SectionChanged {
                    section_id: current.section_id,
                    page_id: current.page_id,
                }),
            );
            self.apply_section_cues(current.section_id, correlation_id)?;
        }

        let now = self.clock.now();
        match self.pages.request(current.page_id, now) {
            PageRequestOutcome::Unchanged => {}
            PageRequestOutcome::Hidden { from, target } => {
                info!(session_id = %self.id, ?from, %target, "page hidden for transition");
                self.record(
                    correlation_id,
                    ReaderEventKind::PageHidden(PageHidden { from, target }),
                );
            }
            PageRequestOutcome::Retargeted { previous, target } => {
                debug!(%previous, %target, "pending page transition retargeted");
                self.record(
                    correlation_id,
                    ReaderEventKind::PageRetargeted(PageRetargeted { previous, target }),
                );
            }
        }
        Ok(())
    }

    fn apply_section_cues(
        &mut self,
        section_id: SectionId,
        correlation_id: Uuid,
    ) -> Result<(), ReaderError> {
        let episode = Arc::clone(&self.episode);
        let Some(section) = episode.section(section_id) else {
            return Ok(());
        };

        if let Some(bg) = section.bg.as_deref() {
            if bg != self.background_name {
                self.start_crossfade(bg, correlation_id)?;
            }
        }

        if let Some(name) = section.color.as_deref() {
            let color = episode.resolve_color(name)?;
            if color != self.text_color {
                self.text_color.clone_from(&color);
                self.record(
                    correlation_id,
                    ReaderEventKind::TextColorChanged(TextColorChanged { color }),
                );
            }
        }

        if let Some(name) = section.filter.as_deref() {
            let filter = episode.resolve_visual(name)?;
            if self.filter.as_ref() != Some(&filter) {
                self.filter = Some(filter.clone());
                self.record(
                    correlation_id,
                    ReaderEventKind::FilterChanged(FilterChanged { filter }),
                );
            }
        }

        if let Some(name) = section.music.as_deref() {
            let track = episode.resolve_audio(name)?;
            if self.current_track.as_ref() != Some(&track) {
                self.current_track = Some(track.clone());
                self.record(correlation_id, ReaderEventKind::TrackCued(TrackCued { track }));
            }
        }

        // One-shot: cued on every entry, never retained as state.
        if let Some(name) = section.sound.as_deref() {
            let sound = episode.resolve_audio(name)?;
            debug!(section_id = %section_id, %sound, "sound cued");
            self.record(
                correlation_id,
                ReaderEventKind::SoundCued(SoundCued {
                    name: name.to_owned(),
                    sound,
                }),
            );
        }

        Ok(())
    }

    /// Crossfades to the named background.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::UnresolvedName` if `name` is in neither the
    /// color nor the image table.
    pub fn change_background(&mut self, name: &str, correlation_id: Uuid) -> Result<(), ReaderError> {
        self.start_crossfade(name, correlation_id)
    }

    fn start_crossfade(&mut self, name: &str, correlation_id: Uuid) -> Result<(), ReaderError> {
        let visual = self.episode.resolve_visual(name)?;
        let now = self.clock.now();
        let outcome = self.background.request(visual.clone(), now);
        let superseded = matches!(outcome, CrossfadeOutcome::Superseded { .. });
        if let CrossfadeOutcome::Superseded { previous } = &outcome {
            debug!(previous = previous.token(), next = visual.token(), "background fade superseded");
        }
        self.background_name = name.to_owned();
        self.record(
            correlation_id,
            ReaderEventKind::BackgroundFadeStarted(BackgroundFadeStarted {
                name: name.to_owned(),
                visual,
                superseded,
            }),
        );
        Ok(())
    }

    /// Restarts playback of the cued track, stopping any previous handle.
    /// Does nothing (beyond a warning) when no section has cued a track.
    pub fn play_current_track(&mut self, correlation_id: Uuid) {
        let Some(track) = self.current_track.clone() else {
            warn!(session_id = %self.id, "play requested with no track cued");
            return;
        };
        if let Some(previous) = self.playback.take() {
            self.audio.stop(previous);
        }
        let playback = self.audio.play(&track);
        self.playback = Some(playback);
        info!(session_id = %self.id, %track, "track started");
        self.record(
            correlation_id,
            ReaderEventKind::TrackStarted(TrackStarted { track, playback }),
        );
    }

    /// Fires any transition whose deadline has passed.
    pub fn tick(&mut self, correlation_id: Uuid) {
        let now = self.clock.now();
        match self.pages.tick(now) {
            Some(PageTick::Revealed(page_id)) => {
                info!(session_id = %self.id, %page_id, "page shown");
                self.record(correlation_id, ReaderEventKind::PageShown(PageShown { page_id }));
            }
            Some(PageTick::Settled(page_id)) => {
                self.record(correlation_id, ReaderEventKind::PageSettled(PageSettled { page_id }));
            }
            None => {}
        }
        if let Some(visual) = self.background.tick(now) {
            debug!(background = visual.token(), "background committed");
            self.record(
                correlation_id,
                ReaderEventKind::BackgroundCommitted(BackgroundCommitted { visual }),
            );
        }
    }

    /// Earliest pending transition deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        match (self.pages.deadline(), self.background.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Time left until the earliest pending deadline, zero if it has passed.
    #[must_use]
    pub fn time_to_next_deadline(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| self.clock.remaining_until(deadline))
    }

    /// Snapshot of the presentation state.
    #[must_use]
    pub fn state(&self) -> ReaderState {
        ReaderState {
            current_page: self.pages.current_page(),
            page_visible: self.pages.is_visible(),
            phase: self.pages.phase_name(),
            current_section: self.current_section,
            lower_background: self.background.lower().clone(),
            upper_background: self.background.upper().clone(),
            upper_entering: self.background.is_entering(),
            text_color: self.text_color.clone(),
            filter: self.filter.clone(),
            current_track: self.current_track.clone(),
            next_deadline: self.next_deadline(),
        }
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[ReaderEvent] {
        &self.uncommitted_events
    }

    /// Drains the recorded events.
    pub fn take_events(&mut self) -> Vec<ReaderEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
