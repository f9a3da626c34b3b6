//! Domain events for the Reader context.

use serde::{Deserialize, Serialize};
use storyscroll_content::domain::visuals::Visual;
use storyscroll_core::audio::PlaybackId;
use storyscroll_core::event::{DomainEvent, EventMetadata};
use storyscroll_core::ids::{PageId, SectionId};

/// Emitted when the section geometry cache is rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryRebuilt {
    /// Number of sections measured.
    pub section_count: usize,
    /// New activation threshold.
    pub threshold: f64,
}

/// Emitted when a different section becomes current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionChanged {
    /// The new current section.
    pub section_id: SectionId,
    /// Its owning page.
    pub page_id: PageId,
}

/// Emitted when page content is hidden ahead of a page switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageHidden {
    /// The page being hidden.
    pub from: Option<PageId>,
    /// The page that will be revealed.
    pub target: PageId,
}

/// Emitted when an in-flight hide is redirected to a newer page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRetargeted {
    /// The superseded target.
    pub previous: PageId,
    /// The new target.
    pub target: PageId,
}

/// Emitted when the new page is revealed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageShown {
    /// The revealed page.
    pub page_id: PageId,
}

/// Emitted when a revealed page stops transitioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSettled {
    /// The page now at rest.
    pub page_id: PageId,
}

/// Emitted when a background fade begins on the upper layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundFadeStarted {
    /// Requested symbolic name.
    pub name: String,
    /// Resolved value.
    pub visual: Visual,
    /// Whether an earlier in-flight fade was dropped.
    pub superseded: bool,
}

/// Emitted when a fade completes and the lower layer takes the value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundCommitted {
    /// The committed value.
    pub visual: Visual,
}

/// Emitted when the text color changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextColorChanged {
    /// Resolved color token.
    pub color: String,
}

/// Emitted when the overlay filter changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterChanged {
    /// Resolved filter.
    pub filter: Visual,
}

/// Emitted when a section cues a different track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackCued {
    /// Resolved track token.
    pub track: String,
}

/// Emitted when a section with a one-shot sound becomes current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundCued {
    /// Symbolic sound name.
    pub name: String,
    /// Resolved sound token.
    pub sound: String,
}

/// Emitted when playback of the cued track starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackStarted {
    /// Resolved track token.
    pub track: String,
    /// Handle returned by the audio collaborator.
    pub playback: PlaybackId,
}

/// Event payload variants for the Reader context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReaderEventKind {
    /// The geometry cache was rebuilt.
    GeometryRebuilt(GeometryRebuilt),
    /// A different section became current.
    SectionChanged(SectionChanged),
    /// Page content was hidden.
    PageHidden(PageHidden),
    /// A pending page switch changed target.
    PageRetargeted(PageRetargeted),
    /// A page was revealed.
    PageShown(PageShown),
    /// A revealed page came to rest.
    PageSettled(PageSettled),
    /// A background fade started.
    BackgroundFadeStarted(BackgroundFadeStarted),
    /// A background fade was committed.
    BackgroundCommitted(BackgroundCommitted),
    /// The text color changed.
    TextColorChanged(TextColorChanged),
    /// The filter changed.
    FilterChanged(FilterChanged),
    /// A new track was cued.
    TrackCued(TrackCued),
    /// A one-shot sound was cued.
    SoundCued(SoundCued),
    /// Playback started.
    TrackStarted(TrackStarted),
}

impl ReaderEventKind {
    /// Routing name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::GeometryRebuilt(_) => "reader.geometry_rebuilt",
            Self::SectionChanged(_) => "reader.section_changed",
            Self::PageHidden(_) => "reader.page_hidden",
            Self::PageRetargeted(_) => "reader.page_retargeted",
            Self::PageShown(_) => "reader.page_shown",
            Self::PageSettled(_) => "reader.page_settled",
            Self::BackgroundFadeStarted(_) => "reader.background_fade_started",
            Self::BackgroundCommitted(_) => "reader.background_committed",
            Self::TextColorChanged(_) => "reader.text_color_changed",
            Self::FilterChanged(_) => "reader.filter_changed",
            Self::TrackCued(_) => "reader.track_cued",
            Self::SoundCued(_) => "reader.sound_cued",
            Self::TrackStarted(_) => "reader.track_started",
        }
    }
}

/// Domain event envelope for the Reader context.
#[derive(Debug, Clone)]
pub struct ReaderEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ReaderEventKind,
}

impl DomainEvent for ReaderEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("ReaderEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
