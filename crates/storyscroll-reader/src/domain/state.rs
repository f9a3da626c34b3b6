//! Reader State: everything the presentation layer renders.

use chrono::{DateTime, Utc};
use serde::Serialize;
use storyscroll_content::domain::visuals::Visual;
use storyscroll_core::ids::{PageId, SectionId};

/// Snapshot of a session's presentation state.
///
/// The presentation collaborator only ever reads this; nothing rendered is
/// read back into the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReaderState {
    /// Recorded current page. Lags the scroll position while a hide settles.
    pub current_page: Option<PageId>,
    /// Whether page content may render.
    pub page_visible: bool,
    /// Page transition phase (`idle`, `hiding`, `showing`).
    pub phase: &'static str,
    /// Section last selected by the position mapper.
    pub current_section: Option<SectionId>,
    /// Settled background layer.
    pub lower_background: Visual,
    /// Incoming background layer.
    pub upper_background: Visual,
    /// Whether the upper layer is fading in.
    pub upper_entering: bool,
    /// Resolved text color.
    pub text_color: String,
    /// Resolved overlay filter.
    pub filter: Option<Visual>,
    /// Resolved track cued by the current section.
    pub current_track: Option<String>,
    /// Earliest pending transition deadline.
    pub next_deadline: Option<DateTime<Utc>>,
}
