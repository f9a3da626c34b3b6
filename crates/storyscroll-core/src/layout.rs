//! Layout collaborator abstraction.
//!
//! The reader treats layout as a set of synchronous queries answered by
//! whoever renders the document. [`LayoutSnapshot`] is the plain-data
//! implementation used when geometry arrives over the wire.

use serde::{Deserialize, Serialize};

use crate::ids::SectionId;

/// Synchronous geometry queries against the rendered document.
pub trait LayoutSource {
    /// Top edge of the scroll container, in the same coordinate space as
    /// [`LayoutSource::section_top`].
    fn container_top(&self) -> f64;

    /// Top edge of a section's rendered anchor, or `None` if the section is
    /// not (yet) in the render tree.
    fn section_top(&self, section_id: SectionId) -> Option<f64>;

    /// Current vertical scroll offset.
    fn scroll_top(&self) -> f64;

    /// Current viewport height.
    fn viewport_height(&self) -> f64;
}

/// One measured section anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredSection {
    /// The section the anchor belongs to.
    pub id: SectionId,
    /// Top edge of the anchor.
    pub top: f64,
}

/// A captured layout: container and section positions plus viewport state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Top edge of the scroll container.
    pub container_top: f64,
    /// Measured section anchors.
    pub sections: Vec<MeasuredSection>,
    /// Current vertical scroll offset.
    #[serde(default)]
    pub scroll_top: f64,
    /// Current viewport height.
    pub viewport_height: f64,
}

impl LayoutSnapshot {
    /// Returns a copy scrolled to `scroll_top`.
    #[must_use]
    pub fn scrolled_to(&self, scroll_top: f64) -> Self {
        Self {
            scroll_top,
            ..self.clone()
        }
    }
}

impl LayoutSource for LayoutSnapshot {
    fn container_top(&self) -> f64 {
        self.container_top
    }

    fn section_top(&self, section_id: SectionId) -> Option<f64> {
        self.sections
            .iter()
            .find(|s| s.id == section_id)
            .map(|s| s.top)
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}
