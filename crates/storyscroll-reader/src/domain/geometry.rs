//! Position mapping: section geometry cache and current-section selection.
//!
//! A section becomes current once the scroll offset reaches its activation
//! line, `offset - viewport_height / 2`. Selection is a step function with a
//! single threshold and no hysteresis.

use std::collections::HashMap;

use storyscroll_content::domain::episode::Episode;
use storyscroll_core::error::ReaderError;
use storyscroll_core::ids::{PageId, SectionId};
use storyscroll_core::layout::LayoutSource;
use tracing::debug;

/// Cached geometry for one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionGeometry {
    /// The section.
    pub section_id: SectionId,
    /// The page that owns it.
    pub page_id: PageId,
    /// Vertical offset from the scroll container's top edge.
    pub offset: f64,
    /// Ordinal index in the full section sequence.
    pub index: usize,
}

impl SectionGeometry {
    /// Scroll offset at which this section becomes current.
    #[must_use]
    pub fn activation_line(&self, threshold: f64) -> f64 {
        self.offset - threshold
    }
}

/// Section geometry cache plus activation threshold for one session.
#[derive(Debug, Clone)]
pub struct PositionMapper {
    entries: Vec<SectionGeometry>,
    by_id: HashMap<SectionId, usize>,
    threshold: f64,
}

impl PositionMapper {
    /// Creates an unmeasured mapper over the episode's section sequence.
    /// Every offset starts at zero until the first rebuild.
    #[must_use]
    pub fn new(episode: &Episode) -> Self {
        let entries: Vec<SectionGeometry> = episode
            .section_sequence()
            .map(|s| SectionGeometry {
                section_id: s.section.id,
                page_id: s.page_id,
                offset: 0.0,
                index: s.index,
            })
            .collect();
        let by_id = entries
            .iter()
            .map(|entry| (entry.section_id, entry.index))
            .collect();
        Self {
            entries,
            by_id,
            threshold: 0.0,
        }
    }

    /// Re-measures every section against the scroll container and recomputes
    /// the activation threshold as half the viewport height.
    ///
    /// Safe to call repeatedly; each call overwrites the whole cache.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::SectionNotRendered` if any section has no
    /// rendered anchor yet. The cache is left untouched in that case.
    pub fn rebuild_geometry(&mut self, layout: &dyn LayoutSource) -> Result<(), ReaderError> {
        let container_top = layout.container_top();
        let offsets = self
            .entries
            .iter()
            .map(|entry| {
                layout
                    .section_top(entry.section_id)
                    .map(|top| top - container_top)
                    .ok_or(ReaderError::SectionNotRendered(entry.section_id))
            })
            .collect::<Result<Vec<f64>, ReaderError>>()?;

        for (entry, offset) in self.entries.iter_mut().zip(offsets) {
            entry.offset = offset;
        }
        self.threshold = layout.viewport_height() / 2.0;

        debug!(
            sections = self.entries.len(),
            threshold = self.threshold,
            "section geometry rebuilt"
        );
        Ok(())
    }

    /// The activation threshold (half the viewport height at last rebuild).
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of sections tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the section sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached geometry for a section.
    #[must_use]
    pub fn geometry(&self, section_id: SectionId) -> Option<&SectionGeometry> {
        self.by_id.get(&section_id).map(|&index| &self.entries[index])
    }

    /// The section whose activation line is the largest one not beyond
    /// `scroll_top`.
    ///
    /// Before any activation line is reached the first section is current.
    /// Equal activation lines resolve to the lowest sequence index. Returns
    /// `None` only when there are no sections.
    #[must_use]
    pub fn current_section(&self, scroll_top: f64) -> Option<&SectionGeometry> {
        let mut best: Option<(&SectionGeometry, f64)> = None;
        for entry in &self.entries {
            let line = entry.activation_line(self.threshold);
            if line <= scroll_top && best.is_none_or(|(_, best_line)| line > best_line) {
                best = Some((entry, line));
            }
        }
        best.map(|(entry, _)| entry).or_else(|| self.entries.first())
    }

    /// Id-only form of [`PositionMapper::current_section`].
    #[must_use]
    pub fn current_section_id(&self, scroll_top: f64) -> Option<SectionId> {
        self.current_section(scroll_top).map(|entry| entry.section_id)
    }
}
