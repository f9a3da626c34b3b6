//! The static episode aggregate: pages of sections plus lookup tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use storyscroll_core::ids::{PageId, SectionId};

/// Treats an empty string the same as a missing cue.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|name| !name.is_empty()))
}

/// Smallest scroll-tracked unit of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: SectionId,
    /// Ordered text lines. An empty line renders as a blank paragraph.
    #[serde(default)]
    pub paragraphs: Vec<String>,
    /// Background cue (color or image name).
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    /// Music cue (audio name).
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,
    /// One-shot sound cue (audio name).
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// Overlay filter cue (color or image name).
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Inline illustration (color or image name).
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Text color cue (color name).
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Section {
    /// Creates a section with text and no cues.
    #[must_use]
    pub fn new(id: SectionId, paragraphs: Vec<String>) -> Self {
        Self {
            id,
            paragraphs,
            bg: None,
            music: None,
            sound: None,
            filter: None,
            image: None,
            color: None,
        }
    }
}

/// A group of sections sharing one show/hide transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Unique page identifier; the transition key.
    pub id: PageId,
    /// Sections in display order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Root content aggregate, supplied whole at session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Series title.
    #[serde(default)]
    pub series_title: String,
    /// Episode title.
    #[serde(default)]
    pub episode_title: String,
    /// Author credit.
    #[serde(default)]
    pub creator: String,
    /// Pages in top-to-bottom layout order.
    #[serde(default)]
    pub pages: Vec<Page>,
    /// Audio name -> track token.
    #[serde(default)]
    pub audio_mapping: BTreeMap<String, String>,
    /// Image name -> image token.
    #[serde(default)]
    pub image_mapping: BTreeMap<String, String>,
    /// Color name -> color token.
    #[serde(default)]
    pub color_mapping: BTreeMap<String, String>,
    /// Background shown before any cue or request.
    pub default_bg: String,
    /// Filter overlay shown before any cue.
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub default_filter: Option<String>,
    /// Text color shown before any cue.
    pub default_text_color: String,
}

/// A section together with its position in the flattened document.
#[derive(Debug, Clone, Copy)]
pub struct SequencedSection<'a> {
    /// The section itself.
    pub section: &'a Section,
    /// The page that owns it.
    pub page_id: PageId,
    /// Ordinal index within the full section sequence.
    pub index: usize,
}

impl Episode {
    /// All sections in document order, tagged with owning page and index.
    pub fn section_sequence(&self) -> impl Iterator<Item = SequencedSection<'_>> {
        self.pages
            .iter()
            .flat_map(|page| page.sections.iter().map(move |s| (page.id, s)))
            .enumerate()
            .map(|(index, (page_id, section))| SequencedSection {
                section,
                page_id,
                index,
            })
    }

    /// Looks up a section by id.
    #[must_use]
    pub fn section(&self, section_id: SectionId) -> Option<&Section> {
        self.pages
            .iter()
            .flat_map(|page| page.sections.iter())
            .find(|s| s.id == section_id)
    }

    /// Total number of sections across all pages.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.pages.iter().map(|p| p.sections.len()).sum()
    }

    /// The page shown when a session starts.
    #[must_use]
    pub fn first_page_id(&self) -> Option<PageId> {
        self.pages.first().map(|p| p.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode_json() -> serde_json::Value {
        serde_json::json!({
            "seriesTitle": "Harbor Lights",
            "episodeTitle": "Low Tide",
            "creator": "M. Ito",
            "pages": [
                { "id": 0, "sections": [
                    { "id": 10, "paragraphs": ["first", ""], "bg": "pink", "music": "" },
                    { "id": 11, "paragraphs": ["second"] }
                ]},
                { "id": 1, "sections": [
                    { "id": 12, "paragraphs": ["third"], "color": "white" }
                ]}
            ],
            "audioMapping": {},
            "imageMapping": {},
            "colorMapping": { "pink": "#f9c", "white": "#fff" },
            "defaultBg": "pink",
            "defaultFilter": "",
            "defaultTextColor": "white"
        })
    }

    #[test]
    fn test_deserialize_treats_empty_cues_as_absent() {
        // Act
        let episode: Episode = serde_json::from_value(episode_json()).unwrap();

        // Assert
        let first = &episode.pages[0].sections[0];
        assert_eq!(first.bg.as_deref(), Some("pink"));
        assert_eq!(first.music, None);
        assert_eq!(first.paragraphs, vec!["first".to_owned(), String::new()]);
        assert_eq!(episode.default_filter, None);
        assert_eq!(episode.episode_title, "Low Tide");
    }

    #[test]
    fn test_section_sequence_flattens_pages_in_order() {
        // Arrange
        let episode: Episode = serde_json::from_value(episode_json()).unwrap();

        // Act
        let sequence: Vec<(SectionId, PageId, usize)> = episode
            .section_sequence()
            .map(|s| (s.section.id, s.page_id, s.index))
            .collect();

        // Assert
        assert_eq!(
            sequence,
            vec![
                (SectionId(10), PageId(0), 0),
                (SectionId(11), PageId(0), 1),
                (SectionId(12), PageId(1), 2),
            ]
        );
        assert_eq!(episode.section_count(), 3);
        assert_eq!(episode.first_page_id(), Some(PageId(0)));
        assert_eq!(
            episode.section(SectionId(12)).and_then(|s| s.color.as_deref()),
            Some("white")
        );
    }
}
