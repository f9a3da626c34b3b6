//! Query handlers for the Episode content context.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::episode::Episode;

/// Read-only summary of a loaded episode.
#[derive(Debug, Serialize)]
pub struct EpisodeSummary {
    /// Series title.
    pub series_title: String,
    /// Episode title.
    pub episode_title: String,
    /// Author credit.
    pub creator: String,
    /// Number of pages.
    pub page_count: usize,
    /// Number of sections across all pages.
    pub section_count: usize,
    /// Content fingerprint.
    pub fingerprint: String,
}

/// Hex SHA-256 of the episode's canonical JSON encoding.
///
/// Lookup tables are ordered maps, so equal episodes hash equally.
#[must_use]
pub fn fingerprint(episode: &Episode) -> String {
    // Serialization of derived Serialize types with string keys is infallible.
    let canonical = serde_json::to_vec(episode).expect("Episode serialization is infallible");
    format!("{:x}", Sha256::digest(&canonical))
}

/// Builds the summary view for an episode.
#[must_use]
pub fn summarize(episode: &Episode) -> EpisodeSummary {
    EpisodeSummary {
        series_title: episode.series_title.clone(),
        episode_title: episode.episode_title.clone(),
        creator: episode.creator.clone(),
        page_count: episode.pages.len(),
        section_count: episode.section_count(),
        fingerprint: fingerprint(episode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::loader::{EpisodeFormat, parse_episode};

    const EPISODE: &str = r##"{
        "episodeTitle": "Low Tide",
        "pages": [{ "id": 0, "sections": [{ "id": 0, "paragraphs": ["hi"] }] }],
        "colorMapping": { "white": "#fff" },
        "defaultBg": "white",
        "defaultTextColor": "white"
    }"##;

    #[test]
    fn test_summarize_counts_pages_and_sections() {
        // Arrange
        let episode = parse_episode(EPISODE, EpisodeFormat::Json).unwrap();

        // Act
        let summary = summarize(&episode);

        // Assert
        assert_eq!(summary.episode_title, "Low Tide");
        assert_eq!(summary.page_count, 1);
        assert_eq!(summary.section_count, 1);
        assert_eq!(summary.fingerprint.len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let episode = parse_episode(EPISODE, EpisodeFormat::Json).unwrap();
        let mut edited = episode.clone();
        edited.pages[0].sections[0].paragraphs.push("more".to_owned());

        assert_eq!(fingerprint(&episode), fingerprint(&episode.clone()));
        assert_ne!(fingerprint(&episode), fingerprint(&edited));
    }
}
