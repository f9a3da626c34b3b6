//! Episode loading and validation.
//!
//! An episode is parsed, then every symbolic reference is checked against
//! the lookup tables before any session can start. A dangling name is a
//! configuration error, surfaced at load time rather than mid-read.

use std::collections::HashSet;
use std::path::Path;

use storyscroll_core::error::ReaderError;
use tracing::{debug, info, instrument};

use crate::domain::episode::Episode;

/// Serialization format of an episode source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeFormat {
    /// JSON, the native content format.
    Json,
    /// YAML, for hand-authored episodes.
    Yaml,
}

impl EpisodeFormat {
    /// Infers the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::InvalidEpisode` for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self, ReaderError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            other => Err(ReaderError::InvalidEpisode(format!(
                "unsupported episode file extension: {other:?}"
            ))),
        }
    }
}

/// Parses and validates an episode from source text.
///
/// # Errors
///
/// Returns `ReaderError::InvalidEpisode` if parsing fails or ids collide, and
/// `ReaderError::UnresolvedName` for the first dangling reference.
pub fn parse_episode(source: &str, format: EpisodeFormat) -> Result<Episode, ReaderError> {
    let episode: Episode = match format {
        EpisodeFormat::Json => serde_json::from_str(source)
            .map_err(|e| ReaderError::InvalidEpisode(format!("episode JSON parse failed: {e}")))?,
        EpisodeFormat::Yaml => serde_yaml::from_str(source)
            .map_err(|e| ReaderError::InvalidEpisode(format!("episode YAML parse failed: {e}")))?,
    };
    validate_episode(&episode)?;
    Ok(episode)
}

/// Reads, parses and validates an episode file.
///
/// # Errors
///
/// Returns `ReaderError::Infrastructure` if the file cannot be read, plus any
/// error from [`parse_episode`].
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_episode(path: &Path) -> Result<Episode, ReaderError> {
    let format = EpisodeFormat::from_path(path)?;
    let source = std::fs::read_to_string(path)
        .map_err(|e| ReaderError::Infrastructure(format!("failed to read episode: {e}")))?;
    let episode = parse_episode(&source, format)?;
    info!(
        title = %episode.episode_title,
        pages = episode.pages.len(),
        sections = episode.section_count(),
        "episode loaded"
    );
    Ok(episode)
}

/// Checks id uniqueness and that every referenced name resolves.
///
/// # Errors
///
/// Returns `ReaderError::InvalidEpisode` on duplicate page or section ids, and
/// `ReaderError::UnresolvedName` for the first reference that does not resolve.
pub fn validate_episode(episode: &Episode) -> Result<(), ReaderError> {
    let mut page_ids = HashSet::new();
    for page in &episode.pages {
        if !page_ids.insert(page.id) {
            return Err(ReaderError::InvalidEpisode(format!(
                "duplicate page id {}",
                page.id.0
            )));
        }
    }

    let mut section_ids = HashSet::new();
    for sequenced in episode.section_sequence() {
        let section = sequenced.section;
        if !section_ids.insert(section.id) {
            return Err(ReaderError::InvalidEpisode(format!(
                "duplicate section id {}",
                section.id.0
            )));
        }
        for name in [&section.bg, &section.filter, &section.image]
            .into_iter()
            .flatten()
        {
            episode.resolve_visual(name)?;
        }
        if let Some(color) = &section.color {
            episode.resolve_color(color)?;
        }
        for name in [&section.music, &section.sound].into_iter().flatten() {
            episode.resolve_audio(name)?;
        }
    }

    episode.resolve_visual(&episode.default_bg)?;
    if let Some(filter) = &episode.default_filter {
        episode.resolve_visual(filter)?;
    }
    episode.resolve_color(&episode.default_text_color)?;

    debug!(sections = section_ids.len(), "episode references validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use storyscroll_core::error::LookupTable;

    use super::*;

    const YAML_EPISODE: &str = r##"
seriesTitle: Harbor Lights
episodeTitle: Low Tide
creator: M. Ito
pages:
  - id: 0
    sections:
      - id: 0
        paragraphs: ["The tide went out."]
        bg: pink
        music: dance
      - id: 1
        paragraphs: ["", "Nobody noticed."]
  - id: 1
    sections:
      - id: 2
        paragraphs: ["Then the boats came back."]
        bg: harbor
        color: black
audioMapping:
  dance: https://example.com/lets_dance.mp3
imageMapping:
  harbor: harbor.jpg
colorMapping:
  pink: "#ffc0cb"
  black: "#000000"
  white: "#ffffff"
defaultBg: pink
defaultTextColor: white
"##;

    #[test]
    fn test_parse_yaml_episode() {
        // Act
        let episode = parse_episode(YAML_EPISODE, EpisodeFormat::Yaml).unwrap();

        // Assert
        assert_eq!(episode.pages.len(), 2);
        assert_eq!(episode.section_count(), 3);
        assert_eq!(episode.creator, "M. Ito");
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_episode("{ not json", EpisodeFormat::Json).unwrap_err();
        assert!(matches!(err, ReaderError::InvalidEpisode(_)));
    }

    #[test]
    fn test_validate_rejects_duplicate_section_ids() {
        // Arrange
        let mut episode = parse_episode(YAML_EPISODE, EpisodeFormat::Yaml).unwrap();
        episode.pages[1].sections[0].id = episode.pages[0].sections[0].id;

        // Act
        let err = validate_episode(&episode).unwrap_err();

        // Assert
        match err {
            ReaderError::InvalidEpisode(message) => {
                assert_eq!(message, "duplicate section id 0");
            }
            other => panic!("expected InvalidEpisode, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_duplicate_page_ids() {
        let mut episode = parse_episode(YAML_EPISODE, EpisodeFormat::Yaml).unwrap();
        episode.pages[1].id = episode.pages[0].id;

        let err = validate_episode(&episode).unwrap_err();

        assert!(matches!(err, ReaderError::InvalidEpisode(_)));
    }

    #[test]
    fn test_validate_rejects_unresolved_section_music() {
        // Arrange
        let mut episode = parse_episode(YAML_EPISODE, EpisodeFormat::Yaml).unwrap();
        episode.pages[0].sections[1].music = Some("waltz".to_owned());

        // Act
        let err = validate_episode(&episode).unwrap_err();

        // Assert
        match err {
            ReaderError::UnresolvedName { name, table } => {
                assert_eq!(name, "waltz");
                assert_eq!(table, LookupTable::Audio);
            }
            other => panic!("expected UnresolvedName, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_text_color_found_only_in_image_table() {
        let mut episode = parse_episode(YAML_EPISODE, EpisodeFormat::Yaml).unwrap();
        episode.default_text_color = "harbor".to_owned();

        let err = validate_episode(&episode).unwrap_err();

        assert!(matches!(
            err,
            ReaderError::UnresolvedName {
                table: LookupTable::Color,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_unresolved_default_filter() {
        let mut episode = parse_episode(YAML_EPISODE, EpisodeFormat::Yaml).unwrap();
        episode.default_filter = Some("sepia".to_owned());

        let err = validate_episode(&episode).unwrap_err();

        assert_eq!(err.to_string(), "sepia not found in colorMapping nor imageMapping");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            EpisodeFormat::from_path(&PathBuf::from("ep1.yml")).unwrap(),
            EpisodeFormat::Yaml
        );
        assert_eq!(
            EpisodeFormat::from_path(&PathBuf::from("ep1.json")).unwrap(),
            EpisodeFormat::Json
        );
        assert!(EpisodeFormat::from_path(&PathBuf::from("ep1.toml")).is_err());
    }

    #[test]
    fn test_load_episode_reports_missing_file() {
        let err = load_episode(Path::new("/nonexistent/episode.json")).unwrap_err();
        assert!(matches!(err, ReaderError::Infrastructure(_)));
    }
}
