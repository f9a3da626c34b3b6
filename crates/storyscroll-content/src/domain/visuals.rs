//! Name resolution against the episode's lookup tables.
//!
//! Every resolver is fatal on a miss. A wrong background or color is worse
//! than stopping, so there is no fallback value.

use serde::{Deserialize, Serialize};
use storyscroll_core::error::{LookupTable, ReaderError};

use super::episode::Episode;

/// A resolved background or overlay value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Visual {
    /// A color token from the color table.
    Color(String),
    /// An image token from the image table.
    Image(String),
}

impl Visual {
    /// The raw token, regardless of origin.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Color(token) | Self::Image(token) => token,
        }
    }
}

impl Episode {
    /// Resolves a text or accent color. Color table only.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::UnresolvedName` if `name` is not in the color table.
    pub fn resolve_color(&self, name: &str) -> Result<String, ReaderError> {
        self.color_mapping
            .get(name)
            .cloned()
            .ok_or_else(|| ReaderError::unresolved(name, LookupTable::Color))
    }

    /// Resolves a background or filter: color table first, then image table.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::UnresolvedName` if `name` is in neither table.
    pub fn resolve_visual(&self, name: &str) -> Result<Visual, ReaderError> {
        if let Some(color) = self.color_mapping.get(name) {
            return Ok(Visual::Color(color.clone()));
        }
        if let Some(image) = self.image_mapping.get(name) {
            return Ok(Visual::Image(image.clone()));
        }
        Err(ReaderError::unresolved(name, LookupTable::Visual))
    }

    /// Resolves a music or sound cue. Audio table only.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::UnresolvedName` if `name` is not in the audio table.
    pub fn resolve_audio(&self, name: &str) -> Result<String, ReaderError> {
        self.audio_mapping
            .get(name)
            .cloned()
            .ok_or_else(|| ReaderError::unresolved(name, LookupTable::Audio))
    }
}
