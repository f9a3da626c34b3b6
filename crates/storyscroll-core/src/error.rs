//! Domain error types.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::ids::SectionId;

/// The lookup table (or chain of tables) a symbolic name was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    /// The color table only (text and accent colors).
    Color,
    /// The color table, then the image table (backgrounds and filters).
    Visual,
    /// The audio table (music and sound cues).
    Audio,
}

impl fmt::Display for LookupTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => f.write_str("colorMapping"),
            Self::Visual => f.write_str("colorMapping nor imageMapping"),
            Self::Audio => f.write_str("audioMapping"),
        }
    }
}

/// Top-level reader error type.
///
/// None of these are retried: lookups and geometry are synchronous and
/// deterministic, so a failure would repeat.
#[derive(Debug, Clone, Error)]
pub enum ReaderError {
    /// A symbolic name is missing from its lookup table. Always fatal.
    #[error("{name} not found in {table}")]
    UnresolvedName {
        /// The name that failed to resolve.
        name: String,
        /// The table(s) searched.
        table: LookupTable,
    },

    /// The episode content is malformed (parse failure, duplicate ids).
    #[error("invalid episode: {0}")]
    InvalidEpisode(String),

    /// Geometry was requested before a section was present in the render tree.
    #[error("section not rendered: {0}")]
    SectionNotRendered(SectionId),

    /// No reading session is registered under this id.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// An infrastructure error (I/O, closed channels).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl ReaderError {
    /// Builds an `UnresolvedName` error.
    pub fn unresolved(name: impl Into<String>, table: LookupTable) -> Self {
        Self::UnresolvedName {
            name: name.into(),
            table,
        }
    }
}
