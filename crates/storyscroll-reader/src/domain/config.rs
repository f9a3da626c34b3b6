//! Session timing configuration.

use chrono::TimeDelta;

/// Delay between hiding the old page and revealing the new one.
pub const PAGE_SETTLE_MS: i64 = 400;

/// Duration of a background crossfade before it is committed.
pub const BACKGROUND_FADE_MS: i64 = 2000;

/// How long a session may go without input before its task ends.
pub const SESSION_IDLE_MS: i64 = 30 * 60 * 1000;

/// Fixed delays used by one reading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Hide-to-show settle delay for page transitions.
    pub page_settle: TimeDelta,
    /// Fade-to-commit duration for background crossfades.
    pub background_fade: TimeDelta,
    /// Input-free interval after which a running session is dropped.
    pub session_idle: TimeDelta,
}

impl ReaderConfig {
    /// Builds a config from millisecond values.
    #[must_use]
    pub fn from_millis(page_settle_ms: i64, background_fade_ms: i64) -> Self {
        Self {
            page_settle: TimeDelta::milliseconds(page_settle_ms),
            background_fade: TimeDelta::milliseconds(background_fade_ms),
            session_idle: TimeDelta::milliseconds(SESSION_IDLE_MS),
        }
    }

    /// Replaces the idle timeout.
    #[must_use]
    pub fn with_session_idle_ms(self, session_idle_ms: i64) -> Self {
        Self {
            session_idle: TimeDelta::milliseconds(session_idle_ms),
            ..self
        }
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::from_millis(PAGE_SETTLE_MS, BACKGROUND_FADE_MS)
    }
}
