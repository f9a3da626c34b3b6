//! Two-layer background crossfade.
//!
//! The lower layer always holds a settled background. A change is staged on
//! the upper layer, which fades in over a fixed duration and is then
//! committed into the lower layer and reset, so the next fade starts clean.

use chrono::{DateTime, TimeDelta, Utc};
use storyscroll_content::domain::visuals::Visual;

/// What a background request did to the crossfade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossfadeOutcome {
    /// A fade started from a settled state.
    Started,
    /// An in-flight fade was replaced before it committed.
    Superseded {
        /// The value that will now never be committed.
        previous: Visual,
    },
}

/// Lower/upper background layers with a timed commit.
#[derive(Debug, Clone)]
pub struct BackgroundCrossfade {
    lower: Visual,
    upper: Visual,
    entering: bool,
    commit_at: Option<DateTime<Utc>>,
    fade: TimeDelta,
}

impl BackgroundCrossfade {
    /// Both layers start on `initial`, upper layer hidden.
    #[must_use]
    pub fn new(initial: Visual, fade: TimeDelta) -> Self {
        Self {
            lower: initial.clone(),
            upper: initial,
            entering: false,
            commit_at: None,
            fade,
        }
    }

    /// The settled background.
    #[must_use]
    pub fn lower(&self) -> &Visual {
        &self.lower
    }

    /// The incoming background.
    #[must_use]
    pub fn upper(&self) -> &Visual {
        &self.upper
    }

    /// Whether the upper layer is fading in.
    #[must_use]
    pub fn is_entering(&self) -> bool {
        self.entering
    }

    /// Pending commit deadline, if fading.
    #[must_use]
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.commit_at
    }

    /// Stages `visual` on the upper layer and (re)starts the fade timer.
    pub fn request(&mut self, visual: Visual, now: DateTime<Utc>) -> CrossfadeOutcome {
        let outcome = if self.entering {
            CrossfadeOutcome::Superseded {
                previous: std::mem::replace(&mut self.upper, visual),
            }
        } else {
            self.upper = visual;
            CrossfadeOutcome::Started
        };
        self.entering = true;
        self.commit_at = Some(now + self.fade);
        outcome
    }

    /// Advances time. Returns the committed value once the fade completes.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Visual> {
        match self.commit_at {
            Some(commit_at) if now >= commit_at => {
                self.lower = self.upper.clone();
                self.entering = false;
                self.commit_at = None;
                Some(self.lower.clone())
            }
            _ => None,
        }
    }
}
