//! Page transition state machine.
//!
//! A page change hides the current page, waits a fixed settle delay, then
//! switches the page id and reveals it. Old and new page content are never
//! visible at the same time.
//!
//! Requests arriving while a hide is in flight are coalesced: only the target
//! moves, the reveal deadline stays where it was. A burst of page changes
//! therefore costs exactly one hide/show cycle and lands on the latest page.

use chrono::{DateTime, TimeDelta, Utc};
use storyscroll_core::ids::PageId;

/// Phase of the page transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTransitionState {
    /// Settled on a page (`None` only for an episode without pages).
    Idle(Option<PageId>),
    /// Page content suppressed while waiting for the settle delay.
    Hiding {
        /// The page still recorded as current.
        from: Option<PageId>,
        /// The page that will be revealed.
        target: PageId,
        /// When the reveal happens.
        reveal_at: DateTime<Utc>,
    },
    /// Just revealed. Settles to `Idle` on the first tick at or after
    /// `settle_at`, which is the reveal time itself.
    Showing {
        /// The revealed page.
        page: PageId,
        /// When the phase settles.
        settle_at: DateTime<Utc>,
    },
}

/// What a page request did to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequestOutcome {
    /// Already on (or heading to) the requested page.
    Unchanged,
    /// A new hide started.
    Hidden {
        /// Page being hidden.
        from: Option<PageId>,
        /// Page to reveal after the settle delay.
        target: PageId,
    },
    /// An in-flight hide now targets a different page.
    Retargeted {
        /// The superseded target.
        previous: PageId,
        /// The new target.
        target: PageId,
    },
}

/// What a tick did to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTick {
    /// The target page was revealed.
    Revealed(PageId),
    /// The revealed page returned to idle.
    Settled(PageId),
}

/// Hide/settle/show coordinator for the current page.
#[derive(Debug, Clone)]
pub struct PageTransition {
    state: PageTransitionState,
    settle: TimeDelta,
}

impl PageTransition {
    /// Starts idle on `initial`.
    #[must_use]
    pub fn new(initial: Option<PageId>, settle: TimeDelta) -> Self {
        Self {
            state: PageTransitionState::Idle(initial),
            settle,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn state(&self) -> PageTransitionState {
        self.state
    }

    /// The recorded current page. Unchanged while hiding.
    #[must_use]
    pub fn current_page(&self) -> Option<PageId> {
        match self.state {
            PageTransitionState::Idle(page) => page,
            PageTransitionState::Hiding { from, .. } => from,
            PageTransitionState::Showing { page, .. } => Some(page),
        }
    }

    /// Whether page content may render.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self.state, PageTransitionState::Hiding { .. })
    }

    /// Short phase name for views and logs.
    #[must_use]
    pub fn phase_name(&self) -> &'static str {
        match self.state {
            PageTransitionState::Idle(_) => "idle",
            PageTransitionState::Hiding { .. } => "hiding",
            PageTransitionState::Showing { .. } => "showing",
        }
    }

    /// Next time `tick` has work to do: the reveal while hiding, or the
    /// settle to `Idle` while showing.
    #[must_use]
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        match self.state {
            PageTransitionState::Hiding { reveal_at, .. } => Some(reveal_at),
            PageTransitionState::Showing { settle_at, .. } => Some(settle_at),
            PageTransitionState::Idle(_) => None,
        }
    }

    /// Requests that `page` become the current page.
    pub fn request(&mut self, page: PageId, now: DateTime<Utc>) -> PageRequestOutcome {
        match self.state {
            PageTransitionState::Idle(current) if current == Some(page) => {
                PageRequestOutcome::Unchanged
            }
            PageTransitionState::Showing { page: current, .. } if current == page => {
                PageRequestOutcome::Unchanged
            }
            PageTransitionState::Idle(_) | PageTransitionState::Showing { .. } => {
                let from = self.current_page();
                self.state = PageTransitionState::Hiding {
                    from,
                    target: page,
                    reveal_at: now + self.settle,
                };
                PageRequestOutcome::Hidden { from, target: page }
            }
            PageTransitionState::Hiding { target, .. } if target == page => {
                PageRequestOutcome::Unchanged
            }
            PageTransitionState::Hiding {
                from,
                target,
                reveal_at,
            } => {
                self.state = PageTransitionState::Hiding {
                    from,
                    target: page,
                    reveal_at,
                };
                PageRequestOutcome::Retargeted {
                    previous: target,
                    target: page,
                }
            }
        }
    }

    /// Advances time.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<PageTick> {
        match self.state {
            PageTransitionState::Showing { page, settle_at } if now >= settle_at => {
                self.state = PageTransitionState::Idle(Some(page));
                Some(PageTick::Settled(page))
            }
            PageTransitionState::Hiding {
                target, reveal_at, ..
            } if now >= reveal_at => {
                self.state = PageTransitionState::Showing {
                    page: target,
                    settle_at: now,
                };
                Some(PageTick::Revealed(target))
            }
            _ => None,
        }
    }
}
