//! Per-session input routing.
//!
//! Every running session owns one unbounded input queue. The hub maps session
//! ids to the sending half; a [`Subscription`] guard removes the entry when
//! the session task ends, so a torn-down session can never be reached again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use storyscroll_core::error::ReaderError;
use storyscroll_core::layout::LayoutSnapshot;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;
use uuid::Uuid;

use crate::application::query_handlers::SessionView;
use crate::domain::commands::{ChangeBackground, PlayCurrentTrack};

/// Reply channel for inputs that answer with the resulting view.
pub type Reply = oneshot::Sender<Result<SessionView, ReaderError>>;

/// An input delivered to a running session, processed in arrival order.
#[derive(Debug)]
pub enum ReaderInput {
    /// The viewport scrolled.
    Scroll {
        /// New scroll offset.
        scroll_top: f64,
        /// Correlation id for resulting events.
        correlation_id: Uuid,
    },
    /// The viewport was resized and the layout re-measured.
    Resize {
        /// Fresh measurements.
        layout: LayoutSnapshot,
        /// Correlation id for resulting events.
        correlation_id: Uuid,
    },
    /// Crossfade to a named background.
    ChangeBackground {
        /// The command.
        command: ChangeBackground,
        /// Where to send the resulting view.
        reply: Reply,
    },
    /// Restart the cued track.
    PlayCurrentTrack {
        /// The command.
        command: PlayCurrentTrack,
        /// Where to send the resulting view.
        reply: Reply,
    },
    /// Read the current view.
    Query {
        /// Where to send the view.
        reply: Reply,
    },
    /// Stop the session, cancelling pending transitions.
    Shutdown {
        /// Where to send the final view.
        reply: Reply,
    },
}

/// Routes inputs to running sessions.
#[derive(Debug, Default)]
pub struct EventHub {
    listeners: Mutex<HashMap<Uuid, mpsc::UnboundedSender<ReaderInput>>>,
}

impl EventHub {
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers a session and returns its guard and input queue.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::Infrastructure` if the id is already registered.
    pub fn subscribe(
        self: &Arc<Self>,
        session_id: Uuid,
    ) -> Result<(Subscription, mpsc::UnboundedReceiver<ReaderInput>), ReaderError> {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        if listeners.contains_key(&session_id) {
            return Err(ReaderError::Infrastructure(format!(
                "session {session_id} already subscribed"
            )));
        }
        let (tx, rx) = mpsc::unbounded_channel();
        listeners.insert(session_id, tx);
        debug!(%session_id, "session subscribed");
        Ok((
            Subscription {
                hub: Arc::clone(self),
                session_id,
            },
            rx,
        ))
    }

    fn unsubscribe(&self, session_id: Uuid) {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        if listeners.remove(&session_id).is_some() {
            debug!(%session_id, "session unsubscribed");
        }
    }

    /// Queues `input` for the session.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::SessionNotFound` if the session is not running.
    pub fn dispatch(&self, session_id: Uuid, input: ReaderInput) -> Result<(), ReaderError> {
        let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let sender = listeners
            .get(&session_id)
            .ok_or(ReaderError::SessionNotFound(session_id))?;
        sender
            .send(input)
            .map_err(|_| ReaderError::SessionNotFound(session_id))
    }

    /// Queues an input built around a reply channel and awaits the answer.
    ///
    /// # Errors
    ///
    /// Returns `ReaderError::SessionNotFound` if the session is not running or
    /// ends before replying, or whatever error the session replied with.
    pub async fn request<F>(&self, session_id: Uuid, make: F) -> Result<SessionView, ReaderError>
    where
        F: FnOnce(Reply) -> ReaderInput,
    {
        let (reply, answer) = oneshot::channel();
        self.dispatch(session_id, make(reply))?;
        answer
            .await
            .map_err(|_| ReaderError::SessionNotFound(session_id))?
    }

    /// Whether a session is registered.
    #[must_use]
    pub fn is_subscribed(&self, session_id: Uuid) -> bool {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&session_id)
    }

    /// Number of running sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no session is running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a session registered with the hub for as long as it lives.
#[derive(Debug)]
pub struct Subscription {
    hub: Arc<EventHub>,
    session_id: Uuid,
}

impl Subscription {
    /// The registered session.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.session_id);
    }
}
