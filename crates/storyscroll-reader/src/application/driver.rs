//! The per-session event loop.
//!
//! A session runs as one task that owns the aggregate, the last measured
//! layout and the presenter. It waits on its input queue and on the earliest
//! transition deadline, so timers are cancelled simply by the task ending.
//! A session that receives no input for `ReaderConfig::session_idle` ends
//! on its own and releases its subscription.

use std::sync::Arc;
use std::time::Duration;

use storyscroll_core::error::ReaderError;
use storyscroll_core::layout::LayoutSnapshot;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::command_handlers::{
    handle_change_background, handle_play_current_track, handle_resize, handle_scroll, handle_tick,
};
use crate::application::presenter::Presenter;
use crate::application::query_handlers::{SessionView, view};
use crate::application::subscription::{EventHub, ReaderInput, Reply, Subscription};
use crate::domain::events::ReaderEvent;
use crate::domain::session::ReaderSession;

/// A session that has been mounted and is running.
#[derive(Debug)]
pub struct SpawnedSession {
    /// View right after the initial mount.
    pub view: SessionView,
    /// The session task. Resolves with the fatal error, if any.
    pub task: JoinHandle<Result<(), ReaderError>>,
}

/// Mounts `session` against `layout`, registers it with the hub and starts
/// its event loop.
///
/// # Errors
///
/// Returns `ReaderError::SectionNotRendered` or `ReaderError::UnresolvedName`
/// if the initial mount fails, and `ReaderError::Infrastructure` if the
/// session id is already running.
pub fn spawn_session(
    mut session: ReaderSession,
    layout: LayoutSnapshot,
    hub: &Arc<EventHub>,
    presenter: Box<dyn Presenter>,
) -> Result<SpawnedSession, ReaderError> {
    let pending = handle_resize(&mut session, &layout, Uuid::new_v4())?;
    let (subscription, inputs) = hub.subscribe(session.id)?;
    let view = view(&session);
    info!(session_id = %session.id, "reader session running");

    let task = tokio::spawn(run(
        SessionTask {
            session,
            layout,
            presenter,
        },
        inputs,
        subscription,
        pending,
    ));
    Ok(SpawnedSession { view, task })
}

struct SessionTask {
    session: ReaderSession,
    layout: LayoutSnapshot,
    presenter: Box<dyn Presenter>,
}

enum Step {
    Continue(Vec<ReaderEvent>),
    Stop(Reply),
}

impl SessionTask {
    fn present(&mut self, events: &[ReaderEvent]) {
        if !events.is_empty() {
            self.presenter.present(&self.session.state(), events);
        }
    }

    fn wait(&self) -> Option<Duration> {
        self.session.time_to_next_deadline()
    }

    fn idle_timeout(&self) -> Duration {
        self.session
            .config()
            .session_idle
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    fn reply(&self, reply: Reply, result: Result<SessionView, ReaderError>) {
        if reply.send(result).is_err() {
            warn!(session_id = %self.session.id, "requester went away before reply");
        }
    }

    /// Applies one input. A fatal error is answered (if the input has a
    /// reply channel) and then returned.
    fn apply(&mut self, input: ReaderInput) -> Result<Step, ReaderError> {
        match input {
            ReaderInput::Scroll {
                scroll_top,
                correlation_id,
            } => {
                self.layout.scroll_top = scroll_top;
                handle_scroll(&mut self.session, &self.layout, correlation_id).map(Step::Continue)
            }
            ReaderInput::Resize {
                layout,
                correlation_id,
            } => {
                self.layout = layout;
                handle_resize(&mut self.session, &self.layout, correlation_id).map(Step::Continue)
            }
            ReaderInput::ChangeBackground { command, reply } => {
                match handle_change_background(&command, &mut self.session) {
                    Ok(events) => {
                        self.reply(reply, Ok(view(&self.session)));
                        Ok(Step::Continue(events))
                    }
                    Err(e) => {
                        self.reply(reply, Err(e.clone()));
                        Err(e)
                    }
                }
            }
            ReaderInput::PlayCurrentTrack { command, reply } => {
                let events = handle_play_current_track(&command, &mut self.session);
                self.reply(reply, Ok(view(&self.session)));
                Ok(Step::Continue(events))
            }
            ReaderInput::Query { reply } => {
                let events = handle_tick(&mut self.session, Uuid::new_v4());
                self.reply(reply, Ok(view(&self.session)));
                Ok(Step::Continue(events))
            }
            ReaderInput::Shutdown { reply } => Ok(Step::Stop(reply)),
        }
    }
}

async fn sleep_for(wait: Option<Duration>) {
    match wait {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

async fn run(
    mut task: SessionTask,
    mut inputs: mpsc::UnboundedReceiver<ReaderInput>,
    subscription: Subscription,
    mut pending: Vec<ReaderEvent>,
) -> Result<(), ReaderError> {
    let session_id = subscription.session_id();
    let idle_timeout = task.idle_timeout();
    let mut idle_deadline = Instant::now() + idle_timeout;
    loop {
        task.present(&pending);
        let wait = task.wait();

        tokio::select! {
            input = inputs.recv() => {
                let Some(input) = input else {
                    info!(%session_id, "input queue closed, session ending");
                    return Ok(());
                };
                idle_deadline = Instant::now() + idle_timeout;
                match task.apply(input) {
                    Ok(Step::Continue(events)) => pending = events,
                    Ok(Step::Stop(reply)) => {
                        drop(subscription);
                        let final_view = view(&task.session);
                        task.reply(reply, Ok(final_view));
                        info!(%session_id, "reader session shut down");
                        return Ok(());
                    }
                    Err(e) => {
                        error!(%session_id, error = %e, "reader session failed");
                        return Err(e);
                    }
                }
            }
            () = sleep_for(wait) => {
                pending = handle_tick(&mut task.session, Uuid::new_v4());
            }
            () = tokio::time::sleep_until(idle_deadline) => {
                info!(%session_id, idle_secs = idle_timeout.as_secs(), "reader session idle, ending");
                return Ok(());
            }
        }
    }
}
