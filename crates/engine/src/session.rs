//! Session actor - the real-time control loop.
//!
//! One tokio task owns the [`GameState`] and serializes every transition:
//! commands from the input side and gravity deadlines from [`GravityTimer`]
//! are merged by a single `select!`, so no two transitions ever overlap.
//!
//! Each observable change publishes a fresh [`GameSnapshot`] on a `watch`
//! channel and, when a log sink is attached, one [`LogRecord`].

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::core::types::GameAction;
use crate::core::{Event, GameSnapshot, GameState, PieceSource};
use crate::gravity::GravityTimer;
use crate::log::{EventRecord, LogRecord, LogSink};

/// Command delivered to the session task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Any player action, including start and restart.
    Action(GameAction),
    /// Stop the loop and hand back the final state.
    Shutdown,
}

impl SessionCommand {
    fn into_event(self) -> Option<Event> {
        match self {
            SessionCommand::Action(action) => Some(Event::Action(action)),
            SessionCommand::Shutdown => None,
        }
    }
}

/// Running session.
pub struct SessionHandle<S> {
    commands: mpsc::UnboundedSender<SessionCommand>,
    snapshots: watch::Receiver<GameSnapshot>,
    task: JoinHandle<GameState<S>>,
}

impl<S> SessionHandle<S> {
    /// Returns false once the session has ended.
    pub fn send(&self, cmd: SessionCommand) -> bool {
        self.commands.send(cmd).is_ok()
    }

    pub fn snapshots(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        *self.snapshots.borrow()
    }

    /// Stop the session and wait for its final state.
    pub async fn shutdown(self) -> Result<GameState<S>> {
        let _ = self.commands.send(SessionCommand::Shutdown);
        self.task.await.context("session task failed")
    }
}

/// Spawn the session actor on the current tokio runtime.
pub fn spawn_session<S>(state: GameState<S>, log: Option<LogSink>) -> SessionHandle<S>
where
    S: PieceSource + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (snap_tx, snap_rx) = watch::channel(state.snapshot());

    let task = tokio::spawn(run_session(state, cmd_rx, snap_tx, log));

    SessionHandle {
        commands: cmd_tx,
        snapshots: snap_rx,
        task,
    }
}

/// Drive `state` until `Shutdown` arrives or every command sender is gone.
pub async fn run_session<S: PieceSource>(
    mut state: GameState<S>,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    snapshots: watch::Sender<GameSnapshot>,
    mut log: Option<LogSink>,
) -> GameState<S> {
    let started = Instant::now();
    let mut timer = GravityTimer::new();
    timer.sync(state.status(), state.gravity_interval_ms(), started);

    let mut snap = state.snapshot();
    let mut seq: u64 = 0;

    loop {
        let deadline = timer.deadline();

        let event = tokio::select! {
            cmd = commands.recv() => {
                match cmd.and_then(SessionCommand::into_event) {
                    Some(event) => event,
                    None => break,
                }
            }
            _ = sleep_until(deadline.unwrap_or(started)), if deadline.is_some() => {
                timer.fired();
                Event::Gravity
            }
        };

        let changed = state.apply(event);
        let now = Instant::now();
        timer.sync(state.status(), state.gravity_interval_ms(), now);

        if !changed {
            continue;
        }

        seq += 1;
        if let Some(sink) = &log {
            let at_ms = now.duration_since(started).as_millis() as u64;
            let rec = LogRecord::Event(EventRecord::new(seq, at_ms, event, &state));
            // A closed sink means the log task failed; its handle carries the error.
            if sink.send(rec).is_err() {
                log = None;
            }
        }

        state.snapshot_into(&mut snap);
        snapshots.send_replace(snap);
    }

    state
}
