//! Terminal Blockfall runner (default binary).
//!
//! Keys are read on a blocking thread and forwarded to the session actor;
//! the async side renders whatever snapshot the session last published,
//! at most once per frame interval.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use blockfall::core::GameState;
use blockfall::engine::{spawn_file_log, spawn_session, GameConfig, LogRecord, SessionCommand};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// What the input thread reports.
enum Input {
    Command(SessionCommand),
    Resize,
    Quit,
    Failed(anyhow::Error),
}

fn main() -> Result<()> {
    let config = GameConfig::from_env();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = rt.block_on(run(&mut term, &config));

    // Always try to restore terminal state.
    let _ = term.exit();

    let Finished { state, log } = result?;
    eprintln!(
        "[Blockfall] seed={} score={} level={} lines={}",
        config.seed,
        state.score(),
        state.level(),
        state.lines()
    );
    if let (Some(path), Some(log)) = (&config.log_path, &log) {
        eprintln!("{}", log_summary(path, log));
    }
    Ok(())
}

/// What a finished run hands back to `main`.
struct Finished {
    state: GameState,
    /// Outcome of the event log task, when logging was enabled.
    log: Option<Result<()>>,
}

fn log_summary(path: &str, log: &Result<()>) -> String {
    match log {
        Ok(()) => format!("[Log] events appended to {}", path),
        Err(err) => format!("[Log] event log failed: {:#}", err),
    }
}

async fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<Finished> {
    let (log, log_task) = match config.log_path.clone() {
        Some(path) => {
            let (sink, task) = spawn_file_log(path);
            // Fails only once the log task has ended; its result says why.
            let sink = sink
                .send(LogRecord::Session { seed: config.seed })
                .is_ok()
                .then_some(sink);
            (sink, Some(task))
        }
        None => (None, None),
    };

    let session = spawn_session(GameState::new(config.seed), log);
    let mut snapshots = session.snapshots();

    let (input_tx, mut inputs) = mpsc::unbounded_channel();
    let poll = Duration::from_millis(config.frame_ms);
    thread::spawn(move || read_input(input_tx, poll));

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut frame = interval(poll);
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut dirty = true;

    let outcome: Result<()> = loop {
        tokio::select! {
            input = inputs.recv() => match input {
                Some(Input::Command(cmd)) => {
                    session.send(cmd);
                }
                Some(Input::Resize) => {
                    term.invalidate();
                    dirty = true;
                }
                Some(Input::Failed(err)) => break Err(err),
                Some(Input::Quit) | None => break Ok(()),
            },
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                dirty = true;
            }
            _ = frame.tick() => {
                if !dirty {
                    continue;
                }
                let snap = *snapshots.borrow_and_update();
                let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
                view.render_into(&snap, Viewport::new(w, h), &mut fb);
                if let Err(err) = term.draw_swap(&mut fb) {
                    break Err(err);
                }
                dirty = false;
            }
        }
    };

    let state = session.shutdown().await?;
    let log = match log_task {
        Some(task) => Some(task.await.context("event log task failed").and_then(|r| r)),
        None => None,
    };

    outcome.map(|()| Finished { state, log })
}

/// Blocking key reader. Ends on quit, on a read error, or once the
/// receiving side is gone.
fn read_input(tx: mpsc::UnboundedSender<Input>, poll: Duration) {
    loop {
        let input = match next_input(poll) {
            Ok(Some(input)) => input,
            Ok(None) => {
                if tx.is_closed() {
                    return;
                }
                continue;
            }
            Err(err) => Input::Failed(err),
        };

        let last = matches!(input, Input::Quit | Input::Failed(_));
        if tx.send(input).is_err() || last {
            return;
        }
    }
}

fn next_input(poll: Duration) -> Result<Option<Input>> {
    if !event::poll(poll).context("polling terminal events")? {
        return Ok(None);
    }

    let input = match event::read().context("reading terminal event")? {
        // Auto-repeat counts as presses; held keys keep moving.
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            if should_quit(key) {
                Some(Input::Quit)
            } else {
                handle_key_event(key).map(|action| Input::Command(SessionCommand::Action(action)))
            }
        }
        Event::Resize(_, _) => Some(Input::Resize),
        _ => None,
    };
    Ok(input)
}
