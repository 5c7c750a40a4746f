//! Event log - one JSON object per line.
//!
//! A log starts with a `session` record carrying the piece seed, followed by
//! one `event` record per applied transition. Together they are enough to
//! rebuild the session exactly (see [`crate::replay`]).
//!
//! ```text
//! {"type":"session","seed":42}
//! {"type":"event","seq":1,"at_ms":0,"event":"start","score":0,"level":1,"lines":0,"status":"playing"}
//! {"type":"event","seq":2,"at_ms":1000,"event":"gravity","score":0,"level":1,"lines":0,"status":"playing"}
//! ```

use std::io::BufRead;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{Event, GameState, PieceSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    /// Log header.
    Session { seed: u32 },
    /// One applied transition and the counters right after it.
    Event(EventRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub seq: u64,
    /// Milliseconds since the session task started.
    pub at_ms: u64,
    pub event: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub status: String,
}

impl EventRecord {
    pub fn new<S: PieceSource>(seq: u64, at_ms: u64, event: Event, state: &GameState<S>) -> Self {
        Self {
            seq,
            at_ms,
            event: event.as_str().to_string(),
            score: state.score(),
            level: state.level(),
            lines: state.lines(),
            status: state.status().as_str().to_string(),
        }
    }
}

/// Sender half for log records.
pub type LogSink = mpsc::UnboundedSender<LogRecord>;

/// Spawn a task appending every record sent on the returned sink to `path`.
///
/// The file is opened in append mode, so one file may hold several sessions,
/// each starting at its own header. The task ends once every sink clone is
/// dropped and the file is flushed; await the handle to learn whether the
/// log actually reached the disk. An open or write failure ends the task
/// with the error, and later sends on the sink fail.
pub fn spawn_file_log(path: String) -> (LogSink, JoinHandle<Result<()>>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<LogRecord>();

    let task = tokio::spawn(async move {
        use tokio::fs::OpenOptions;
        use tokio::io::AsyncWriteExt;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("opening event log {}", path))?;

        let mut buf: Vec<u8> = Vec::with_capacity(256);

        while let Some(rec) = rx.recv().await {
            buf.clear();
            serde_json::to_writer(&mut buf, &rec).context("encoding log record")?;
            buf.push(b'\n');
            file.write_all(&buf)
                .await
                .with_context(|| format!("writing event log {}", path))?;
        }

        file.flush()
            .await
            .with_context(|| format!("flushing event log {}", path))
    });

    (tx, task)
}

/// Parse a JSON-lines log. Blank lines are skipped.
pub fn read_log(reader: impl BufRead) -> Result<Vec<LogRecord>> {
    let mut out = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading log line {}", i + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let rec: LogRecord = serde_json::from_str(&line)
            .with_context(|| format!("parsing log line {}", i + 1))?;
        out.push(rec);
    }
    Ok(out)
}
