//! Replay - rebuild a session from its event log.
//!
//! Sessions are deterministic given the piece seed and the ordered events,
//! so re-applying the log to a freshly seeded [`GameState`] lands on the same
//! board and counters. Every step is checked against the recorded counters.

use anyhow::{bail, Context, Result};

use crate::core::types::Status;
use crate::core::{Event, GameState};
use crate::log::LogRecord;

/// Re-apply the last session in `records` and return the resulting state.
///
/// A log file may hold several sessions back to back; everything before the
/// final `session` header is skipped.
pub fn replay(records: &[LogRecord]) -> Result<GameState> {
    match records.first() {
        Some(LogRecord::Session { .. }) => {}
        Some(LogRecord::Event(_)) => bail!("log does not start with a session record"),
        None => bail!("empty log"),
    }

    let (start, seed) = records
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, rec)| match rec {
            LogRecord::Session { seed } => Some((i, *seed)),
            LogRecord::Event(_) => None,
        })
        .context("log has no session record")?;

    let mut state = GameState::new(seed);

    for rec in &records[start + 1..] {
        let rec = match rec {
            LogRecord::Event(rec) => rec,
            LogRecord::Session { .. } => continue,
        };

        let event = Event::from_str(&rec.event)
            .with_context(|| format!("unknown event {:?} at seq {}", rec.event, rec.seq))?;
        let status = Status::from_str(&rec.status)
            .with_context(|| format!("unknown status {:?} at seq {}", rec.status, rec.seq))?;
        state.apply(event);

        let got = (state.score(), state.level(), state.lines(), state.status());
        let want = (rec.score, rec.level, rec.lines, status);
        if got != want {
            bail!(
                "replay diverged at seq {}: got {:?}, recorded {:?}",
                rec.seq,
                got,
                want
            );
        }
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GameAction;
    use crate::log::EventRecord;

    fn record(seq: u64, event: Event, state: &GameState) -> LogRecord {
        LogRecord::Event(EventRecord::new(seq, seq * 10, event, state))
    }

    #[test]
    fn replay_reproduces_board() {
        let seed = 77;
        let mut live = GameState::new(seed);
        let mut log = vec![LogRecord::Session { seed }];

        let events = [
            Event::Action(GameAction::Start),
            Event::Action(GameAction::MoveLeft),
            Event::Action(GameAction::Rotate),
            Event::Gravity,
            Event::Action(GameAction::HardDrop),
            Event::Action(GameAction::MoveRight),
            Event::Action(GameAction::HardDrop),
            Event::Gravity,
        ];
        for (i, e) in events.iter().enumerate() {
            if live.apply(*e) {
                log.push(record(i as u64 + 1, *e, &live));
            }
        }

        let replayed = replay(&log).unwrap();
        assert_eq!(replayed.board(), live.board());
        assert_eq!(replayed.active(), live.active());
        assert_eq!(replayed.next_kind(), live.next_kind());
        assert_eq!(replayed.status(), Status::Playing);
    }

    #[test]
    fn replay_requires_header() {
        assert!(replay(&[]).is_err());

        let state = GameState::new(1);
        let log = vec![record(1, Event::Gravity, &state)];
        assert!(replay(&log).is_err());
    }

    #[test]
    fn replay_detects_divergence() {
        let mut live = GameState::new(3);
        live.start();
        let mut rec = EventRecord::new(1, 0, Event::Action(GameAction::Start), &live);
        rec.score = 999;

        let log = vec![LogRecord::Session { seed: 3 }, LogRecord::Event(rec)];
        let err = replay(&log).unwrap_err();
        assert!(err.to_string().contains("diverged at seq 1"));
    }

    #[test]
    fn replay_rejects_unknown_status() {
        let mut live = GameState::new(3);
        live.start();
        let mut rec = EventRecord::new(1, 0, Event::Action(GameAction::Start), &live);
        rec.status = "sleeping".to_string();

        let log = vec![LogRecord::Session { seed: 3 }, LogRecord::Event(rec)];
        let err = replay(&log).unwrap_err();
        assert!(err.to_string().contains("unknown status"));
    }

    #[test]
    fn replay_uses_the_last_session() {
        let mut first = GameState::new(5);
        first.start();
        first.apply(Event::Action(GameAction::HardDrop));

        let mut second = GameState::new(6);
        let mut log = vec![
            LogRecord::Session { seed: 5 },
            record(1, Event::Action(GameAction::Start), &first),
            record(2, Event::Action(GameAction::HardDrop), &first),
            LogRecord::Session { seed: 6 },
        ];
        second.apply(Event::Action(GameAction::Start));
        log.push(record(1, Event::Action(GameAction::Start), &second));
        second.apply(Event::Action(GameAction::MoveLeft));
        log.push(record(2, Event::Action(GameAction::MoveLeft), &second));

        let replayed = replay(&log).unwrap();
        assert_eq!(replayed.board(), second.board());
        assert_eq!(replayed.active(), second.active());
        assert_eq!(replayed.next_kind(), second.next_kind());
    }
}
