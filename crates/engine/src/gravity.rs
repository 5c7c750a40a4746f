//! Gravity timer - when the next forced descent is due.
//!
//! Armed only while playing. Pausing (or game over) drops the deadline, so
//! resuming starts a fresh full period and never replays missed ticks.

use tokio::time::{Duration, Instant};

use crate::core::types::Status;

#[derive(Debug, Clone, Default)]
pub struct GravityTimer {
    deadline: Option<Instant>,
    period: Duration,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next due instant, or `None` while suspended.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Re-align the timer with the session after a transition.
    ///
    /// - not playing: suspended
    /// - playing and suspended (start, resume, after a fire): one full period from `now`
    /// - playing with a changed period (level change): one new period from `now`
    pub fn sync(&mut self, status: Status, interval_ms: u32, now: Instant) {
        let period = Duration::from_millis(interval_ms as u64);

        if !status.accepts_movement() {
            self.deadline = None;
        } else if self.deadline.is_none() || period != self.period {
            self.deadline = Some(now + period);
        }

        self.period = period;
    }

    /// Mark the current deadline as consumed; the next `sync` re-arms.
    pub fn fired(&mut self) {
        self.deadline = None;
    }
}
