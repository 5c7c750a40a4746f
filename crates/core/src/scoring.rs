//! Scoring module - line-clear points, leveling and gravity speed
//!
//! Rules:
//! - A clear of N lines is worth `LINE_SCORES[N] * level`, using the level in
//!   effect before this clear's lines are counted.
//! - Level is `total_lines / 10 + 1`, recomputed from the updated running
//!   total after every clear. It never decreases.
//! - Gravity interval is `max(100, 1000 - (level - 1) * 100)` milliseconds.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, START_LEVEL,
};

/// Outcome of applying one placement's line clear to the session counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClearResult {
    /// Points awarded for this clear.
    pub points: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub leveled_up: bool,
}

/// Points for clearing `lines` rows at `level`.
///
/// `lines` outside 1..=4 scores nothing.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Level for a cumulative line total.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + START_LEVEL
}

/// Gravity period for a level, in milliseconds.
pub fn gravity_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(START_LEVEL).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Fold a clear of `cleared` lines into the running counters.
///
/// Scoring reads `level` before the update; the new level is computed from
/// the new cumulative total, never from a stale one.
pub fn apply_line_clear(score: u32, level: u32, lines: u32, cleared: usize) -> LineClearResult {
    let points = line_clear_points(cleared, level);
    let lines = lines.saturating_add(cleared as u32);
    let new_level = level_for_lines(lines).max(level);

    LineClearResult {
        points,
        score: score.saturating_add(points),
        level: new_level,
        lines,
        leveled_up: new_level > level,
    }
}
