//! Runtime configuration from environment variables.

use std::time::{SystemTime, UNIX_EPOCH};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Piece source seed.
    pub seed: u32,
    /// Append the JSON-lines event log here when set.
    pub log_path: Option<String>,
    /// Minimum milliseconds between two terminal frames.
    pub frame_ms: u64,
}

pub const DEFAULT_FRAME_MS: u64 = 16;

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            log_path: None,
            frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl GameConfig {
    /// Read `BLOCKFALL_SEED`, `BLOCKFALL_LOG_PATH` and `BLOCKFALL_FRAME_MS`.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let frame_ms = lookup("BLOCKFALL_FRAME_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(DEFAULT_FRAME_MS);

        Self {
            seed,
            log_path,
            frame_ms,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_all_values() {
        let cfg = GameConfig::from_lookup(lookup(&[
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_LOG_PATH", " /tmp/game.jsonl "),
            ("BLOCKFALL_FRAME_MS", "33"),
        ]));
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.log_path.as_deref(), Some("/tmp/game.jsonl"));
        assert_eq!(cfg.frame_ms, 33);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = GameConfig::from_lookup(lookup(&[
            ("BLOCKFALL_LOG_PATH", "   "),
            ("BLOCKFALL_FRAME_MS", "0"),
        ]));
        assert!(cfg.log_path.is_none());
        assert_eq!(cfg.frame_ms, DEFAULT_FRAME_MS);

        let cfg = GameConfig::from_lookup(lookup(&[("BLOCKFALL_FRAME_MS", "fast")]));
        assert_eq!(cfg.frame_ms, DEFAULT_FRAME_MS);
    }
}
