//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, event logs).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Gravity
//!
//! The gravity interval shrinks by [`DROP_STEP_MS`] per level, starting at
//! [`BASE_DROP_MS`] on level 1, and never goes below [`DROP_INTERVAL_MIN_MS`]:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 5 | 600ms |
//! | 10+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, Status, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert!(Status::Playing.accepts_movement());
//! assert!(!Status::Paused.accepts_movement());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval on level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 100;

/// Gravity interval floor (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Level a fresh session starts on
pub const START_LEVEL: u32 = 1;

/// Line clear scoring table
///
/// Base points for clearing N lines in one placement:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Points are multiplied by the level in effect before the clear.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and tint:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Display attribute written into board cells by this piece.
    pub fn tint(&self) -> Tint {
        match self {
            PieceKind::I => Tint::Cyan,
            PieceKind::O => Tint::Yellow,
            PieceKind::T => Tint::Purple,
            PieceKind::S => Tint::Green,
            PieceKind::Z => Tint::Red,
            PieceKind::J => Tint::Blue,
            PieceKind::L => Tint::Orange,
        }
    }
}

/// Display attribute carried by an occupied cell.
///
/// Opaque to the rules: only occupancy matters to the engine, the tint is
/// for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tint {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Tint)`: Occupied, carrying the tint of the piece that filled it
pub type Cell = Option<Tint>;

/// Session lifecycle status
///
/// `Idle -> Playing <-> Paused`, `Playing -> Over`, and `Over -> Playing`
/// through an explicit restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Idle,
    Playing,
    Paused,
    Over,
}

impl Status {
    /// Whether movement, rotation and drops are honored in this status.
    pub fn accepts_movement(&self) -> bool {
        matches!(self, Status::Playing)
    }

    /// Whether a start/restart is honored in this status.
    pub fn accepts_start(&self) -> bool {
        matches!(self, Status::Idle | Status::Over)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Playing => "playing",
            Status::Paused => "paused",
            Status::Over => "over",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "idle" => Some(Status::Idle),
            "playing" => Some(Status::Playing),
            "paused" => Some(Status::Paused),
            "over" => Some(Status::Over),
            _ => None,
        }
    }
}

/// Player actions that can be applied to a session
///
/// These come from the keyboard mapping and from replayed event logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, placing it if blocked
    SoftDrop,
    /// Instantly drop piece to lowest valid position and place it
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Toggle between playing and paused
    TogglePause,
    /// Start a fresh session (from idle or after game over)
    Start,
}

impl GameAction {
    /// Parse action from its camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("togglePause"), Some(GameAction::TogglePause));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Start));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" | "rotatecw" => Some(GameAction::Rotate),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            "start" | "restart" => Some(GameAction::Start),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::TogglePause => "togglePause",
            GameAction::Start => "start",
        }
    }
}
