//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules and session state. It has **no
//! dependencies** on timers, terminals or I/O, making it:
//!
//! - **Deterministic**: the same piece source and events produce the same game
//! - **Testable**: every rule is a plain function or method on a value
//! - **Portable**: can be driven by any event loop (terminal, headless, replay)
//!
//! # Module Structure
//!
//! - [`pieces`]: shape catalog - occupancy matrices and clockwise rotation
//! - [`board`]: 10x20 grid, collision test, merge, and atomic line clearing
//! - [`scoring`]: points per clear, level from cumulative lines, gravity speed
//! - [`piece`]: the active piece and its spawn/move/rotate/drop operations
//! - [`rng`]: injectable next-piece source (uniform random or scripted)
//! - [`game_state`]: session state machine driven by [`game_state::Event`]s
//! - [`snapshot`]: read-only render snapshot for presentation
//!
//! # Game Rules
//!
//! - **Random pieces**: each next kind is drawn uniformly and independently
//! - **Rotation**: clockwise, refused when blocked (no wall kicks)
//! - **Placement**: a blocked downward move merges the piece into the board
//! - **Scoring**: `[0, 100, 300, 500, 800][lines] * level`
//! - **Leveling**: `total_lines / 10 + 1`
//! - **Game over**: the next piece cannot spawn
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::{GameAction, Status};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.status(), Status::Playing);
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{clear_lines, Board};
pub use game_state::{Event, GameState, PlacementEvent};
pub use piece::ActivePiece;
pub use pieces::{shape_of, Matrix};
pub use rng::{PieceSource, RandomPieces, ScriptedPieces, SimpleRng};
pub use scoring::{
    apply_line_clear, gravity_interval_ms, level_for_lines, line_clear_points, LineClearResult,
};
pub use snapshot::{GameSnapshot, Grid};
