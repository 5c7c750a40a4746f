//! Integration tests for the session state machine driven through events

use blockfall::core::{Event, GameState, ScriptedPieces};
use blockfall::types::{GameAction, PieceKind, Status};

fn o_game() -> GameState<ScriptedPieces> {
    let mut state = GameState::with_source(ScriptedPieces::repeat(PieceKind::O));
    state.start();
    state
}

fn shift(state: &mut GameState<ScriptedPieces>, dx: i8) {
    let action = if dx < 0 {
        GameAction::MoveLeft
    } else {
        GameAction::MoveRight
    };
    for _ in 0..dx.unsigned_abs() {
        assert!(state.apply_action(action));
    }
}

/// Five O pieces side by side fill the two bottom rows.
fn clear_two_rows(state: &mut GameState<ScriptedPieces>) {
    for dx in [-4, -2, 0, 2, 4] {
        shift(state, dx);
        assert!(state.apply_action(GameAction::HardDrop));
    }
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.status(), Status::Idle);
    assert!(state.active().is_none());

    // Movement before start is ignored.
    assert!(!state.apply_action(GameAction::MoveLeft));

    assert!(state.apply(Event::Action(GameAction::Start)));
    assert_eq!(state.status(), Status::Playing);
    assert!(state.active().is_some());
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.lines(), 0);

    // Start while playing is ignored.
    assert!(!state.apply_action(GameAction::Start));
}

#[test]
fn test_pause_blocks_movement_and_gravity() {
    let mut state = o_game();
    let before = state.active();

    assert!(state.apply_action(GameAction::TogglePause));
    assert_eq!(state.status(), Status::Paused);

    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.apply_action(GameAction::HardDrop));
    assert!(!state.apply(Event::Gravity));
    assert_eq!(state.active(), before);

    assert!(state.apply_action(GameAction::TogglePause));
    assert!(state.apply(Event::Gravity));
    assert_eq!(state.active().unwrap().y, 1);
}

#[test]
fn test_gravity_places_piece_when_blocked() {
    let mut state = o_game();
    for _ in 0..18 {
        assert!(state.apply(Event::Gravity));
    }
    assert_eq!(state.active().unwrap().y, 18);
    assert_eq!(state.board().filled_count(), 0);

    // Blocked descent merges and spawns the next piece.
    assert!(state.apply(Event::Gravity));
    assert_eq!(state.board().filled_count(), 4);
    assert_eq!(state.active().unwrap().y, 0);

    let placed = state.take_last_placement().unwrap();
    assert_eq!(placed.kind, PieceKind::O);
    assert_eq!(placed.lines_cleared, 0);
    assert!(!placed.game_over);
}

#[test]
fn test_double_clear_scores_and_compacts() {
    let mut state = o_game();
    clear_two_rows(&mut state);

    assert_eq!(state.lines(), 2);
    assert_eq!(state.score(), 300);
    assert_eq!(state.level(), 1);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_tenth_line_levels_up_and_speeds_gravity() {
    let mut state = o_game();
    assert_eq!(state.gravity_interval_ms(), 1000);

    for _ in 0..4 {
        clear_two_rows(&mut state);
    }
    assert_eq!(state.lines(), 8);
    assert_eq!(state.level(), 1);

    clear_two_rows(&mut state);
    // The clear itself scores at the level it started on.
    assert_eq!(state.score(), 5 * 300);
    assert_eq!(state.lines(), 10);
    assert_eq!(state.level(), 2);
    assert_eq!(state.gravity_interval_ms(), 900);

    let placed = state.take_last_placement().unwrap();
    assert!(placed.leveled_up);
    assert_eq!(placed.points, 300);

    clear_two_rows(&mut state);
    assert_eq!(state.score(), 5 * 300 + 600);
}

#[test]
fn test_blocked_spawn_ends_the_game() {
    let mut state = o_game();
    for _ in 0..10 {
        assert!(state.apply_action(GameAction::HardDrop));
    }

    assert_eq!(state.status(), Status::Over);
    assert!(state.active().is_none());
    // The blocked piece is not written into the board.
    assert_eq!(state.board().filled_count(), 40);
    assert_eq!(state.next_kind(), PieceKind::O);
    assert!(state.take_last_placement().unwrap().game_over);

    // Only a restart is accepted now.
    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.apply_action(GameAction::TogglePause));
    assert!(!state.apply(Event::Gravity));

    assert!(state.apply_action(GameAction::Start));
    assert_eq!(state.status(), Status::Playing);
    assert_eq!(state.board().filled_count(), 0);
    assert_eq!(state.score(), 0);
    assert_eq!(state.session_id(), 2);
}

#[test]
fn test_same_seed_same_game() {
    let events = [
        Event::Action(GameAction::Start),
        Event::Action(GameAction::Rotate),
        Event::Action(GameAction::MoveLeft),
        Event::Action(GameAction::HardDrop),
        Event::Gravity,
        Event::Action(GameAction::MoveRight),
        Event::Action(GameAction::SoftDrop),
        Event::Action(GameAction::HardDrop),
        Event::Action(GameAction::HardDrop),
    ];

    let mut a = GameState::new(2024);
    let mut b = GameState::new(2024);
    for e in events {
        assert_eq!(a.apply(e), b.apply(e));
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_snapshot_composites_active_piece() {
    let state = o_game();
    let snap = state.snapshot();
    assert_eq!(snap.status, Status::Playing);
    assert_eq!(snap.next, PieceKind::O);
    assert_eq!(snap.gravity_ms, 1000);

    let grid = snap.composited();
    let filled = grid.iter().flatten().filter(|c| c.is_some()).count();
    assert_eq!(filled, 4);
    assert!(grid[0][4].is_some() && grid[1][5].is_some());
    // The locked layer stays empty.
    assert!(snap.board.iter().flatten().all(|c| c.is_none()));
}
