//! Game state module - the session state machine
//!
//! Ties together board, active piece, piece source and scoring. Every change
//! goes through [`GameState::apply`] with an [`Event`], so a session is a pure
//! function of its piece source and the ordered events it was fed.
//!
//! Lifecycle: `Idle -> Playing <-> Paused`, `Playing -> Over` (only through a
//! blocked spawn), `Over -> Playing` through a restart that resets everything.

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::rng::{PieceSource, RandomPieces};
use crate::scoring::{apply_line_clear, gravity_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, PieceKind, Status, START_LEVEL};

/// One input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Forced one-row descent from the gravity timer.
    Gravity,
    /// Player or session action.
    Action(GameAction),
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Gravity => "gravity",
            Event::Action(action) => action.as_str(),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("gravity") {
            return Some(Event::Gravity);
        }
        GameAction::from_str(s).map(Event::Action)
    }
}

/// What happened when a piece was placed (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points: u32,
    pub leveled_up: bool,
    /// The following spawn was blocked.
    pub game_over: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<S = RandomPieces> {
    board: Board,
    active: Option<ActivePiece>,
    next: PieceKind,
    source: S,
    score: u32,
    level: u32,
    lines: u32,
    status: Status,
    /// Monotonic session id (increments on every start).
    session_id: u32,
    last_placement: Option<PlacementEvent>,
}

impl GameState<RandomPieces> {
    /// Create an idle session with a seeded random piece source
    pub fn new(seed: u32) -> Self {
        Self::with_source(RandomPieces::new(seed))
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create an idle session drawing pieces from `source`.
    ///
    /// The first kind is queued immediately so it can be previewed.
    pub fn with_source(mut source: S) -> Self {
        let next = source.next_kind();
        Self {
            board: Board::new(),
            active: None,
            next,
            source,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            status: Status::Idle,
            session_id: 0,
            last_placement: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    /// Current gravity period, derived from the level.
    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.level)
    }

    /// Take and clear the last placement event.
    pub fn take_last_placement(&mut self) -> Option<PlacementEvent> {
        self.last_placement.take()
    }

    /// Apply one event. Returns whether anything observable changed.
    pub fn apply(&mut self, event: Event) -> bool {
        match event {
            Event::Gravity => self.tick(),
            Event::Action(action) => self.apply_action(action),
        }
    }

    /// Apply a player or session action
    ///
    /// Movement is ignored unless playing; pause toggling is ignored unless
    /// playing or paused; start is ignored unless idle or over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => self.start(),
            GameAction::TogglePause => self.toggle_pause(),
            _ if !self.status.accepts_movement() => false,
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.step_down(),
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => self.hard_drop(),
        }
    }

    /// Start a fresh session: new board, zeroed counters, first piece.
    pub fn start(&mut self) -> bool {
        if !self.status.accepts_start() {
            return false;
        }

        self.board = Board::new();
        self.active = None;
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.last_placement = None;
        self.session_id = self.session_id.wrapping_add(1);
        self.status = Status::Playing;
        self.spawn_next();
        true
    }

    fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            Status::Playing => Status::Paused,
            Status::Paused => Status::Playing,
            Status::Idle | Status::Over => return false,
        };
        true
    }

    /// Gravity tick: one row down, placing the piece if it cannot descend.
    pub fn tick(&mut self) -> bool {
        if !self.status.accepts_movement() {
            return false;
        }
        self.step_down()
    }

    /// Promote the queued kind to the active piece.
    ///
    /// A blocked spawn ends the session; the board is left as it was and the
    /// queued kind stays queued.
    fn spawn_next(&mut self) -> bool {
        let piece = ActivePiece::spawn(self.next);
        if piece.collides(&self.board) {
            self.active = None;
            self.status = Status::Over;
            return false;
        }

        self.active = Some(piece);
        self.next = self.source.next_kind();
        true
    }

    /// Shift the active piece; blocked horizontal moves are a no-op.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match active.moved(&self.board, dx, dy) {
            Some(next) => {
                self.active = Some(next);
                true
            }
            None => false,
        }
    }

    /// One row down; a blocked downward move places the piece.
    fn step_down(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if !self.try_move(0, 1) {
            self.place(active);
        }
        true
    }

    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match active.rotated(&self.board) {
            Some(next) => {
                self.active = Some(next);
                true
            }
            None => false,
        }
    }

    /// Drop straight to the lowest free row and place, in one step.
    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        self.place(active.landed(&self.board));
        true
    }

    /// Merge, clear lines, score, then spawn the next piece.
    fn place(&mut self, piece: ActivePiece) {
        self.active = None;

        let mut board = piece.merge_into(&self.board);
        let cleared = board.clear_full_rows().len();
        self.board = board;

        let result = apply_line_clear(self.score, self.level, self.lines, cleared);
        self.score = result.score;
        self.level = result.level;
        self.lines = result.lines;

        let spawned = self.spawn_next();

        self.last_placement = Some(PlacementEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            points: result.points,
            leveled_up: result.leveled_up,
            game_over: !spawned,
        });
    }

    /// Write a render snapshot into `out`.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active;
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.status = self.status;
        out.session_id = self.session_id;
        out.gravity_ms = self.gravity_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
