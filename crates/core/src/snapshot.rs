//! Render snapshot - the read-only projection handed to presentation.

use crate::piece::ActivePiece;
use crate::types::{Cell, PieceKind, Status, BOARD_HEIGHT, BOARD_WIDTH};

/// Row-major board grid.
pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells only; see [`GameSnapshot::composited`] for the active piece overlay.
    pub board: Grid,
    pub active: Option<ActivePiece>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub status: Status,
    pub session_id: u32,
    pub gravity_ms: u32,
}

impl GameSnapshot {
    /// Board with the active piece drawn over it.
    ///
    /// Piece cells above the top edge are not shown.
    pub fn composited(&self) -> Grid {
        let mut grid = self.board;
        if let Some(active) = self.active {
            for (x, y) in active.cells() {
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    grid[y as usize][x as usize] = Some(active.tint);
                }
            }
        }
        grid
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: PieceKind::I,
            score: 0,
            level: 1,
            lines: 0,
            status: Status::Idle,
            session_id: 0,
            gravity_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tint;

    #[test]
    fn composited_overlays_active_piece() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = Some(Tint::Red);
        snap.active = Some(ActivePiece::spawn(PieceKind::O));

        let grid = snap.composited();
        assert_eq!(grid[19][0], Some(Tint::Red));
        assert_eq!(grid[0][4], Some(Tint::Yellow));
        assert_eq!(grid[1][5], Some(Tint::Yellow));
        // Locked board is untouched.
        assert_eq!(snap.board[0][4], None);
    }

    #[test]
    fn composited_skips_cells_above_top() {
        let mut snap = GameSnapshot::default();
        let mut piece = ActivePiece::spawn(PieceKind::O);
        piece.y = -1;
        snap.active = Some(piece);

        let grid = snap.composited();
        let filled = grid.iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(filled, 2);
    }
}
