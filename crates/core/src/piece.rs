//! Active piece - the one falling tetromino and its moves
//!
//! All moves are value-returning: a move that would collide yields `None`
//! and the caller keeps the piece it had. There are no wall kicks.

use crate::board::Board;
use crate::pieces::{shape_of, Matrix};
use crate::types::{PieceKind, Tint, BOARD_WIDTH};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current occupancy, after any rotations.
    pub matrix: Matrix,
    pub tint: Tint,
    /// Top-left anchor of the matrix in board coordinates.
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at its spawn anchor: horizontally centered, top row.
    pub fn spawn(kind: PieceKind) -> Self {
        let (matrix, tint) = shape_of(kind);
        let x = (BOARD_WIDTH / 2) as i8 - (matrix.side() / 2) as i8;
        Self {
            kind,
            matrix,
            tint,
            x,
            y: 0,
        }
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.matrix, self.x, self.y)
    }

    /// The piece shifted by (dx, dy), if that position is free.
    pub fn moved(&self, board: &Board, dx: i8, dy: i8) -> Option<Self> {
        let next = Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        };
        (!next.collides(board)).then_some(next)
    }

    /// The piece rotated clockwise in place, if the rotated matrix fits.
    pub fn rotated(&self, board: &Board) -> Option<Self> {
        let next = Self {
            matrix: self.matrix.rotated_cw(),
            ..*self
        };
        (!next.collides(board)).then_some(next)
    }

    /// Rows the piece can still fall before resting.
    pub fn drop_distance(&self, board: &Board) -> i8 {
        let mut distance = 0;
        while !board.collides(&self.matrix, self.x, self.y + distance + 1) {
            distance += 1;
        }
        distance
    }

    /// The piece at the lowest free row straight below.
    pub fn landed(&self, board: &Board) -> Self {
        Self {
            y: self.y + self.drop_distance(board),
            ..*self
        }
    }

    /// Board with this piece written in.
    pub fn merge_into(&self, board: &Board) -> Board {
        board.merged(&self.matrix, self.x, self.y, self.tint)
    }

    /// Occupied cells in board coordinates (may include rows above the top).
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_is_centered() {
        assert_eq!(ActivePiece::spawn(PieceKind::I).x, 3);
        assert_eq!(ActivePiece::spawn(PieceKind::O).x, 4);
        assert_eq!(ActivePiece::spawn(PieceKind::T).x, 4);
        for kind in PieceKind::ALL {
            assert_eq!(ActivePiece::spawn(kind).y, 0);
        }
    }

    #[test]
    fn test_moved_blocked_by_wall() {
        let board = Board::new();
        let mut piece = ActivePiece::spawn(PieceKind::O);
        let mut steps = 0;
        while let Some(next) = piece.moved(&board, -1, 0) {
            piece = next;
            steps += 1;
        }
        assert_eq!(steps, 4);
        assert_eq!(piece.x, 0);
    }

    #[test]
    fn test_rotation_refused_near_wall() {
        let board = Board::new();
        // Vertical I hugging the left wall: matrix column 2 at board x=0.
        let mut piece = ActivePiece::spawn(PieceKind::I).rotated(&board).unwrap();
        piece.x = -2;
        piece.y = 5;
        assert!(!piece.collides(&board));
        assert!(piece.rotated(&board).is_none());
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let board = Board::new();
        let piece = ActivePiece::spawn(PieceKind::O);
        let rotated = piece.rotated(&board).unwrap();
        assert_eq!(rotated, piece);
    }

    #[test]
    fn test_landed_on_empty_board() {
        let board = Board::new();
        // T occupies matrix rows 0-1, so it rests with anchor y = 18.
        let piece = ActivePiece::spawn(PieceKind::T).landed(&board);
        assert_eq!(piece.y, 18);
        assert!(piece.moved(&board, 0, 1).is_none());
    }
}
