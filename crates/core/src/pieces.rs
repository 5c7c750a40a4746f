//! Pieces module - tetromino occupancy matrices and rotation
//!
//! Every kind is a square boolean grid (side 2-4). The catalog is static;
//! rotation always produces a new matrix and never touches the catalog.

use crate::types::{PieceKind, Tint};

/// Largest matrix side in the catalog (the I piece).
pub const MAX_SIDE: usize = 4;

/// Square occupancy grid of a piece's bounding box.
///
/// Only the top-left `side x side` corner of `rows` is meaningful; the rest
/// stays `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    side: u8,
    rows: [[bool; MAX_SIDE]; MAX_SIDE],
}

impl Matrix {
    /// Build a matrix from a 4x4 grid of which the top-left `side x side`
    /// corner is used.
    pub const fn from_rows(side: u8, rows: [[bool; MAX_SIDE]; MAX_SIDE]) -> Self {
        Self { side, rows }
    }

    pub fn side(&self) -> u8 {
        self.side
    }

    /// Iterate occupied cells as (x, y) offsets from the top-left anchor.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.side as usize;
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| self.rows[y][x].then_some((x as i8, y as i8)))
        })
    }

    /// Rotate 90° clockwise (transpose, then reverse each row).
    pub fn rotated_cw(&self) -> Self {
        let n = self.side as usize;
        let mut rows = [[false; MAX_SIDE]; MAX_SIDE];
        for (y, row) in rows.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.rows[n - 1 - x][y];
            }
        }
        Self {
            side: self.side,
            rows,
        }
    }
}

const X: bool = true;
const O: bool = false;

const I_MATRIX: Matrix = Matrix::from_rows(
    4,
    [[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]],
);

const O_MATRIX: Matrix = Matrix::from_rows(
    2,
    [[X, X, O, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
);

const T_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[O, X, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
);

const S_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[O, X, X, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
);

const Z_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[X, X, O, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]],
);

const J_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[X, O, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
);

const L_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[O, O, X, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
);

/// Catalog lookup: base matrix and display tint for a piece kind.
pub fn shape_of(kind: PieceKind) -> (Matrix, Tint) {
    let matrix = match kind {
        PieceKind::I => I_MATRIX,
        PieceKind::O => O_MATRIX,
        PieceKind::T => T_MATRIX,
        PieceKind::S => S_MATRIX,
        PieceKind::Z => Z_MATRIX,
        PieceKind::J => J_MATRIX,
        PieceKind::L => L_MATRIX,
    };
    (matrix, kind.tint())
}
