//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or carries the tint of
//! the piece that filled it. Uses a flat array for cache locality and so that
//! copying a board is a plain memcpy (placement returns a new board value).
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Rows above the board (y < 0) are legal for piece cells:
//! they never collide and are dropped on merge.

use arrayvec::ArrayVec;

use crate::pieces::Matrix;
use crate::types::{Cell, Tint, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Number of rows, as a capacity for row lists
pub const ROWS: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y` (panics if `y` is out of range).
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Whether `matrix` anchored at (x, y) overlaps a wall, the floor, or an
    /// occupied cell.
    ///
    /// Cells above the top edge (row < 0) are never a collision on their own.
    pub fn collides(&self, matrix: &Matrix, x: i8, y: i8) -> bool {
        matrix.cells().any(|(dx, dy)| {
            let bx = x + dx;
            let by = y + dy;
            if bx < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 {
                return true;
            }
            by >= 0 && self.is_occupied(bx, by)
        })
    }

    /// Return a copy of this board with `matrix` written in at (x, y).
    ///
    /// Cells that land above the top edge are dropped. The receiver is left
    /// untouched.
    pub fn merged(&self, matrix: &Matrix, x: i8, y: i8, tint: Tint) -> Board {
        let mut out = self.clone();
        for (dx, dy) in matrix.cells() {
            let by = y + dy;
            if by >= 0 {
                out.set(x + dx, by, Some(tint));
            }
        }
        out
    }

    /// Clear all full rows and return the row indices that were cleared
    /// (top to bottom, as they were numbered before the clear).
    ///
    /// Fullness is decided against the board as it was on entry: a single
    /// two-pointer pass moves every kept row to its final slot, so no row is
    /// skipped when indices shift.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, ROWS> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = ROWS;

        // Scan from bottom to top
        for read_y in (0..ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Fresh empty rows on top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Write the board into a row-major 2D grid.
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; ROWS]) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Value-returning line clear: compacted board plus the number of rows removed.
pub fn clear_lines(board: &Board) -> (Board, usize) {
    let mut out = board.clone();
    let cleared = out.clear_full_rows().len();
    (out, cleared)
}
