//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or settled with a color and
//! the identity of the piece that painted it.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! The falling piece is painted onto the board like any locked piece. Its cells are
//! told apart by identity: validation lets a piece overlap its own cells, and painting
//! first erases every cell carrying the piece's identity before drawing the new
//! footprint.

use arrayvec::ArrayVec;

use crate::pieces::ActivePiece;
use crate::types::{Cell, PieceId, SettledCell, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH};

/// Row indices removed by one sweep
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
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
    pub fn index(x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i16 || y < 0 || y >= BOARD_HEIGHT as i16 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i16, y: i16) -> bool {
        Self::index(x, y).is_none()
    }

    /// Check if position is within bounds and either empty or owned by `id`
    pub fn is_clear_for(&self, x: i16, y: i16, id: PieceId) -> bool {
        match self.get(x, y) {
            Some(None) => true,
            Some(Some(cell)) => cell.piece_id == id,
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Decide whether `piece` may occupy its placement.
    ///
    /// Every cell must be on the board, and every cell must be empty or already
    /// carry the piece's own identity.
    pub fn validate(&self, piece: &ActivePiece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(x, y)| self.is_clear_for(x, y, piece.id))
    }

    /// Repaint `piece`: erase its old footprint, then settle its current cells.
    ///
    /// Cells owned by another identity are never overwritten. This does not judge
    /// validity; callers validate first.
    pub fn paint(&mut self, piece: &ActivePiece) {
        self.erase(piece.id);
        let settled = SettledCell {
            color: piece.color(),
            piece_id: piece.id,
        };
        for (x, y) in piece.cells() {
            if let Some(idx) = Self::index(x, y) {
                if self.cells[idx].is_none() {
                    self.cells[idx] = Some(settled);
                }
            }
        }
    }

    /// Pure form of [`Board::paint`]
    pub fn painted(&self, piece: &ActivePiece) -> Board {
        let mut next = self.clone();
        next.paint(piece);
        next
    }

    /// Clear every cell owned by `id`. Returns the number of cells cleared.
    pub fn erase(&mut self, id: PieceId) -> usize {
        let mut erased = 0;
        for cell in &mut self.cells {
            if matches!(cell, Some(c) if c.piece_id == id) {
                *cell = None;
                erased += 1;
            }
        }
        erased
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y`
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = BOARD_WIDTH as usize;
        let start = y * width;
        &self.cells[start..start + width]
    }

    /// Remove all full rows in a single pass.
    ///
    /// Rows that survive keep their content and order and drop by the number of full
    /// rows below them; one empty row per removed row is inserted at the top.
    /// Returns the indices (in pre-sweep coordinates) of the removed rows, top to bottom.
    /// Uses a two-pointer algorithm with zero-allocation.
    pub fn sweep(&mut self) -> ClearedRows {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
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

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    /// Pure form of [`Board::sweep`]
    pub fn swept(&self) -> Board {
        let mut next = self.clone();
        next.sweep();
        next
    }

    /// Number of settled cells
    pub fn settled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of cells owned by `id`
    pub fn count_owned_by(&self, id: PieceId) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Some(cell) if cell.piece_id == id))
            .count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Create from a flat array
    pub fn from_flat(cells: [Cell; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` is empty; any other character settles the cell with `cell`.
    /// Missing rows are empty. Intended for fixtures.
    pub fn from_rows(rows: &[&str], cell: SettledCell) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate().take(BOARD_HEIGHT as usize) {
            for (x, ch) in row.chars().enumerate().take(BOARD_WIDTH as usize) {
                if ch != '.' {
                    board.cells[y * BOARD_WIDTH as usize + x] = Some(cell);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceColor, ShapeKind};

    fn settled(id: u64) -> SettledCell {
        SettledCell {
            color: PieceColor::Red,
            piece_id: PieceId(id),
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_erase_only_touches_one_identity() {
        let mut board = Board::new();
        board.set(0, 0, Some(settled(1)));
        board.set(1, 0, Some(settled(2)));
        board.set(2, 0, Some(settled(1)));

        assert_eq!(board.erase(PieceId(1)), 2);
        assert_eq!(board.get(0, 0), Some(None));
        assert_eq!(board.get(1, 0), Some(Some(settled(2))));
    }

    #[test]
    fn test_paint_skips_foreign_cells() {
        let mut board = Board::new();
        board.set(1, 1, Some(settled(9)));

        let piece = ActivePiece {
            x: 0,
            y: 0,
            ..ActivePiece::new(ShapeKind::Square, PieceId(3))
        };
        board.paint(&piece);

        assert_eq!(board.count_owned_by(PieceId(3)), 3);
        assert_eq!(board.get(1, 1), Some(Some(settled(9))));
    }

    #[test]
    fn test_sweep_reports_rows_top_to_bottom() {
        let mut rows = vec![".........."; 20];
        rows[12] = "##########";
        rows[19] = "##########";
        let mut board = Board::from_rows(&rows, settled(1));
        let cleared = board.sweep();
        assert_eq!(cleared.as_slice(), &[12, 19]);
        assert_eq!(board.settled_count(), 0);
    }

    #[test]
    fn test_from_rows() {
        let board = Board::from_rows(&["#.#"], settled(4));
        assert!(board.is_occupied(0, 0));
        assert!(!board.is_occupied(1, 0));
        assert!(board.is_occupied(2, 0));
        assert_eq!(board.settled_count(), 2);
    }
}
