//! Copyable read models of a game, built by `GameState::snapshot_into`.
//!
//! A snapshot owns no references into the game, so renderers and other threads can
//! hold one across frames and refill it in place.

use crate::pieces::ActivePiece;
use crate::projection::{PreviewTiles, PREVIEW_TILES};
use crate::types::{Cell, PieceId, ShapeKind, BOARD_SIZE, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub rotation: u32,
    pub x: i8,
    pub y: i8,
    pub id: PieceId,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            id: value.id,
        }
    }
}

impl From<ActiveSnapshot> for ActivePiece {
    fn from(value: ActiveSnapshot) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            id: value.id,
        }
    }
}

/// Read model handed to renderers. The board includes the active piece's footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [Cell; BOARD_SIZE],
    pub active: ActiveSnapshot,
    pub next: ActiveSnapshot,
    pub next_tiles: PreviewTiles,
    pub started: bool,
    pub locked_count: u32,
    pub cleared_count: u32,
}

impl GameSnapshot {
    /// Reset to the not-started placeholder state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Cell at (x, y); out-of-range coordinates read as empty
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= BOARD_WIDTH as usize {
            return None;
        }
        self.board.get(y * BOARD_WIDTH as usize + x).copied().flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let placeholder = ActiveSnapshot::from(ActivePiece::placeholder());
        Self {
            board: [None; BOARD_SIZE],
            active: placeholder,
            next: placeholder,
            next_tiles: [None; PREVIEW_TILES],
            started: false,
            locked_count: 0,
            cleared_count: 0,
        }
    }
}
